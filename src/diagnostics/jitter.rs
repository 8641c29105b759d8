use rand::Rng;
use tracing::debug;

/// Snapshot of the RF telemetry shown during signal diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveMetrics {
    /// Signal strength in dBm
    pub rssi: i32,
    /// Noise floor in dBm
    pub noise: i32,
    /// TX retry rate in percent
    pub retries: u32,
    pub channel: u32,
}

impl LiveMetrics {
    /// Readings before any diagnosis runs
    pub const BASELINE: LiveMetrics = LiveMetrics {
        rssi: -67,
        noise: -89,
        retries: 15,
        channel: 149,
    };

    /// Readings after the channel switch fix
    pub const POST_FIX: LiveMetrics = LiveMetrics {
        rssi: -65,
        noise: -91,
        retries: 3,
        channel: 36,
    };

    /// Nudge RSSI and retries by a small random amount.
    ///
    /// RSSI moves by -3..=2 dBm with no clamp. Retries move by -5..=4 and
    /// never drop below zero.
    pub fn jitter<R: Rng>(&mut self, rng: &mut R) {
        let rssi_delta = rng.random_range(-3..=2);
        let retries_delta: i64 = rng.random_range(-5..=4);

        self.rssi += rssi_delta;
        self.retries = (i64::from(self.retries) + retries_delta).max(0) as u32;

        debug!(
            rssi = self.rssi,
            retries = self.retries,
            "Jittered live metrics ({rssi_delta:+}, {retries_delta:+})"
        );
    }

    /// SNR in dB
    pub fn snr(&self) -> i32 {
        self.rssi - self.noise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn jitter_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let mut metrics = LiveMetrics::BASELINE;
            metrics.jitter(&mut rng);
            let drift = metrics.rssi - LiveMetrics::BASELINE.rssi;
            assert!((-3..=2).contains(&drift), "rssi drift {drift}");
            let retry_drift = metrics.retries as i64 - LiveMetrics::BASELINE.retries as i64;
            assert!((-5..=4).contains(&retry_drift), "retry drift {retry_drift}");
            assert_eq!(metrics.noise, LiveMetrics::BASELINE.noise);
            assert_eq!(metrics.channel, LiveMetrics::BASELINE.channel);
        }
    }

    #[test]
    fn retries_floor_at_zero() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let mut metrics = LiveMetrics {
                retries: 1,
                ..LiveMetrics::BASELINE
            };
            metrics.jitter(&mut rng);
            // 1 + (-5..=4) would go negative without the floor
            assert!(metrics.retries <= 5, "retries wrapped to {}", metrics.retries);
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let mut a = LiveMetrics::BASELINE;
        let mut b = LiveMetrics::BASELINE;
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        for _ in 0..6 {
            a.jitter(&mut rng_a);
            b.jitter(&mut rng_b);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn snr_is_rssi_over_noise() {
        assert_eq!(LiveMetrics::BASELINE.snr(), 22);
        assert_eq!(LiveMetrics::POST_FIX.snr(), 26);
    }
}
