use super::catalog::{self, FIX_STEPS};
use super::driver::{self, FlowTimings, FlowUpdate};
use super::{DiagnosticCategory, LiveMetrics, StepSequencer};
use crate::config::ConsoleConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Phase of a diagnostic flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Running,
    Analyzing,
    Complete,
    ApplyingFix,
}

impl FlowState {
    pub fn display_name(&self) -> &'static str {
        match self {
            FlowState::Running => "RUNNING",
            FlowState::Analyzing => "ANALYZING",
            FlowState::Complete => "COMPLETE",
            FlowState::ApplyingFix => "APPLYING FIX",
        }
    }
}

/// Whether a fix may be applied again after one already completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixGuard {
    /// Only a fresh diagnosis can lead to a fix
    #[default]
    SingleShot,
    /// Any completed flow accepts another fix
    Repeatable,
}

/// How the flow last arrived at `Complete`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Diagnosed,
    Fixed,
}

/// Settings a session is constructed with
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowSettings {
    pub timings: FlowTimings,
    pub fix_guard: FixGuard,
    pub seed: Option<u64>,
}

impl From<&ConsoleConfig> for FlowSettings {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            timings: FlowTimings::from(&config.timing),
            fix_guard: if config.flow.repeat_fix {
                FixGuard::Repeatable
            } else {
                FixGuard::SingleShot
            },
            seed: config.telemetry.seed,
        }
    }
}

/// One run of dashboard -> diagnostic -> result.
///
/// Owns every piece of transient flow state plus the driver task that
/// paces it. Dropping the session aborts the driver, so nothing can touch
/// the state after the user leaves the flow.
pub struct FlowSession {
    category: DiagnosticCategory,
    state: FlowState,
    steps: StepSequencer,
    fix_steps: StepSequencer,
    progress: f64,
    metrics: LiveMetrics,
    outcome: Option<Outcome>,
    fixes_applied: u32,
    settings: FlowSettings,
    rng: StdRng,
    updates: Option<mpsc::UnboundedReceiver<FlowUpdate>>,
    driver: Option<JoinHandle<()>>,
}

impl FlowSession {
    /// Start a diagnostic flow. Must be called inside a tokio runtime.
    pub fn start(category: DiagnosticCategory, settings: FlowSettings) -> Self {
        let mut session = Self::idle(category, settings);
        let (handle, rx) = driver::spawn_diagnostic(session.steps.len(), settings.timings);
        session.driver = Some(handle);
        session.updates = Some(rx);
        info!("Started {category} diagnostic flow");
        session
    }

    /// Session in its initial state with no driver attached
    fn idle(category: DiagnosticCategory, settings: FlowSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            category,
            state: FlowState::Running,
            steps: StepSequencer::begin(category),
            fix_steps: StepSequencer::new(&FIX_STEPS),
            progress: 0.0,
            metrics: LiveMetrics::BASELINE,
            outcome: None,
            fixes_applied: 0,
            settings,
            rng,
            updates: None,
            driver: None,
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        self.category
    }

    pub fn title(&self) -> &'static str {
        catalog::profile(self.category).title
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn steps(&self) -> &StepSequencer {
        &self.steps
    }

    pub fn fix_steps(&self) -> &StepSequencer {
        &self.fix_steps
    }

    /// Progress of the current phase, 0-100
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn metrics(&self) -> &LiveMetrics {
        &self.metrics
    }

    pub fn fixes_applied(&self) -> u32 {
        self.fixes_applied
    }

    /// Seconds-remaining estimate shown under the progress gauge
    pub fn seconds_remaining(&self) -> u32 {
        let spent = (self.progress * 0.15).round() as u32;
        15u32.saturating_sub(spent)
    }

    /// Time left in the fix walk, rounded up to whole seconds
    pub fn fix_seconds_remaining(&self) -> u64 {
        let remaining = self.fix_steps.len().saturating_sub(self.fix_steps.completed()) as u32;
        let left = self.settings.timings.fix_step * remaining;
        left.as_millis().div_ceil(1000) as u64
    }

    /// Whether `apply_fix` would be accepted right now
    pub fn can_apply_fix(&self) -> bool {
        match (self.state, self.outcome) {
            (FlowState::Complete, Some(Outcome::Diagnosed)) => true,
            (FlowState::Complete, Some(Outcome::Fixed)) => {
                self.settings.fix_guard == FixGuard::Repeatable
            }
            _ => false,
        }
    }

    /// Begin the fix walk. Returns false when the transition is not allowed.
    pub fn apply_fix(&mut self) -> bool {
        if !self.begin_fix() {
            return false;
        }
        let (handle, rx) = driver::spawn_fix(self.fix_steps.len(), self.settings.timings);
        self.replace_driver(handle, rx);
        true
    }

    fn begin_fix(&mut self) -> bool {
        if !self.can_apply_fix() {
            warn!(
                "Rejected fix in state {} (fixes applied: {})",
                self.state.display_name(),
                self.fixes_applied
            );
            return false;
        }

        self.state = FlowState::ApplyingFix;
        self.fix_steps = StepSequencer::new(&FIX_STEPS);
        self.progress = 0.0;
        info!("Applying channel switch fix");
        true
    }

    fn replace_driver(&mut self, handle: JoinHandle<()>, rx: mpsc::UnboundedReceiver<FlowUpdate>) {
        if let Some(old) = self.driver.replace(handle) {
            old.abort();
        }
        self.updates = Some(rx);
    }

    /// Wait for the next timed update. `None` once the driver has finished.
    pub async fn next_update(&mut self) -> Option<FlowUpdate> {
        match self.updates.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// Apply a timed update. Updates that do not fit the current phase are
    /// dropped and reported as false.
    pub fn apply(&mut self, update: FlowUpdate) -> bool {
        let applied = match (self.state, update) {
            (FlowState::Running, FlowUpdate::StepStarted(idx)) => self.steps.start(idx),
            (FlowState::Running, FlowUpdate::StepCompleted(idx)) => {
                let done = self.steps.complete(idx);
                if done {
                    self.progress = self.steps.progress();
                    if self.category.has_live_metrics() {
                        self.metrics.jitter(&mut self.rng);
                    }
                }
                done
            }
            (FlowState::Running, FlowUpdate::AnalysisStarted) if self.steps.is_finished() => {
                self.state = FlowState::Analyzing;
                info!("All {} steps complete, analyzing", self.steps.len());
                true
            }
            (FlowState::Analyzing, FlowUpdate::AnalysisComplete) => {
                self.state = FlowState::Complete;
                self.outcome = Some(Outcome::Diagnosed);
                info!("Diagnosis complete");
                true
            }
            (FlowState::ApplyingFix, FlowUpdate::FixStepStarted(idx)) => self.fix_steps.start(idx),
            (FlowState::ApplyingFix, FlowUpdate::FixStepCompleted(idx)) => {
                let done = self.fix_steps.complete(idx);
                if done {
                    self.progress = self.fix_steps.progress();
                }
                done
            }
            (FlowState::ApplyingFix, FlowUpdate::FixComplete) if self.fix_steps.is_finished() => {
                self.metrics = LiveMetrics::POST_FIX;
                self.state = FlowState::Complete;
                self.outcome = Some(Outcome::Fixed);
                self.fixes_applied += 1;
                info!("Fix applied, now on channel {}", self.metrics.channel);
                true
            }
            _ => false,
        };

        if !applied {
            debug!("Ignored {update:?} in state {}", self.state.display_name());
        }
        applied
    }
}

impl Drop for FlowSession {
    fn drop(&mut self) {
        if let Some(handle) = self.driver.take() {
            handle.abort();
        }
        debug!("Tore down {} flow session", self.category);
    }
}

#[cfg(test)]
impl FlowSession {
    pub(crate) fn abort_handle(&self) -> Option<tokio::task::AbortHandle> {
        self.driver.as_ref().map(|h| h.abort_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::StepStatus;
    use std::time::Duration;

    fn seeded() -> FlowSettings {
        FlowSettings {
            seed: Some(1),
            ..FlowSettings::default()
        }
    }

    /// Feed a full diagnostic walk through a session without timers
    fn diagnose(session: &mut FlowSession) {
        for idx in 0..session.steps().len() {
            assert!(session.apply(FlowUpdate::StepStarted(idx)));
            assert!(session.apply(FlowUpdate::StepCompleted(idx)));
        }
        assert!(session.apply(FlowUpdate::AnalysisStarted));
        assert!(session.apply(FlowUpdate::AnalysisComplete));
    }

    fn fix(session: &mut FlowSession) {
        assert!(session.begin_fix());
        for idx in 0..FIX_STEPS.len() {
            assert!(session.apply(FlowUpdate::FixStepStarted(idx)));
            assert!(session.apply(FlowUpdate::FixStepCompleted(idx)));
        }
        assert!(session.apply(FlowUpdate::FixComplete));
    }

    #[test]
    fn new_session_starts_running_at_zero() {
        let session = FlowSession::idle(DiagnosticCategory::Performance, seeded());
        assert_eq!(session.state(), FlowState::Running);
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.steps().len(), 5);
        assert_eq!(*session.metrics(), LiveMetrics::BASELINE);
        assert!(!session.can_apply_fix());
    }

    #[test]
    fn progress_never_decreases_during_run() {
        let mut session = FlowSession::idle(DiagnosticCategory::Signal, seeded());
        let mut last = session.progress();
        for idx in 0..6 {
            session.apply(FlowUpdate::StepStarted(idx));
            assert!(session.progress() >= last);
            last = session.progress();
            session.apply(FlowUpdate::StepCompleted(idx));
            assert!(session.progress() >= last);
            last = session.progress();
        }
        assert_eq!(session.progress(), 100.0);
    }

    #[test]
    fn complete_is_unreachable_straight_from_running() {
        let mut session = FlowSession::idle(DiagnosticCategory::Mesh, seeded());
        assert!(!session.apply(FlowUpdate::AnalysisComplete));
        assert!(!session.apply(FlowUpdate::FixComplete));
        assert_eq!(session.state(), FlowState::Running);

        // analysis cannot begin with steps outstanding
        session.apply(FlowUpdate::StepStarted(0));
        session.apply(FlowUpdate::StepCompleted(0));
        assert!(!session.apply(FlowUpdate::AnalysisStarted));
        assert_eq!(session.state(), FlowState::Running);
    }

    #[test]
    fn only_signal_jitters_metrics() {
        let mut session = FlowSession::idle(DiagnosticCategory::System, seeded());
        diagnose(&mut session);
        assert_eq!(*session.metrics(), LiveMetrics::BASELINE);
    }

    #[test]
    fn fix_resets_progress_and_lands_on_post_fix_metrics() {
        let mut session = FlowSession::idle(DiagnosticCategory::Signal, seeded());
        diagnose(&mut session);
        assert_eq!(session.progress(), 100.0);

        assert!(session.begin_fix());
        assert_eq!(session.state(), FlowState::ApplyingFix);
        assert_eq!(session.progress(), 0.0);
        assert!(
            session
                .fix_steps()
                .steps()
                .iter()
                .all(|s| s.status == StepStatus::Pending)
        );

        for idx in 0..FIX_STEPS.len() {
            session.apply(FlowUpdate::FixStepStarted(idx));
            session.apply(FlowUpdate::FixStepCompleted(idx));
        }
        assert!(session.apply(FlowUpdate::FixComplete));

        assert_eq!(session.state(), FlowState::Complete);
        assert_eq!(session.progress(), 100.0);
        assert_eq!(
            *session.metrics(),
            LiveMetrics {
                rssi: -65,
                noise: -91,
                retries: 3,
                channel: 36
            }
        );
    }

    #[test]
    fn single_shot_guard_rejects_second_fix() {
        let mut session = FlowSession::idle(DiagnosticCategory::Signal, seeded());
        diagnose(&mut session);
        fix(&mut session);
        assert!(!session.can_apply_fix());
        assert!(!session.begin_fix());
        assert_eq!(session.state(), FlowState::Complete);
        assert_eq!(session.fixes_applied(), 1);
    }

    #[test]
    fn repeatable_guard_allows_another_fix() {
        let settings = FlowSettings {
            fix_guard: FixGuard::Repeatable,
            ..seeded()
        };
        let mut session = FlowSession::idle(DiagnosticCategory::Signal, settings);
        diagnose(&mut session);
        fix(&mut session);
        fix(&mut session);
        assert_eq!(session.fixes_applied(), 2);
    }

    #[test]
    fn seconds_remaining_counts_down() {
        let mut session = FlowSession::idle(DiagnosticCategory::Mesh, seeded());
        assert_eq!(session.seconds_remaining(), 15);
        diagnose(&mut session);
        assert_eq!(session.seconds_remaining(), 0);
    }

    #[test]
    fn fix_eta_follows_configured_step_time() {
        let settings = FlowSettings {
            timings: FlowTimings {
                fix_step: Duration::from_millis(2500),
                ..FlowTimings::default()
            },
            ..seeded()
        };
        let mut session = FlowSession::idle(DiagnosticCategory::Signal, settings);
        diagnose(&mut session);
        assert!(session.begin_fix());
        assert_eq!(session.fix_seconds_remaining(), 15);

        session.apply(FlowUpdate::FixStepStarted(0));
        session.apply(FlowUpdate::FixStepCompleted(0));
        // 5 x 2.5s rounds up
        assert_eq!(session.fix_seconds_remaining(), 13);
    }

    #[tokio::test(start_paused = true)]
    async fn signal_flow_reaches_complete_via_analyzing() {
        let mut session = FlowSession::start(DiagnosticCategory::Signal, seeded());
        let mut saw_analyzing = false;

        while let Some(update) = session.next_update().await {
            assert!(session.apply(update), "{update:?} rejected");
            if update == FlowUpdate::StepCompleted(5) {
                assert!(session.steps().is_finished());
            }
            if session.state() == FlowState::Analyzing {
                saw_analyzing = true;
                assert_eq!(session.steps().completed(), 6);
            }
        }

        assert!(saw_analyzing);
        assert_eq!(session.state(), FlowState::Complete);
        assert_eq!(session.progress(), 100.0);
        assert!(session.can_apply_fix());
    }

    #[tokio::test(start_paused = true)]
    async fn applied_fix_runs_to_completion() {
        let mut session = FlowSession::start(DiagnosticCategory::Signal, seeded());
        while let Some(update) = session.next_update().await {
            session.apply(update);
        }

        assert!(session.apply_fix());
        assert_eq!(session.state(), FlowState::ApplyingFix);
        assert_eq!(session.progress(), 0.0);

        while let Some(update) = session.next_update().await {
            assert!(session.apply(update), "{update:?} rejected");
        }
        assert_eq!(session.state(), FlowState::Complete);
        assert_eq!(*session.metrics(), LiveMetrics::POST_FIX);
        assert!(!session.apply_fix());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_session_aborts_driver() {
        let mut session = FlowSession::start(DiagnosticCategory::Mesh, seeded());
        let first = session.next_update().await;
        assert_eq!(first, Some(FlowUpdate::StepStarted(0)));

        let handle = session.abort_handle().expect("driver running");
        assert!(!handle.is_finished());
        drop(session);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(handle.is_finished());
    }
}
