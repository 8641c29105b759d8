use crate::config::TimingConfig;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Timed transitions emitted by a flow driver, applied in order by the
/// owning [`super::FlowSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowUpdate {
    StepStarted(usize),
    StepCompleted(usize),
    AnalysisStarted,
    AnalysisComplete,
    FixStepStarted(usize),
    FixStepCompleted(usize),
    FixComplete,
}

/// Dwell times for each phase of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTimings {
    pub step_dwell: Duration,
    pub analysis: Duration,
    pub fix_step: Duration,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            step_dwell: Duration::from_millis(1500),
            analysis: Duration::from_millis(2000),
            fix_step: Duration::from_millis(1000),
        }
    }
}

impl From<&TimingConfig> for FlowTimings {
    fn from(config: &TimingConfig) -> Self {
        Self {
            step_dwell: Duration::from_millis(config.step_dwell_ms),
            analysis: Duration::from_millis(config.analysis_ms),
            fix_step: Duration::from_millis(config.fix_step_ms),
        }
    }
}

pub(super) fn spawn_diagnostic(
    step_count: usize,
    timings: FlowTimings,
) -> (JoinHandle<()>, mpsc::UnboundedReceiver<FlowUpdate>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_diagnostic(step_count, timings, tx));
    (handle, rx)
}

pub(super) fn spawn_fix(
    step_count: usize,
    timings: FlowTimings,
) -> (JoinHandle<()>, mpsc::UnboundedReceiver<FlowUpdate>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_fix(step_count, timings, tx));
    (handle, rx)
}

/// Walk the diagnostic steps, then the analysis pause.
///
/// Returns early as soon as the receiving session is gone.
async fn run_diagnostic(
    step_count: usize,
    timings: FlowTimings,
    tx: mpsc::UnboundedSender<FlowUpdate>,
) {
    for idx in 0..step_count {
        if tx.send(FlowUpdate::StepStarted(idx)).is_err() {
            return;
        }
        sleep(timings.step_dwell).await;
        if tx.send(FlowUpdate::StepCompleted(idx)).is_err() {
            return;
        }
    }

    if tx.send(FlowUpdate::AnalysisStarted).is_err() {
        return;
    }
    sleep(timings.analysis).await;
    let _ = tx.send(FlowUpdate::AnalysisComplete);
}

async fn run_fix(step_count: usize, timings: FlowTimings, tx: mpsc::UnboundedSender<FlowUpdate>) {
    for idx in 0..step_count {
        if tx.send(FlowUpdate::FixStepStarted(idx)).is_err() {
            return;
        }
        sleep(timings.fix_step).await;
        if tx.send(FlowUpdate::FixStepCompleted(idx)).is_err() {
            return;
        }
    }
    let _ = tx.send(FlowUpdate::FixComplete);
}
