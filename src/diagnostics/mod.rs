pub mod catalog;
mod driver;
mod flow;
mod jitter;
mod sequencer;

pub use catalog::{FIX_STEPS, Scenario, Section};
pub use driver::{FlowTimings, FlowUpdate};
pub use flow::{FixGuard, FlowSession, FlowSettings, FlowState};
pub use jitter::LiveMetrics;
pub use sequencer::{Step, StepSequencer, StepStatus};

use crate::error::ConsoleError;
use std::fmt;
use std::str::FromStr;

/// Which family of diagnostics a flow runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DiagnosticCategory {
    Signal,
    Performance,
    Mesh,
    System,
}

impl DiagnosticCategory {
    pub const ALL: [DiagnosticCategory; 4] = [
        DiagnosticCategory::Signal,
        DiagnosticCategory::Performance,
        DiagnosticCategory::Mesh,
        DiagnosticCategory::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCategory::Signal => "signal",
            DiagnosticCategory::Performance => "performance",
            DiagnosticCategory::Mesh => "mesh",
            DiagnosticCategory::System => "system",
        }
    }

    /// Only signal diagnostics stream live RF telemetry
    pub fn has_live_metrics(&self) -> bool {
        matches!(self, DiagnosticCategory::Signal)
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosticCategory {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "signal" | "rf" => Ok(DiagnosticCategory::Signal),
            "performance" | "perf" => Ok(DiagnosticCategory::Performance),
            "mesh" => Ok(DiagnosticCategory::Mesh),
            "system" | "sys" => Ok(DiagnosticCategory::System),
            other => Err(ConsoleError::UnknownCategory(other.to_string())),
        }
    }
}
