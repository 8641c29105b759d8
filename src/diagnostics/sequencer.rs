use super::DiagnosticCategory;
use super::catalog;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Pending,
    Running,
    Complete,
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Pending => "Pending",
            StepStatus::Running => "Running",
            StepStatus::Complete => "Complete",
        }
    }
}

/// A named step in a diagnostic walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: &'static str,
    pub status: StepStatus,
}

/// Walks a fixed list of steps strictly left to right.
///
/// Each step goes Pending -> Running -> Complete before the next one starts.
/// Calls that would skip or regress a step are ignored and return false.
#[derive(Debug, Clone)]
pub struct StepSequencer {
    steps: Vec<Step>,
    /// Index of the next step to start (or the running one)
    cursor: usize,
}

impl StepSequencer {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            steps: names
                .iter()
                .map(|&name| Step {
                    name,
                    status: StepStatus::Pending,
                })
                .collect(),
            cursor: 0,
        }
    }

    /// Fresh sequence for a diagnostic category, all steps pending
    pub fn begin(category: DiagnosticCategory) -> Self {
        Self::new(catalog::profile(category).steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn completed(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Complete)
            .count()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Currently running step, if any
    pub fn current(&self) -> Option<&Step> {
        self.steps
            .get(self.cursor)
            .filter(|s| s.status == StepStatus::Running)
    }

    /// Percentage of steps complete, 0-100
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.completed() as f64 * 100.0 / self.steps.len() as f64
    }

    /// Mark step `index` as running. Only the next pending step may start.
    pub fn start(&mut self, index: usize) -> bool {
        if index != self.cursor {
            return false;
        }
        match self.steps.get_mut(index) {
            Some(step) if step.status == StepStatus::Pending => {
                step.status = StepStatus::Running;
                debug!("Step {index} running: {}", step.name);
                true
            }
            _ => false,
        }
    }

    /// Mark the running step `index` as complete and move the cursor on.
    pub fn complete(&mut self, index: usize) -> bool {
        if index != self.cursor {
            return false;
        }
        match self.steps.get_mut(index) {
            Some(step) if step.status == StepStatus::Running => {
                step.status = StepStatus::Complete;
                debug!("Step {index} complete: {}", step.name);
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }
}
