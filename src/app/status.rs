/// Key hints shown in the status bar, chosen from the current view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusHints {
    pub left_hint: String,
    pub right_hint: String,
}

impl StatusHints {
    pub fn dashboard() -> Self {
        Self {
            left_hint: "h/j/k/l: select  Enter: run".to_string(),
            right_hint: "c: commands  ?: help  q: quit".to_string(),
        }
    }

    pub fn command_popup() -> Self {
        Self {
            left_hint: "Enter: run scenario".to_string(),
            right_hint: "c/Esc: close".to_string(),
        }
    }

    pub fn scanning() -> Self {
        Self {
            left_hint: "Diagnostics running...".to_string(),
            right_hint: "Esc: abandon".to_string(),
        }
    }

    pub fn results(can_fix: bool) -> Self {
        if can_fix {
            Self {
                left_hint: "Fix ready".to_string(),
                right_hint: "f: apply fix  Esc: home".to_string(),
            }
        } else {
            Self {
                left_hint: "Results".to_string(),
                right_hint: "Esc: home".to_string(),
            }
        }
    }

    pub fn applying_fix() -> Self {
        Self {
            left_hint: "Applying fix...".to_string(),
            right_hint: "Esc: abandon".to_string(),
        }
    }

    pub fn command_mode() -> Self {
        Self {
            left_hint: String::new(),
            right_hint: "Enter: run  Esc: cancel".to_string(),
        }
    }

    pub fn help() -> Self {
        Self {
            left_hint: String::new(),
            right_hint: "Esc: close help".to_string(),
        }
    }
}
