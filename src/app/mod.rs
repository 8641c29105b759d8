mod dashboard;
mod status;

pub use dashboard::{HEALTH_CARDS, HealthCard, Selection};
pub use status::StatusHints;

use crate::config::ConsoleConfig;
use crate::diagnostics::{DiagnosticCategory, FlowSession, FlowSettings, FlowState, FlowUpdate};
use crate::ui::Theme;
use crate::vim::{Command, InputBuffer, ModeAction, VimMode, parse_command};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

/// Message displayed to the user
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

/// Top-level screen. Leaving a flow drops its session, which cancels the
/// session's pending timers.
pub enum View {
    Dashboard,
    Flow(FlowSession),
}

pub struct ConsoleApp {
    pub config: ConsoleConfig,
    pub theme: Theme,
    pub vim_mode: VimMode,
    pub command_buffer: InputBuffer,
    pub view: View,
    pub selection: Selection,
    pub show_commands: bool,
    pub show_help: bool,
    pub message: Option<Message>,
    pub should_exit: bool,
    spinner_frame: usize,
}

impl ConsoleApp {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            theme: Theme::default(),
            vim_mode: VimMode::Normal,
            command_buffer: InputBuffer::new(),
            view: View::Dashboard,
            selection: Selection::default(),
            show_commands: false,
            show_help: false,
            message: None,
            should_exit: false,
            spinner_frame: 0,
        }
    }

    pub fn session(&self) -> Option<&FlowSession> {
        match &self.view {
            View::Flow(session) => Some(session),
            View::Dashboard => None,
        }
    }

    /// Start a fresh flow, discarding any flow already on screen
    pub fn start_diagnostic(&mut self, category: DiagnosticCategory) {
        self.show_commands = false;
        self.message = None;
        // Drop the old session before spawning the new driver
        self.view = View::Dashboard;
        let settings = FlowSettings::from(&self.config);
        self.view = View::Flow(FlowSession::start(category, settings));
    }

    /// Leave the flow; all session state is discarded
    pub fn return_home(&mut self) {
        if let View::Flow(session) = &self.view {
            info!("Returning to dashboard from {} flow", session.category());
        }
        self.view = View::Dashboard;
    }

    pub fn apply_fix(&mut self) {
        let accepted = match &mut self.view {
            View::Flow(session) => session.apply_fix(),
            View::Dashboard => false,
        };
        if !accepted {
            self.set_error("No fix available here. Run a diagnosis first.".to_string());
        }
    }

    /// Wait for the active flow's next timed update. Never resolves while
    /// no flow is running.
    pub async fn next_flow_update(&mut self) -> FlowUpdate {
        if let View::Flow(session) = &mut self.view {
            if let Some(update) = session.next_update().await {
                return update;
            }
        }
        std::future::pending().await
    }

    pub fn handle_flow_update(&mut self, update: FlowUpdate) {
        let View::Flow(session) = &mut self.view else {
            return;
        };

        let before = session.state();
        session.apply(update);
        let after = session.state();

        if before != FlowState::Complete && after == FlowState::Complete {
            let text = if before == FlowState::ApplyingFix {
                "Fix applied. Connection restored on channel 36."
            } else {
                "Diagnosis complete. Press f to apply the recommended fix."
            };
            self.set_info(text.to_string());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return;
        }

        // Clear message on any key
        self.message = None;

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match self.vim_mode {
            VimMode::Normal => self.handle_normal_mode(key),
            VimMode::Command => self.handle_command_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(':') => {
                self.vim_mode = self.vim_mode.transition(ModeAction::EnterCommand);
                self.command_buffer.clear();
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Flow(_) => self.handle_flow_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.selection.left(),
            KeyCode::Char('l') | KeyCode::Right => self.selection.right(),
            KeyCode::Char('k') | KeyCode::Up => self.selection.up(),
            KeyCode::Char('j') | KeyCode::Down => self.selection.down(),
            KeyCode::Char('c') => self.show_commands = !self.show_commands,
            KeyCode::Enter => {
                let category = self.selection.scenario().category();
                self.start_diagnostic(category);
            }
            KeyCode::Esc => self.show_commands = false,
            KeyCode::Char('q') => self.should_exit = true,
            _ => {}
        }
    }

    fn handle_flow_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('f') => self.apply_fix(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => self.return_home(),
            _ => {}
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let input = self.command_buffer.content().to_string();
                self.vim_mode = self.vim_mode.transition(ModeAction::Execute);
                self.command_buffer.clear();
                self.execute_command(&input);
            }
            KeyCode::Backspace => {
                if !self.command_buffer.delete_back() {
                    self.vim_mode = self.vim_mode.transition(ModeAction::Escape);
                }
            }
            KeyCode::Left => self.command_buffer.move_left(),
            KeyCode::Right => self.command_buffer.move_right(),
            KeyCode::Char(c) => self.command_buffer.insert(c),
            _ => {}
        }
    }

    fn execute_command(&mut self, input: &str) {
        let command = match parse_command(input) {
            Ok(command) => command,
            Err(e) => {
                self.set_error(e.to_string());
                return;
            }
        };

        match command {
            Command::Scan(Some(category)) => self.start_diagnostic(category),
            Command::Scan(None) => {
                let category = match &self.view {
                    View::Flow(session) => session.category(),
                    View::Dashboard => self.selection.scenario().category(),
                };
                self.start_diagnostic(category);
            }
            Command::Fix => self.apply_fix(),
            Command::Home => self.return_home(),
            Command::Commands => match self.view {
                View::Dashboard => self.show_commands = !self.show_commands,
                View::Flow(_) => self.set_error("Commands are listed on the dashboard".to_string()),
            },
            Command::Help => self.show_help = true,
            Command::Quit => self.should_exit = true,
        }
    }

    pub fn set_error(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: true,
        });
    }

    pub fn set_info(&mut self, text: String) {
        self.message = Some(Message {
            text,
            is_error: false,
        });
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 4;
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        SPINNER[self.spinner_frame]
    }

    pub fn status_hints(&self) -> StatusHints {
        if self.vim_mode == VimMode::Command {
            return StatusHints::command_mode();
        }
        if self.show_help {
            return StatusHints::help();
        }

        match &self.view {
            View::Dashboard if self.show_commands => StatusHints::command_popup(),
            View::Dashboard => StatusHints::dashboard(),
            View::Flow(session) => match session.state() {
                FlowState::Running | FlowState::Analyzing => StatusHints::scanning(),
                FlowState::Complete => StatusHints::results(session.can_apply_fix()),
                FlowState::ApplyingFix => StatusHints::applying_fix(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::LiveMetrics;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_command(app: &mut ConsoleApp, text: &str) {
        app.handle_key(key(KeyCode::Char(':')));
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
    }

    fn fast_config() -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        config.telemetry.seed = Some(3);
        config
    }

    async fn drain(app: &mut ConsoleApp, until: FlowState) {
        while app.session().map(|s| s.state()) != Some(until) {
            let update = app.next_flow_update().await;
            app.handle_flow_update(update);
        }
    }

    #[test]
    fn dashboard_navigation_and_popup() {
        let mut app = ConsoleApp::new(fast_config());
        app.handle_key(key(KeyCode::Char('l')));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selection, Selection { section: 1, row: 1 });

        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.show_commands);
        assert_eq!(app.status_hints(), StatusHints::command_popup());
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_commands);
    }

    #[test]
    fn unknown_command_reports_error() {
        let mut app = ConsoleApp::new(fast_config());
        type_command(&mut app, "reboot");
        assert_eq!(app.vim_mode, VimMode::Normal);
        let message = app.message.as_ref().expect("error message");
        assert!(message.is_error);
        assert!(message.text.contains("reboot"));
    }

    #[test]
    fn fix_on_dashboard_is_rejected() {
        let mut app = ConsoleApp::new(fast_config());
        type_command(&mut app, "fix");
        assert!(app.message.as_ref().is_some_and(|m| m.is_error));
        assert!(app.session().is_none());
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = ConsoleApp::new(fast_config());
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_exit);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_exit);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = ConsoleApp::new(fast_config());
        app.handle_key(key(KeyCode::Char(':')));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_exit);
    }

    #[tokio::test(start_paused = true)]
    async fn enter_runs_selected_scenario_through_fix() {
        let mut app = ConsoleApp::new(fast_config());
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().map(|s| s.category()), Some(DiagnosticCategory::Signal));
        assert_eq!(app.status_hints(), StatusHints::scanning());

        drain(&mut app, FlowState::Complete).await;
        assert_eq!(app.status_hints(), StatusHints::results(true));
        assert!(app.message.as_ref().is_some_and(|m| !m.is_error));

        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.session().map(|s| s.state()), Some(FlowState::ApplyingFix));
        assert_eq!(app.session().map(|s| s.progress()), Some(0.0));

        drain(&mut app, FlowState::Complete).await;
        let session = app.session().expect("still in flow");
        assert_eq!(*session.metrics(), LiveMetrics::POST_FIX);
        assert_eq!(app.status_hints(), StatusHints::results(false));

        // second fix is refused
        app.handle_key(key(KeyCode::Char('f')));
        assert!(app.message.as_ref().is_some_and(|m| m.is_error));
        assert_eq!(app.session().map(|s| s.state()), Some(FlowState::Complete));
    }

    #[tokio::test(start_paused = true)]
    async fn return_home_mid_scan_discards_session() {
        let mut app = ConsoleApp::new(fast_config());
        type_command(&mut app, "scan mesh");
        assert_eq!(app.session().map(|s| s.category()), Some(DiagnosticCategory::Mesh));

        let update = app.next_flow_update().await;
        app.handle_flow_update(update);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.session().is_none());

        // No flow left to drive; the update future stays pending
        let pending = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            app.next_flow_update(),
        )
        .await;
        assert!(pending.is_err());
        assert!(matches!(app.view, View::Dashboard));
    }

    #[tokio::test(start_paused = true)]
    async fn return_home_while_analyzing_stops_driver() {
        let mut app = ConsoleApp::new(fast_config());
        app.start_diagnostic(DiagnosticCategory::Signal);
        drain(&mut app, FlowState::Analyzing).await;

        let handle = app.session().and_then(|s| s.abort_handle()).expect("driver");
        assert!(!handle.is_finished());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.session().is_none());

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn return_home_while_applying_fix_stops_driver() {
        let mut app = ConsoleApp::new(fast_config());
        app.start_diagnostic(DiagnosticCategory::Signal);
        drain(&mut app, FlowState::Complete).await;
        app.apply_fix();

        let update = app.next_flow_update().await;
        app.handle_flow_update(update);
        assert_eq!(app.session().map(|s| s.state()), Some(FlowState::ApplyingFix));

        let handle = app.session().and_then(|s| s.abort_handle()).expect("driver");
        assert!(!handle.is_finished());
        type_command(&mut app, "home");
        assert!(app.session().is_none());

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_fix_reports_fix_applied() {
        let mut config = fast_config();
        config.flow.repeat_fix = true;
        let mut app = ConsoleApp::new(config);
        app.start_diagnostic(DiagnosticCategory::Signal);
        drain(&mut app, FlowState::Complete).await;

        app.apply_fix();
        drain(&mut app, FlowState::Complete).await;
        assert!(app.session().is_some_and(|s| s.can_apply_fix()));

        let message = app.message.as_ref().expect("completion message");
        assert!(!message.is_error);
        assert!(message.text.starts_with("Fix applied"));
    }

    #[tokio::test(start_paused = true)]
    async fn rescan_restarts_from_zero() {
        let mut app = ConsoleApp::new(fast_config());
        app.start_diagnostic(DiagnosticCategory::System);
        for _ in 0..4 {
            let update = app.next_flow_update().await;
            app.handle_flow_update(update);
        }
        assert!(app.session().is_some_and(|s| s.progress() > 0.0));

        type_command(&mut app, "scan");
        let session = app.session().expect("new flow");
        assert_eq!(session.category(), DiagnosticCategory::System);
        assert_eq!(session.state(), FlowState::Running);
        assert_eq!(session.progress(), 0.0);
    }
}
