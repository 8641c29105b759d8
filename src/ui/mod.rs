mod layout;
mod theme;
pub mod widgets;

pub use layout::Layout;
pub use theme::Theme;

use crate::app::{ConsoleApp, View};
use crate::diagnostics::FlowState;
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &ConsoleApp) {
    let layout = Layout::new(frame.area());

    widgets::draw_background(frame, layout.full, &app.theme);
    widgets::draw_header(frame, layout.header, app);

    match &app.view {
        View::Dashboard => widgets::draw_dashboard(frame, layout.content, app),
        View::Flow(session) => match session.state() {
            FlowState::Running | FlowState::Analyzing => {
                widgets::draw_progress(frame, layout.content, app, session)
            }
            FlowState::Complete => widgets::draw_results(frame, layout.content, app, session),
            FlowState::ApplyingFix => widgets::draw_fix(frame, layout.content, app, session),
        },
    }

    widgets::draw_message_panel(frame, layout.message, app);
    widgets::draw_status_bar(frame, layout.status, app);

    // Popups render on top of everything
    if app.show_commands && matches!(app.view, View::Dashboard) {
        widgets::draw_commands_popup(frame, layout.content, app);
    }

    if app.show_help {
        widgets::draw_help(frame, layout.content, &app.theme);
    }
}
