mod commands;
mod dashboard;
mod fix;
mod header;
mod help;
mod message_panel;
mod progress;
mod results;
mod status_bar;

pub use commands::draw_commands_popup;
pub use dashboard::draw_dashboard;
pub use fix::draw_fix;
pub use header::draw_header;
pub use help::draw_help;
pub use message_panel::draw_message_panel;
pub use progress::draw_progress;
pub use results::draw_results;
pub use status_bar::draw_status_bar;

use crate::ui::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

pub fn draw_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default().style(theme.style());
    frame.render_widget(block, area);
}

/// Bordered panel with a bold title, the card style every view uses
fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(format!(" {title} "))
        .title_style(theme.title_style())
}
