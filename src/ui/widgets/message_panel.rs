use crate::app::ConsoleApp;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn draw_message_panel(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let Some(message) = &app.message else {
        return;
    };

    let (title, border_style, text_style) = if message.is_error {
        (" Error ", app.theme.error_style(), app.theme.error_style())
    } else {
        (" Info ", app.theme.secondary_style(), app.theme.style())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(border_style.add_modifier(Modifier::BOLD));

    let content = Line::from(vec![
        Span::styled(message.text.as_str(), text_style),
        Span::styled(" (press any key to dismiss)", app.theme.muted_style()),
    ]);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
