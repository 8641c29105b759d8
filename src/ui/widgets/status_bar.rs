use crate::app::ConsoleApp;
use crate::vim::VimMode;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let mode_name = app.vim_mode.display_name();
    let mode_style = app.theme.mode_style(mode_name);
    let hints = app.status_hints();

    let mut left_spans = vec![
        Span::raw(" "),
        Span::styled(format!(" {} ", mode_name), mode_style),
        Span::raw(" "),
    ];

    // Show command buffer in command mode
    if app.vim_mode == VimMode::Command {
        left_spans.push(Span::styled(":", app.theme.primary_style()));
        left_spans.push(Span::raw(app.command_buffer.content()));
        left_spans.push(Span::styled("│", app.theme.primary_style()));
    } else if let Some(session) = app.session() {
        left_spans.push(Span::styled(
            format!("{} ", session.state().display_name()),
            app.theme.secondary_style(),
        ));
    }
    left_spans.push(Span::styled(hints.left_hint.as_str(), app.theme.muted_style()));

    frame.render_widget(
        Paragraph::new(Line::from(left_spans)).style(app.theme.style()),
        area,
    );

    let right = Line::from(vec![
        Span::styled(hints.right_hint.as_str(), app.theme.muted_style()),
        Span::raw(" "),
    ]);
    let right_width = right.width() as u16;
    if area.height > 0 && area.width > right_width {
        let right_area = Rect {
            x: area.x + area.width - right_width,
            y: area.y,
            width: right_width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), right_area);
    }
}
