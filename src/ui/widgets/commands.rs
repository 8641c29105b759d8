use crate::app::ConsoleApp;
use crate::diagnostics::catalog::split_program;
use crate::ui::Layout;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Popup listing the commands behind the selected dashboard button
pub fn draw_commands_popup(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let scenario = app.selection.scenario();

    let mut lines = vec![
        Line::from(Span::styled("Commands executed:", app.theme.muted_style())),
        Line::from(""),
    ];
    for command in scenario.commands() {
        let (program, rest) = split_program(command);
        lines.push(Line::from(vec![
            Span::styled("$ ", app.theme.success_style()),
            Span::styled(program, app.theme.title_style()),
            Span::styled(rest, app.theme.style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Runs the {} diagnostic", scenario.category()),
        app.theme.muted_style(),
    )));

    let width = lines
        .iter()
        .map(|l| l.width() as u16)
        .max()
        .unwrap_or(40)
        .saturating_add(4)
        .min(area.width.saturating_sub(2));
    let height = lines.len() as u16 + 2;
    let popup = Layout::centered_box(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.primary_style())
        .title(format!(" {} ", scenario.title()))
        .title_style(app.theme.title_style());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
