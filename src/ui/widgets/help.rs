use crate::diagnostics::DiagnosticCategory;
use crate::ui::{Layout, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let categories = DiagnosticCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let help_text = vec![
        Line::from(Span::styled("Dashboard", bold)),
        Line::from("  h/j/k/l  Select a scenario"),
        Line::from("  Enter    Run the selected scenario"),
        Line::from("  c        Show the scenario's commands"),
        Line::from("  q        Quit"),
        Line::from(""),
        Line::from(Span::styled("Diagnostic flow", bold)),
        Line::from("  f        Apply the recommended fix"),
        Line::from("  Esc/q    Return home"),
        Line::from(""),
        Line::from(Span::styled("Commands", bold)),
        Line::from(format!("  :scan <category>  {categories}")),
        Line::from("  :scan             Run selected scenario again"),
        Line::from("  :fix              Apply the fix"),
        Line::from("  :home             Return to the dashboard"),
        Line::from("  :commands         Toggle the command list"),
        Line::from("  :q                Quit"),
        Line::from(""),
        Line::from(Span::styled("Press Escape to close", theme.muted_style())),
    ];

    let height = help_text.len() as u16 + 2;
    let width = 58u16.min(area.width.saturating_sub(4));
    let help_area = Layout::centered_box(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Help ")
        .title_style(theme.title_style());

    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
