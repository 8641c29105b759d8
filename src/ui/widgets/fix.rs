use super::panel;
use super::progress::{draw_gauge, draw_step_list};
use crate::app::ConsoleApp;
use crate::diagnostics::FlowSession;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn draw_fix(frame: &mut Frame, area: Rect, app: &ConsoleApp, session: &FlowSession) {
    let fix_steps = session.fix_steps();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(fix_steps.len() as u16 + 9),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

    let block = panel("EXECUTING AUTOMATED FIX", &app.theme);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    if inner.height < 4 {
        return;
    }

    let mut y = inner.y + 1;
    frame.render_widget(
        Paragraph::new("Switching to Channel 36 (5.18 GHz)").style(app.theme.secondary_style()),
        Rect::new(inner.x + 2, y, inner.width.saturating_sub(4), 1),
    );
    y += 2;

    y = draw_step_list(frame, inner, y, fix_steps, app);
    y += 1;

    let current = fix_steps
        .current()
        .map(|step| step.name)
        .unwrap_or("Finishing...");
    let info = format!(
        "Progress: {}% | Current Step: {current}",
        session.progress().round()
    );
    draw_gauge(frame, inner, y, session.progress(), info, app);

    if y + 2 < inner.y + inner.height {
        frame.render_widget(
            Paragraph::new("WARNING: Connection will drop briefly").style(app.theme.warning_style()),
            Rect::new(inner.x + 2, y + 2, inner.width.saturating_sub(4), 1),
        );
    }

    let monitoring = vec![
        Line::from("Connection Status: Reconnecting..."),
        Line::from("New Channel: 36 (5.18 GHz)"),
        Line::from("Downtime: 3.2 seconds"),
        Line::from(format!(
            "ETA: {} seconds remaining",
            session.fix_seconds_remaining()
        )),
    ];
    frame.render_widget(
        Paragraph::new(monitoring)
            .style(app.theme.style())
            .block(panel("LIVE MONITORING", &app.theme)),
        chunks[1],
    );
}
