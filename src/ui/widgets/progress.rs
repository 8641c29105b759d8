use super::panel;
use crate::app::ConsoleApp;
use crate::diagnostics::{FlowSession, FlowState, StepSequencer, StepStatus};
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

/// Marker drawn before a step name
pub(super) fn step_marker(status: StepStatus, spinner: char) -> char {
    match status {
        StepStatus::Pending => ' ',
        StepStatus::Running => spinner,
        StepStatus::Complete => 'x',
    }
}

pub fn draw_progress(frame: &mut Frame, area: Rect, app: &ConsoleApp, session: &FlowSession) {
    let scan_height = session.steps().len() as u16 + 8;
    let show_live = session.category().has_live_metrics();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(scan_height),
            Constraint::Length(if show_live { 6 } else { 0 }),
            Constraint::Min(0),
        ])
        .split(area);

    draw_scan_panel(frame, chunks[0], app, session);
    if show_live {
        draw_live_data(frame, chunks[1], app, session);
    }
}

fn draw_scan_panel(frame: &mut Frame, area: Rect, app: &ConsoleApp, session: &FlowSession) {
    let title = match session.state() {
        FlowState::Analyzing => "AI ANALYSIS IN PROGRESS",
        _ => "ANALYZING RF ENVIRONMENT",
    };
    let block = panel(title, &app.theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 4 {
        return;
    }

    let mut y = inner.y + 1;
    frame.render_widget(
        Paragraph::new("Running Advanced Diagnostics...").style(app.theme.secondary_style()),
        Rect::new(inner.x + 2, y, inner.width.saturating_sub(4), 1),
    );
    y += 2;

    y = draw_step_list(frame, inner, y, session.steps(), app);
    y += 1;

    let info = if session.state() == FlowState::Running {
        format!(
            "Progress: {}% | {} seconds remaining",
            session.progress().round(),
            session.seconds_remaining()
        )
    } else {
        format!("Progress: {}% | Analyzing results...", session.progress().round())
    };
    draw_gauge(frame, inner, y, session.progress(), info, app);
}

/// Render one line per step, returning the row after the list
pub(super) fn draw_step_list(
    frame: &mut Frame,
    inner: Rect,
    mut y: u16,
    steps: &StepSequencer,
    app: &ConsoleApp,
) -> u16 {
    let bottom = inner.y + inner.height;
    let width = inner.width.saturating_sub(4);

    for step in steps.steps() {
        if y >= bottom {
            break;
        }
        let marker = step_marker(step.status, app.spinner_char());
        let style = app.theme.step_style(step.status);
        let row = Rect::new(inner.x + 2, y, width, 1);

        frame.render_widget(Paragraph::new(format!("[{marker}] {}", step.name)).style(style), row);
        frame.render_widget(
            Paragraph::new(step.status.label())
                .style(style)
                .alignment(Alignment::Right),
            row,
        );
        y += 1;
    }
    y
}

/// Gauge on row `y` with an info line beneath it
pub(super) fn draw_gauge(
    frame: &mut Frame,
    inner: Rect,
    y: u16,
    progress: f64,
    info: String,
    app: &ConsoleApp,
) {
    let bottom = inner.y + inner.height;
    let width = inner.width.saturating_sub(4);
    if y >= bottom {
        return;
    }

    let gauge = Gauge::default()
        .gauge_style(app.theme.primary_style())
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", progress.round()));
    frame.render_widget(gauge, Rect::new(inner.x + 2, y, width, 1));

    if y + 1 < bottom {
        frame.render_widget(
            Paragraph::new(info).style(app.theme.muted_style()),
            Rect::new(inner.x + 2, y + 1, width, 1),
        );
    }
}

fn draw_live_data(frame: &mut Frame, area: Rect, app: &ConsoleApp, session: &FlowSession) {
    let m = session.metrics();
    let lines = vec![
        Line::from(format!(
            "RSSI: {} dBm -> {} dBm -> {} dBm (Fluctuating)",
            m.rssi,
            m.rssi - 2,
            m.rssi
        )),
        Line::from(format!("Noise: {} dBm (Baseline)", m.noise)),
        Line::from(vec![
            Span::raw(format!(
                "TX Retries: {}% -> {}% -> {}% ",
                m.retries,
                m.retries + 3,
                m.retries + 7
            )),
            Span::styled("(Increasing)", app.theme.warning_style()),
        ]),
        Line::from(format!("Channel {}: 45% utilization", m.channel)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .style(app.theme.style())
            .block(panel("REAL-TIME DATA STREAM", &app.theme)),
        area,
    );
}
