use crate::app::ConsoleApp;
use crate::diagnostics::FlowState;
use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn draw_header(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let time = Local::now().format("%H:%M").to_string();
    let title = &app.config.general.title;

    // Breadcrumb after the product name while a flow is open
    let crumb = app.session().map(|session| match session.state() {
        FlowState::Running | FlowState::Analyzing => session.title().to_string(),
        FlowState::Complete => format!("{} Results", session.title()),
        FlowState::ApplyingFix => "Applying Channel Switch Fix".to_string(),
    });

    let mut left = vec![
        Span::raw(" "),
        Span::styled(title.as_str(), app.theme.title_style()),
        Span::styled(" Assistant", app.theme.style().add_modifier(Modifier::BOLD)),
    ];
    if let Some(ref crumb) = crumb {
        left.push(Span::styled(" > ", app.theme.muted_style()));
        left.push(Span::styled(crumb.as_str(), app.theme.secondary_style()));
    }

    let line_area = Rect {
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(Paragraph::new(Line::from(left)), line_area);

    let right = Paragraph::new(Line::from(vec![
        Span::styled("● ", app.theme.success_style()),
        Span::styled(
            format!("Online • {}", app.config.general.device_address),
            app.theme.muted_style(),
        ),
        Span::raw("  "),
        Span::styled(&time, app.theme.title_style()),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(right, line_area);

    if area.height > 1 && crumb.is_none() {
        let subtitle = Paragraph::new(" Advanced RF Diagnostics & Network Intelligence")
            .style(app.theme.muted_style());
        frame.render_widget(subtitle, Rect::new(area.x, area.y + 1, area.width, 1));
    }
}
