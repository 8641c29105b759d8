use super::panel;
use crate::app::{ConsoleApp, HEALTH_CARDS, HealthCard};
use crate::diagnostics::Section;
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

pub fn draw_dashboard(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Health heading
            Constraint::Length(6), // Health cards
            Constraint::Length(1), // Diagnostics heading
            Constraint::Min(6),    // Scenario grid
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(" SYSTEM HEALTH OVERVIEW").style(app.theme.title_style()),
        chunks[0],
    );
    draw_health_cards(frame, chunks[1], app);

    frame.render_widget(
        Paragraph::new(" SMART DIAGNOSTICS").style(app.theme.title_style()),
        chunks[2],
    );
    draw_scenario_grid(frame, chunks[3], app);
}

fn draw_health_cards(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (card, column) in HEALTH_CARDS.iter().zip(columns.iter()) {
        draw_health_card(frame, *column, card, app);
    }
}

fn draw_health_card(frame: &mut Frame, area: Rect, card: &HealthCard, app: &ConsoleApp) {
    let block = panel(card.title, &app.theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 4 {
        return;
    }

    let color = app.theme.health_color(card.percentage);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .percent(card.percentage)
        .label(format!("{}%", card.percentage));
    frame.render_widget(gauge, Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), 1));

    frame.render_widget(
        Paragraph::new(card.status)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );

    for (offset, detail) in card.details.iter().enumerate() {
        frame.render_widget(
            Paragraph::new(*detail)
                .style(app.theme.muted_style())
                .alignment(Alignment::Center),
            Rect::new(inner.x, inner.y + 2 + offset as u16, inner.width, 1),
        );
    }
}

fn draw_scenario_grid(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (section_idx, (section, column)) in Section::ALL.iter().zip(columns.iter()).enumerate() {
        let is_active = section_idx == app.selection.section;
        let block = panel(section.heading(), &app.theme).border_style(if is_active {
            app.theme.primary_style()
        } else {
            app.theme.border_style()
        });
        let inner = block.inner(*column);
        frame.render_widget(block, *column);

        for (row, scenario) in section.scenarios().iter().enumerate() {
            let y = inner.y + row as u16 * 2;
            if y >= inner.y + inner.height {
                break;
            }

            let selected = is_active && row == app.selection.row;
            let (cursor, style) = if selected {
                (">", app.theme.primary_style().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            } else {
                (" ", app.theme.style())
            };

            frame.render_widget(
                Paragraph::new(format!("{cursor} {}", scenario.label())).style(style),
                Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
            );
        }
    }
}
