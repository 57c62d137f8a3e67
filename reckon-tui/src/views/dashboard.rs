//! Role-scoped dashboard view.

use crate::state::App;
use crate::widgets::format_money;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(summary) = &app.dashboard_view.summary else {
        let placeholder = if app.dashboard_view.loading {
            "Loading dashboard..."
        } else {
            "No dashboard data."
        };
        let widget = Paragraph::new(placeholder)
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
        return;
    };

    let mut tiles: Vec<(&str, String)> = vec![
        ("Open Tickets", summary.open_tickets.to_string()),
        (
            "Active Subscriptions",
            summary.active_subscriptions.to_string(),
        ),
        (
            "Monthly Revenue",
            format_money(summary.monthly_revenue_cents, &summary.currency),
        ),
    ];
    // Fleet numbers only come back for super admins.
    if let Some(total) = summary.total_companies {
        tiles.push(("Companies", total.to_string()));
    }
    if let Some(signups) = summary.new_signups_30d {
        tiles.push(("Signups (30d)", signups.to_string()));
    }

    let constraints: Vec<Constraint> = tiles
        .iter()
        .map(|_| Constraint::Ratio(1, tiles.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (column, (label, value)) in columns.iter().zip(tiles) {
        let tile = Paragraph::new(vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(app.theme.primary),
            )),
            Line::from(Span::styled(
                label,
                Style::default().fg(app.theme.text_dim),
            )),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(tile, *column);
    }
}
