//! Billing view: available plans and the company subscription.

use crate::state::App;
use crate::theme::subscription_status_color;
use crate::widgets::{format_money, DetailPanel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let items: Vec<ListItem> = app
        .billing_view
        .plans
        .iter()
        .map(|plan| {
            let current = app
                .billing_view
                .subscription
                .as_ref()
                .is_some_and(|sub| sub.plan.id == plan.id);
            let marker = if current { "* " } else { "  " };
            let label = format!(
                "{}{} - {} / {}",
                marker,
                plan.name,
                format_money(plan.price_cents, &plan.currency),
                plan.interval
            );
            let style = if plan.active {
                Style::default().fg(app.theme.text)
            } else {
                Style::default().fg(app.theme.text_dim)
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = app.billing_view.selected {
        if let Some(index) = app.billing_view.plans.iter().position(|p| p.id == selected) {
            state.select(Some(index));
        }
    }

    let list = List::new(items)
        .block(Block::default().title("Plans").borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let mut fields = Vec::new();
    if let Some(subscription) = &app.billing_view.subscription {
        fields.push(("Plan", subscription.plan.name.clone()));
        fields.push(("Status", subscription.status.to_string()));
        fields.push((
            "Renews",
            subscription.current_period_end.to_rfc3339(),
        ));
        if subscription.cancel_at_period_end {
            fields.push(("Note", "cancels at period end".to_string()));
        }
    }
    let style = match &app.billing_view.subscription {
        Some(subscription) => {
            Style::default().fg(subscription_status_color(subscription.status, &app.theme))
        }
        None => Style::default().fg(app.theme.text_dim),
    };
    let detail = DetailPanel {
        title: "Subscription",
        fields,
        style,
    };
    detail.render(f, chunks[1]);
}
