//! Payment method selection view.

use crate::state::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .payment_view
        .methods
        .iter()
        .map(|method| {
            let marker = if method.is_default { "* " } else { "  " };
            let mut label = format!("{}{} ({})", marker, method.label, method.provider);
            if let Some(last4) = &method.last4 {
                label.push_str(&format!(" ****{}", last4));
            }
            let style = if method.is_default {
                Style::default().fg(app.theme.success)
            } else {
                Style::default().fg(app.theme.text)
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = app.payment_view.selected {
        if let Some(index) = app
            .payment_view
            .methods
            .iter()
            .position(|m| m.id == selected)
        {
            state.select(Some(index));
        }
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title("Payment Methods")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().fg(app.theme.primary));
    f.render_stateful_widget(list, area, &mut state);
}
