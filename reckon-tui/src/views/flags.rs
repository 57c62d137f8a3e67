//! Feature flag view.

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
        .flag_view
        .flags
        .iter()
        .map(|flag| {
            let (marker, color) = if flag.enabled {
                ("[on] ", app.theme.success)
            } else {
                ("[off]", app.theme.text_dim)
            };
            let mut spans = vec![
                Span::styled(format!("{} ", marker), Style::default().fg(color)),
                Span::raw(flag.label.clone()),
                Span::styled(
                    format!("  ({})", flag.key),
                    Style::default().fg(app.theme.text_dim),
                ),
            ];
            if let Some(description) = &flag.description {
                spans.push(Span::styled(
                    format!(" - {}", description),
                    Style::default().fg(app.theme.text_dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = app.flag_view.selected {
        if let Some(index) = app.flag_view.flags.iter().position(|f| f.id == selected) {
            state.select(Some(index));
        }
    }

    let list = List::new(items)
        .block(Block::default().title("Feature Flags").borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary));
    f.render_stateful_widget(list, area, &mut state);
}
