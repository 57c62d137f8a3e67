//! Support ticket inbox: list pane plus detail pane with the message thread
//! and reply draft.

use crate::state::App;
use crate::theme::{ticket_priority_color, ticket_status_color};
use crate::widgets::DetailPanel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_list(f, app, chunks[0]);
    render_detail(f, app, chunks[1]);
}

fn render_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .ticket_view
        .tickets
        .iter()
        .map(|ticket| {
            let status = Span::styled(
                format!("[{}] ", ticket.status),
                Style::default().fg(ticket_status_color(ticket.status, &app.theme)),
            );
            let subject = Span::styled(
                ticket.subject.clone(),
                Style::default().fg(ticket_priority_color(ticket.priority, &app.theme)),
            );
            let company = Span::styled(
                format!("  {}", ticket.company_name),
                Style::default().fg(app.theme.text_dim),
            );
            ListItem::new(Line::from(vec![status, subject, company]))
        })
        .collect();

    let mut state = ListState::default();
    if let Some(selected) = app.ticket_view.selected {
        if let Some(index) = app
            .ticket_view
            .tickets
            .iter()
            .position(|t| t.id == selected)
        {
            state.select(Some(index));
        }
    }

    let title = if app.ticket_view.loading {
        "Tickets (loading...)"
    } else {
        "Tickets"
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(ticket) = &app.ticket_view.open else {
        let hint = Paragraph::new("Select a ticket and press Enter to open it.")
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let detail = DetailPanel {
        title: "Ticket",
        fields: vec![
            ("Subject", ticket.subject.clone()),
            ("Company", ticket.company_name.clone()),
            ("Requester", ticket.user_details.name.clone()),
            ("Status", ticket.status.to_string()),
            ("Priority", ticket.priority.to_string()),
            ("Opened", ticket.created_at.to_rfc3339()),
        ],
        style: Style::default().fg(app.theme.secondary),
    };
    detail.render(f, rows[0]);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::raw(ticket.description.clone())));
    for message in &ticket.messages {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} · {}",
                message.sender_name,
                message.created_at.to_rfc3339()
            ),
            Style::default().fg(app.theme.text_dim),
        )));
        lines.push(Line::from(Span::raw(message.message.clone())));
    }

    let thread_area = rows[1];
    let visible = thread_area.height.saturating_sub(2);
    // Follow the latest message whenever the thread grows.
    let scroll = if app.ticket_view.scroll_to_latest {
        (lines.len() as u16).saturating_sub(visible)
    } else {
        0
    };
    let thread = Paragraph::new(lines)
        .block(Block::default().title("Conversation").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(thread, thread_area);

    let (draft_title, draft_style) = if app.ticket_view.composing {
        ("Reply (Enter to send)", Style::default().fg(app.theme.border_focus))
    } else {
        ("Reply (press r)", Style::default().fg(app.theme.border))
    };
    let draft = Paragraph::new(app.ticket_view.draft.clone()).block(
        Block::default()
            .title(draft_title)
            .borders(Borders::ALL)
            .border_style(draft_style),
    );
    f.render_widget(draft, rows[2]);
}
