//! View rendering dispatch.

pub mod billing;
pub mod dashboard;
pub mod flags;
pub mod login;
pub mod payment;
pub mod tickets;

use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::Login => login::render(f, app, layout[1]),
        View::Dashboard => dashboard::render(f, app, layout[1]),
        View::Tickets => tickets::render(f, app, layout[1]),
        View::Billing => billing::render(f, app, layout[1]),
        View::FeatureFlags => flags::render(f, app, layout[1]),
        View::PaymentMethods => payment::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let operator = match &app.user {
        Some(user) => format!(
            "{} ({})",
            user.name,
            user.company_name.as_deref().unwrap_or("all companies")
        ),
        None => "not signed in".to_string(),
    };
    let title = format!("RECKON | {} | {}", app.active_view.title(), operator);
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let help = match app.active_view {
        View::Login => "Tab next field • Enter sign in • q quit",
        View::Tickets => {
            if app.ticket_view.composing {
                "type your reply • Enter send • Esc cancel"
            } else {
                "j/k move • Enter open • r reply • s advance status • Tab switch view • q quit"
            }
        }
        View::FeatureFlags => "j/k move • Space toggle • Tab switch view • q quit",
        View::PaymentMethods => "j/k move • Space make default • Tab switch view • q quit",
        View::Billing => "j/k move • Enter change plan • Tab switch view • q quit",
        View::Dashboard => "Tab switch view • t theme • o sign out • q quit",
    };
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        };
        let color = match note.level {
            NotificationLevel::Info => app.theme.info,
            NotificationLevel::Warning => app.theme.warning,
            NotificationLevel::Error => app.theme.error,
            NotificationLevel::Success => app.theme.success,
        };
        (
            format!("{}: {}", label, note.message),
            Style::default().fg(color),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
