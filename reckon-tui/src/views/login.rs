//! Sign-in view.

use crate::state::{App, LoginField};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let centered = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(area)[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(centered);

    let field_style = |field: LoginField| {
        if app.login_view.focus == field {
            Style::default().fg(app.theme.border_focus)
        } else {
            Style::default().fg(app.theme.border)
        }
    };

    let email = Paragraph::new(app.login_view.email.clone()).block(
        Block::default()
            .title("Email")
            .borders(Borders::ALL)
            .border_style(field_style(LoginField::Email)),
    );
    f.render_widget(email, rows[1]);

    let masked = "*".repeat(app.login_view.password.chars().count());
    let password = Paragraph::new(masked).block(
        Block::default()
            .title("Password")
            .borders(Borders::ALL)
            .border_style(field_style(LoginField::Password)),
    );
    f.render_widget(password, rows[2]);

    let status = if app.login_view.submitting {
        Paragraph::new("Signing in...").style(Style::default().fg(app.theme.text_dim))
    } else if let Some(error) = &app.login_view.error {
        Paragraph::new(error.clone()).style(Style::default().fg(app.theme.error))
    } else {
        Paragraph::new("").style(Style::default())
    };
    f.render_widget(status, rows[3]);
}
