//! Theme palettes and color utilities.

use ratatui::style::Color;
use reckon_core::{SubscriptionStatus, TicketPriority, TicketStatus};
use serde::{Deserialize, Serialize};

/// Persisted theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    Dark,
    Light,
}

impl ThemeName {
    pub fn toggled(self) -> ThemeName {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(16, 18, 24),
            bg_highlight: Color::Rgb(38, 42, 54),
            primary: Color::Rgb(94, 174, 255),
            secondary: Color::Rgb(186, 134, 255),
            success: Color::Rgb(92, 200, 122),
            warning: Color::Rgb(235, 185, 80),
            error: Color::Rgb(235, 90, 90),
            info: Color::Rgb(94, 174, 255),
            text: Color::Rgb(224, 228, 235),
            text_dim: Color::Rgb(130, 138, 150),
            border: Color::Rgb(66, 72, 86),
            border_focus: Color::Rgb(94, 174, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(248, 248, 246),
            bg_highlight: Color::Rgb(226, 230, 238),
            primary: Color::Rgb(22, 84, 176),
            secondary: Color::Rgb(110, 56, 188),
            success: Color::Rgb(26, 128, 62),
            warning: Color::Rgb(158, 112, 12),
            error: Color::Rgb(178, 38, 38),
            info: Color::Rgb(22, 84, 176),
            text: Color::Rgb(28, 30, 36),
            text_dim: Color::Rgb(110, 116, 128),
            border: Color::Rgb(180, 186, 198),
            border_focus: Color::Rgb(22, 84, 176),
        }
    }
}

pub fn ticket_status_color(status: TicketStatus, theme: &Theme) -> Color {
    match status {
        TicketStatus::Open => theme.warning,
        TicketStatus::InProgress => theme.primary,
        TicketStatus::Resolved => theme.success,
    }
}

pub fn ticket_priority_color(priority: TicketPriority, theme: &Theme) -> Color {
    match priority {
        TicketPriority::Low => theme.text_dim,
        TicketPriority::Medium => theme.text,
        TicketPriority::High => theme.error,
    }
}

pub fn subscription_status_color(status: SubscriptionStatus, theme: &Theme) -> Color {
    match status {
        SubscriptionStatus::Trialing => theme.info,
        SubscriptionStatus::Active => theme.success,
        SubscriptionStatus::PastDue => theme.warning,
        SubscriptionStatus::Canceled => theme.error,
    }
}
