//! Keybinding definitions for the console.
//!
//! Text entry (login form, reply draft) is handled before this map in the
//! event loop; these bindings apply to browse mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    Confirm,
    Cancel,
    /// Start composing a reply to the open ticket.
    Compose,
    /// Advance the open ticket to its next status.
    AdvanceStatus,
    /// Flip the selected feature flag / select the payment method.
    Toggle,
    ToggleTheme,
    Refresh,
    SignOut,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Compose),
        KeyCode::Char('s') => Some(Action::AdvanceStatus),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('o') => Some(Action::SignOut),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = (c as usize).checked_sub('1' as usize)?;
            Some(Action::SwitchView(idx))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn quit_bindings() {
        assert_eq!(
            map_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn digits_map_to_view_indices() {
        assert_eq!(
            map_key(key(KeyCode::Char('1'), KeyModifiers::NONE)),
            Some(Action::SwitchView(0))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('5'), KeyModifiers::NONE)),
            Some(Action::SwitchView(4))
        );
        // '0' has no view slot
        assert_eq!(map_key(key(KeyCode::Char('0'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn vim_and_arrow_movement_agree() {
        assert_eq!(
            map_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            map_key(key(KeyCode::Down, KeyModifiers::NONE))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('k'), KeyModifiers::NONE)),
            map_key(key(KeyCode::Up, KeyModifiers::NONE))
        );
    }

    #[test]
    fn unbound_keys_map_to_nothing() {
        assert_eq!(map_key(key(KeyCode::F(5), KeyModifiers::NONE)), None);
        assert_eq!(
            map_key(key(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            None
        );
    }
}
