//! Event types for the console event loop.

use crossterm::event::KeyEvent;
use reckon_api::types::TicketResponse;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    /// Fresh ticket collection from the background poller.
    TicketsRefreshed(Vec<TicketResponse>),
    /// The session could not be refreshed; fail closed to the login view.
    SessionExpired,
    ApiError(String),
}
