//! Background ticket polling.
//!
//! Re-fetches the full ticket collection on a fixed interval and feeds it
//! into the event loop, where the state layer reconciles it against whatever
//! ticket is currently open. Transient failures are logged and swallowed so
//! a flaky network never disturbs an open ticket; session expiry is the one
//! exception, forwarded so the application can fail closed instead of
//! polling forever with a dead token.

use crate::api_client::{ApiClientError, RestClient};
use crate::events::TuiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle to the polling task. Dropping it stops the poll; there is no
/// orphaned timer to fire after teardown.
pub struct TicketPoller {
    handle: JoinHandle<()>,
}

impl TicketPoller {
    pub fn spawn(rest: RestClient, period: Duration, sender: mpsc::Sender<TuiEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The immediate first tick would duplicate the foreground
            // initial fetch.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match rest.list_tickets().await {
                    Ok(tickets) => {
                        debug!(count = tickets.len(), "ticket poll completed");
                        if sender
                            .send(TuiEvent::TicketsRefreshed(tickets))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Err(ApiClientError::SessionExpired(reason)) => {
                        warn!(%reason, "ticket poll lost the session");
                        let _ = sender.send(TuiEvent::SessionExpired).await;
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "ticket poll failed");
                    }
                }
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for TicketPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
