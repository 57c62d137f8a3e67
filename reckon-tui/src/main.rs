//! Reckon console entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use reckon_api::types::{
    ChangePlanRequest, LoginRequest, ReplyTicketRequest, SelectPaymentMethodRequest,
    UpdateFeatureFlagRequest, UpdateTicketStatusRequest,
};
use reckon_core::TicketStatus;
use reckon_tui::api_client::{ApiClient, ApiClientError};
use reckon_tui::config::TuiConfig;
use reckon_tui::error::TuiError;
use reckon_tui::events::TuiEvent;
use reckon_tui::keys::{map_key, Action};
use reckon_tui::nav::View;
use reckon_tui::notifications::NotificationLevel;
use reckon_tui::persistence::{self, PersistedState};
use reckon_tui::poll::TicketPoller;
use reckon_tui::session::SessionStore;
use reckon_tui::state::App;
use reckon_tui::views::render_view;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    reckon_tui::logging::init(&config)?;

    let session = SessionStore::open(&config.session_path);
    let api = ApiClient::new(&config, session.clone())?;
    let mut app = App::new(config, api, session);

    if let Ok(Some(state)) = persistence::load(&app.config.state_path) {
        app.set_theme(state.theme);
        app.active_view = state.active_view;
    }

    // A persisted token may still be valid; ask the backend who we are.
    if app.session.token().is_some() {
        match app.api.auth().me().await {
            Ok(user) => {
                app.user = Some(user);
                if app.active_view == View::Login {
                    app.active_view = View::Dashboard;
                }
                load_initial(&mut app).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "persisted session rejected");
                app.session.clear();
                app.active_view = View::Login;
            }
        }
    } else {
        app.active_view = View::Login;
    }
    if app.user.is_none() {
        app.active_view = View::Login;
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let mut poller: Option<TicketPoller> = None;
    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        // The poller lives exactly as long as a signed-in session.
        if app.user.is_some() && poller.is_none() {
            poller = Some(TicketPoller::spawn(
                app.api.rest().clone(),
                Duration::from_millis(app.config.poll_interval_ms),
                event_tx.clone(),
            ));
        } else if app.user.is_none() && poller.is_some() {
            poller = None;
        }

        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                let _ = event_tx.send(TuiEvent::Tick).await;
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event).await? {
                    break;
                }
            }
        }
    }

    let persisted = PersistedState {
        active_view: app.active_view,
        theme: app.theme_name,
    };
    let _ = persistence::save(&app.config.state_path, &persisted);

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

async fn handle_event(app: &mut App, event: TuiEvent) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => return handle_input(app, key).await,
        TuiEvent::TicketsRefreshed(tickets) => {
            app.ticket_view.replace_collection(tickets);
        }
        TuiEvent::SessionExpired => {
            app.hard_logout();
        }
        TuiEvent::ApiError(message) => {
            app.notify(NotificationLevel::Error, message);
        }
        TuiEvent::Resize { .. } | TuiEvent::Tick => {}
    }
    Ok(false)
}

async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool, TuiError> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }
    if app.active_view == View::Login {
        handle_login_input(app, key).await;
        return Ok(false);
    }
    if app.active_view == View::Tickets && app.ticket_view.composing {
        handle_compose_input(app, key).await;
        return Ok(false);
    }
    if let Some(action) = map_key(key) {
        return handle_action(app, action).await;
    }
    Ok(false)
}

async fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.login_view.focused_field_mut().push(c),
        KeyCode::Backspace => {
            app.login_view.focused_field_mut().pop();
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            app.login_view.next_field();
        }
        KeyCode::Enter => submit_login(app).await,
        _ => {}
    }
}

async fn submit_login(app: &mut App) {
    if app.login_view.email.trim().is_empty() || app.login_view.password.is_empty() {
        app.login_view.error = Some("Email and password are required.".to_string());
        return;
    }
    app.login_view.submitting = true;
    app.login_view.error = None;
    let request = LoginRequest {
        email: app.login_view.email.trim().to_string(),
        password: app.login_view.password.clone(),
    };
    match app.api.auth().login(&request).await {
        Ok(response) => {
            app.user = Some(response.user);
            app.login_view = Default::default();
            app.active_view = View::Dashboard;
            load_initial(app).await;
        }
        Err(err) => {
            app.login_view.submitting = false;
            app.login_view.error = Some(err.to_string());
            app.login_view.password.clear();
        }
    }
}

async fn handle_compose_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.ticket_view.draft.push(c),
        KeyCode::Backspace => {
            app.ticket_view.draft.pop();
        }
        KeyCode::Enter => submit_reply(app).await,
        KeyCode::Esc => app.ticket_view.composing = false,
        _ => {}
    }
}

async fn submit_reply(app: &mut App) {
    let Some(ticket_id) = app.ticket_view.open.as_ref().map(|open| open.id) else {
        app.ticket_view.composing = false;
        return;
    };
    let draft = app.ticket_view.draft.trim().to_string();
    if draft.is_empty() {
        return;
    }
    let request = ReplyTicketRequest { message: draft };
    match app.api.rest().reply_ticket(ticket_id, &request).await {
        Ok(message) => {
            app.ticket_view.append_reply(message);
        }
        // The draft survives a failed send so the operator can retry.
        Err(err) => report_api_error(app, err),
    }
}

async fn handle_action(app: &mut App, action: Action) -> Result<bool, TuiError> {
    let Some(role) = app.role() else {
        return Ok(false);
    };
    match action {
        Action::Quit => return Ok(true),
        Action::NextView => {
            app.active_view = app.active_view.next(role);
            refresh_active_view(app).await;
        }
        Action::PrevView => {
            app.active_view = app.active_view.previous(role);
            refresh_active_view(app).await;
        }
        Action::SwitchView(index) => {
            if let Some(view) = View::from_index(role, index) {
                app.active_view = view;
                refresh_active_view(app).await;
            }
        }
        Action::MoveDown => app.select_next(),
        Action::MoveUp => app.select_previous(),
        Action::Confirm => handle_confirm(app).await,
        Action::Cancel => {
            if app.active_view == View::Tickets {
                app.ticket_view.close_ticket();
            }
        }
        Action::Compose => {
            if app.active_view == View::Tickets && app.ticket_view.open.is_some() {
                app.ticket_view.composing = true;
            }
        }
        Action::AdvanceStatus => advance_ticket_status(app).await,
        Action::Toggle => handle_toggle(app).await,
        Action::ToggleTheme => app.set_theme(app.theme_name.toggled()),
        Action::Refresh => refresh_active_view(app).await,
        Action::SignOut => {
            if let Err(err) = app.api.auth().logout().await {
                tracing::warn!(error = %err, "server-side logout failed");
            }
            app.hard_logout();
        }
    }
    Ok(false)
}

async fn handle_confirm(app: &mut App) {
    match app.active_view {
        View::Tickets => {
            if let Some(id) = app.ticket_view.selected {
                app.ticket_view.open_ticket(id);
            }
        }
        View::Billing => {
            let Some(plan_id) = app.billing_view.selected else {
                return;
            };
            match app
                .api
                .rest()
                .change_plan(&ChangePlanRequest { plan_id })
                .await
            {
                Ok(subscription) => {
                    app.billing_view.subscription = Some(subscription);
                    app.notify(NotificationLevel::Success, "Plan updated.");
                }
                Err(err) => report_api_error(app, err),
            }
        }
        _ => {}
    }
}

async fn advance_ticket_status(app: &mut App) {
    if app.active_view != View::Tickets {
        return;
    }
    let Some(open) = &app.ticket_view.open else {
        return;
    };
    let (id, previous) = (open.id, open.status);
    let next = match previous {
        TicketStatus::Open => TicketStatus::InProgress,
        TicketStatus::InProgress => TicketStatus::Resolved,
        TicketStatus::Resolved => return,
    };
    // Applied immediately; the poll cannot undo it, and an API failure rolls
    // it back explicitly.
    app.ticket_view.set_status(id, next);
    let request = UpdateTicketStatusRequest { status: next };
    if let Err(err) = app.api.rest().update_ticket_status(id, &request).await {
        app.ticket_view.set_status(id, previous);
        report_api_error(app, err);
    }
}

async fn handle_toggle(app: &mut App) {
    match app.active_view {
        View::FeatureFlags => {
            let Some(id) = app.flag_view.selected else {
                return;
            };
            let Some(enabled) = app.flag_view.toggle(id) else {
                return;
            };
            let request = UpdateFeatureFlagRequest { enabled };
            match app.api.rest().update_feature_flag(id, &request).await {
                Ok(flag) => app.flag_view.upsert(flag),
                Err(err) => {
                    app.flag_view.toggle(id);
                    report_api_error(app, err);
                }
            }
        }
        View::PaymentMethods => {
            let Some(id) = app.payment_view.selected else {
                return;
            };
            app.payment_view.mark_default(id);
            let request = SelectPaymentMethodRequest {
                payment_method_id: id,
            };
            match app.api.rest().select_payment_method(&request).await {
                Ok(_) => app.notify(NotificationLevel::Success, "Default payment method updated."),
                Err(err) => {
                    report_api_error(app, err);
                    reload_payment_methods(app).await;
                }
            }
        }
        _ => {}
    }
}

/// Initial load after sign-in: tickets come in with a visible loading
/// indicator; the dashboard follows.
async fn load_initial(app: &mut App) {
    app.ticket_view.loading = true;
    match app.api.rest().list_tickets().await {
        Ok(tickets) => app.ticket_view.replace_collection(tickets),
        Err(err) => report_api_error(app, err),
    }
    app.ticket_view.loading = false;

    app.dashboard_view.loading = true;
    match app.api.rest().dashboard_summary().await {
        Ok(summary) => app.dashboard_view.summary = Some(summary),
        Err(err) => report_api_error(app, err),
    }
    app.dashboard_view.loading = false;
}

async fn refresh_active_view(app: &mut App) {
    match app.active_view {
        View::Dashboard => {
            app.dashboard_view.loading = true;
            match app.api.rest().dashboard_summary().await {
                Ok(summary) => app.dashboard_view.summary = Some(summary),
                Err(err) => report_api_error(app, err),
            }
            app.dashboard_view.loading = false;
        }
        View::Tickets => {
            app.ticket_view.loading = true;
            match app.api.rest().list_tickets().await {
                Ok(tickets) => app.ticket_view.replace_collection(tickets),
                Err(err) => report_api_error(app, err),
            }
            app.ticket_view.loading = false;
        }
        View::Billing => {
            app.billing_view.loading = true;
            match app.api.rest().list_plans().await {
                Ok(plans) => app.billing_view.plans = plans,
                Err(err) => report_api_error(app, err),
            }
            match app.api.rest().current_subscription().await {
                Ok(subscription) => app.billing_view.subscription = Some(subscription),
                Err(err) => report_api_error(app, err),
            }
            app.billing_view.loading = false;
        }
        View::FeatureFlags => {
            app.flag_view.loading = true;
            match app.api.rest().list_feature_flags().await {
                Ok(flags) => app.flag_view.flags = flags,
                Err(err) => report_api_error(app, err),
            }
            app.flag_view.loading = false;
        }
        View::PaymentMethods => reload_payment_methods(app).await,
        View::Login => {}
    }
}

async fn reload_payment_methods(app: &mut App) {
    app.payment_view.loading = true;
    match app.api.rest().list_payment_methods().await {
        Ok(methods) => app.payment_view.methods = methods,
        Err(err) => report_api_error(app, err),
    }
    app.payment_view.loading = false;
}

/// Session expiry fails closed to the login view; everything else becomes a
/// footer notification.
fn report_api_error(app: &mut App, err: ApiClientError) {
    match err {
        ApiClientError::SessionExpired(reason) => {
            tracing::warn!(%reason, "session expired");
            app.hard_logout();
        }
        other => {
            tracing::warn!(error = %other, "request failed");
            app.notify(NotificationLevel::Error, other.to_string());
        }
    }
}
