//! API client layer for the Reckon backend.
//!
//! Two clients share one session store. [`RestClient`] is the workhorse: it
//! attaches the bearer token to every request and transparently recovers
//! from a single class of failure - an expired token - by refreshing the
//! session once and replaying the failed request once. [`AuthClient`] serves
//! the authentication endpoints on their own origin and deliberately has no
//! recovery logic: a 401 from login is an answer, not an accident.

use crate::config::TuiConfig;
use crate::session::SessionStore;
use reckon_api::envelope;
use reckon_api::error::{ApiError, ErrorCode};
use reckon_api::types::{
    ChangePlanRequest, DashboardSummaryResponse, FeatureFlagResponse, LoginRequest, LoginResponse,
    PaymentMethodResponse, PlanResponse, RefreshResponse, ReplyTicketRequest,
    SelectPaymentMethodRequest, SubscriptionResponse, TicketMessageResponse, TicketResponse,
    UpdateFeatureFlagRequest, UpdateTicketStatusRequest, UserResponse,
};
use reckon_core::EntityId;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Refresh endpoint, relative to the backend origin. The refresh credential
/// is an HTTP-only cookie, so the call goes out through a bare client with a
/// cookie store and no bearer header.
pub const REFRESH_PATH: &str = "/api/auth/refresh/";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },
    #[error("session expired: {0}")]
    SessionExpired(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiClientError {
    fn is_unauthorized(&self) -> bool {
        matches!(self, ApiClientError::Api { status: 401, .. })
    }
}

/// Whether a request has already been replayed after a refresh. Threading
/// this through the send path makes "retried at most once" a structural
/// fact: only a `First` attempt can enter the refresh flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Replay,
}

#[derive(Clone)]
pub struct ApiClient {
    rest: RestClient,
    auth: AuthClient,
}

impl ApiClient {
    pub fn new(config: &TuiConfig, session: SessionStore) -> Result<Self, ApiClientError> {
        let rest = RestClient::new(config, session.clone())?;
        let auth = AuthClient::new(config, session)?;
        Ok(Self { rest, auth })
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }
}

// ============================================================================
// PRIMARY CLIENT
// ============================================================================

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    /// Bare client for the refresh call: cookie jar for the HTTP-only
    /// refresh credential, no bearer header, no recovery logic of its own,
    /// so a refresh can never recurse into another refresh.
    refresh_client: reqwest::Client,
    base_url: String,
    session: SessionStore,
    /// Serializes refresh attempts. Concurrent 401s queue here instead of
    /// each issuing their own refresh call.
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

impl RestClient {
    pub fn new(config: &TuiConfig, session: SessionStore) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let refresh_client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            refresh_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    // ------------------------------------------------------------------------
    // Ticket endpoints
    // ------------------------------------------------------------------------

    pub async fn list_tickets(&self) -> Result<Vec<TicketResponse>, ApiClientError> {
        let value = self.request(Method::GET, "/api/tickets/", None).await?;
        Ok(envelope::decode_member(value, "tickets")?)
    }

    pub async fn reply_ticket(
        &self,
        ticket_id: EntityId,
        req: &ReplyTicketRequest,
    ) -> Result<TicketMessageResponse, ApiClientError> {
        let path = format!("/api/tickets/{}/reply/", ticket_id);
        let value = self
            .request(Method::POST, &path, Some(serde_json::to_value(req)?))
            .await?;
        Ok(envelope::decode(value)?)
    }

    pub async fn update_ticket_status(
        &self,
        ticket_id: EntityId,
        req: &UpdateTicketStatusRequest,
    ) -> Result<TicketResponse, ApiClientError> {
        let path = format!("/api/tickets/{}/status/", ticket_id);
        let value = self
            .request(Method::PATCH, &path, Some(serde_json::to_value(req)?))
            .await?;
        Ok(envelope::decode(value)?)
    }

    // ------------------------------------------------------------------------
    // Billing endpoints
    // ------------------------------------------------------------------------

    pub async fn list_plans(&self) -> Result<Vec<PlanResponse>, ApiClientError> {
        let value = self.request(Method::GET, "/api/plans/", None).await?;
        Ok(envelope::decode_member(value, "plans")?)
    }

    pub async fn current_subscription(&self) -> Result<SubscriptionResponse, ApiClientError> {
        let value = self
            .request(Method::GET, "/api/subscriptions/current/", None)
            .await?;
        Ok(envelope::decode(value)?)
    }

    pub async fn change_plan(
        &self,
        req: &ChangePlanRequest,
    ) -> Result<SubscriptionResponse, ApiClientError> {
        let value = self
            .request(
                Method::POST,
                "/api/subscriptions/change/",
                Some(serde_json::to_value(req)?),
            )
            .await?;
        Ok(envelope::decode(value)?)
    }

    // ------------------------------------------------------------------------
    // Feature flag endpoints
    // ------------------------------------------------------------------------

    pub async fn list_feature_flags(&self) -> Result<Vec<FeatureFlagResponse>, ApiClientError> {
        let value = self
            .request(Method::GET, "/api/feature-flags/", None)
            .await?;
        Ok(envelope::decode_member(value, "feature_flags")?)
    }

    pub async fn update_feature_flag(
        &self,
        flag_id: EntityId,
        req: &UpdateFeatureFlagRequest,
    ) -> Result<FeatureFlagResponse, ApiClientError> {
        let path = format!("/api/feature-flags/{}/", flag_id);
        let value = self
            .request(Method::PATCH, &path, Some(serde_json::to_value(req)?))
            .await?;
        Ok(envelope::decode(value)?)
    }

    // ------------------------------------------------------------------------
    // Payment method endpoints
    // ------------------------------------------------------------------------

    pub async fn list_payment_methods(&self) -> Result<Vec<PaymentMethodResponse>, ApiClientError> {
        let value = self
            .request(Method::GET, "/api/payment-methods/", None)
            .await?;
        Ok(envelope::decode_member(value, "payment_methods")?)
    }

    pub async fn select_payment_method(
        &self,
        req: &SelectPaymentMethodRequest,
    ) -> Result<PaymentMethodResponse, ApiClientError> {
        let value = self
            .request(
                Method::POST,
                "/api/payment-methods/select/",
                Some(serde_json::to_value(req)?),
            )
            .await?;
        Ok(envelope::decode(value)?)
    }

    // ------------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------------

    pub async fn dashboard_summary(&self) -> Result<DashboardSummaryResponse, ApiClientError> {
        let value = self
            .request(Method::GET, "/api/dashboard/summary/", None)
            .await?;
        Ok(envelope::decode(value)?)
    }

    /// Fetch an arbitrary backend path. Returns the raw JSON value; envelope
    /// handling is the caller's concern.
    pub async fn get(&self, path: &str) -> Result<Value, ApiClientError> {
        self.request(Method::GET, path, None).await
    }

    // ------------------------------------------------------------------------
    // Core request flow
    // ------------------------------------------------------------------------

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiClientError> {
        let token = self.session.token();
        let err = match self
            .send(method.clone(), path, body.as_ref(), token.as_deref(), Attempt::First)
            .await
        {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !err.is_unauthorized() {
            return Err(err);
        }
        // A rejected call against the refresh endpoint itself is terminal:
        // refreshing in response would loop forever.
        if path == REFRESH_PATH {
            warn!(path, "refresh endpoint rejected its own credential");
            return Err(self.hard_logout("refresh endpoint returned 401".to_string()));
        }
        let fresh = self.refresh_session(token).await?;
        // Only this one replay; its outcome - including another 401 - goes
        // straight back to the caller.
        self.send(method, path, body.as_ref(), Some(&fresh), Attempt::Replay)
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
        attempt: Attempt,
    ) -> Result<Value, ApiClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        debug!(
            %method,
            path,
            status = response.status().as_u16(),
            ?attempt,
            "request completed"
        );
        parse_response(response).await
    }

    /// Trade the refresh cookie for a fresh bearer token.
    ///
    /// `stale` is the token the failed request was sent with. Attempts are
    /// serialized; a waiter that finds the stored token already changed
    /// reuses it instead of refreshing again, so a burst of concurrent 401s
    /// produces a single refresh call.
    async fn refresh_session(&self, stale: Option<String>) -> Result<String, ApiClientError> {
        let _gate = self.refresh_gate.lock().await;
        if let Some(current) = self.session.token() {
            if Some(&current) != stale.as_ref() {
                debug!("session already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = match self.refresh_client.post(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                return Err(self.hard_logout(err.to_string()));
            }
        };
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "token refresh rejected");
            return Err(self.hard_logout(format!("refresh returned {}", status.as_u16())));
        }
        let parsed: RefreshResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "token refresh returned an unreadable body");
                return Err(self.hard_logout(err.to_string()));
            }
        };
        match parsed.into_token() {
            Some(token) => {
                self.session.set_token(&token);
                Ok(token)
            }
            None => {
                warn!("token refresh response carried no usable token");
                Err(self.hard_logout("refresh response carried no usable token".to_string()))
            }
        }
    }

    /// Terminal state of the 401 flow: the session is gone. Clears the
    /// store (and its persisted backing); the application layer reacts to
    /// the returned error by dropping cached state and showing the login
    /// view.
    fn hard_logout(&self, reason: String) -> ApiClientError {
        self.session.clear();
        ApiClientError::SessionExpired(reason)
    }
}

// ============================================================================
// AUTH CLIENT
// ============================================================================

/// Client for the authentication endpoints. Same token attachment and
/// logging as [`RestClient`], no refresh machinery: a 401 here surfaces
/// directly to the caller.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl AuthClient {
    pub fn new(config: &TuiConfig, session: SessionStore) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.auth_request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Exchange credentials for a session. The token is stored on success.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiClientError> {
        let value = self
            .send(Method::POST, "/auth/login/", Some(serde_json::to_value(req)?))
            .await?;
        let response: LoginResponse = envelope::decode(value)?;
        self.session.set_token(&response.token);
        Ok(response)
    }

    /// Invalidate the session server-side. The local token is cleared even
    /// if the backend call fails.
    pub async fn logout(&self) -> Result<(), ApiClientError> {
        let result = self.send(Method::POST, "/auth/logout/", None).await;
        self.session.clear();
        result.map(|_| ())
    }

    /// The signed-in operator.
    pub async fn me(&self) -> Result<UserResponse, ApiClientError> {
        let value = self.send(Method::GET, "/auth/me/", None).await?;
        Ok(envelope::decode(value)?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        debug!(%method, path, status = response.status().as_u16(), "auth request completed");
        parse_response(response).await
    }
}

// ============================================================================
// SHARED RESPONSE PARSING
// ============================================================================

async fn parse_response(response: reqwest::Response) -> Result<Value, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        return Ok(response.json::<Value>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let parsed = ApiError::from_body(&body);
    if status == StatusCode::FORBIDDEN {
        error!(status = status.as_u16(), body = %body, "request forbidden");
    }
    let message = match &parsed {
        Some(api_error) => api_error.message.clone(),
        None if body.is_empty() => status.to_string(),
        None => body.clone(),
    };
    Err(ApiClientError::Api {
        status: status.as_u16(),
        code: parsed.map(|api_error| api_error.code),
        message,
    })
}
