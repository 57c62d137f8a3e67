//! API Request and Response Types
//!
//! This module defines the request and response types for every backend
//! endpoint the console consumes. Field names match the wire exactly; the
//! envelope around them is handled by [`crate::envelope`].

use reckon_core::{
    EntityId, PaymentProvider, PlanInterval, SubscriptionStatus, TicketPriority, TicketStatus,
    Timestamp, UserRole,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// AUTH TYPES
// ============================================================================

/// Credentials submitted to `POST /auth/login/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the bearer token plus the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Body of a successful `POST /api/auth/refresh/`.
///
/// The backend has shipped the fresh token under both `token` and `access`
/// at different points; either satisfies the contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RefreshResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

impl RefreshResponse {
    /// The usable token, if the response carries one. A refresh response
    /// without one is treated as a refresh failure by the client.
    pub fn into_token(self) -> Option<String> {
        self.token.or(self.access).filter(|t| !t.is_empty())
    }
}

/// The signed-in operator, as returned by login and `GET /auth/me/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Company the operator belongs to; absent for super admins.
    pub company_name: Option<String>,
}

// ============================================================================
// TICKET TYPES
// ============================================================================

/// A support ticket with its full message thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketResponse {
    pub id: EntityId,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    /// Server-assigned order; array order is chronological order.
    pub messages: Vec<TicketMessageResponse>,
    pub user_details: TicketUserDetails,
    pub company_name: String,
    pub created_at: Timestamp,
}

/// One message in a ticket thread. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketMessageResponse {
    pub id: EntityId,
    pub sender: EntityId,
    pub sender_name: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// The requester embedded in a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketUserDetails {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// Request to append a reply to a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTicketRequest {
    pub message: String,
}

/// Request to move a ticket to a new status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTicketStatusRequest {
    pub status: TicketStatus,
}

// ============================================================================
// BILLING TYPES
// ============================================================================

/// A subscription plan offered to companies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub id: EntityId,
    pub name: String,
    /// Unit price in the smallest currency denomination.
    pub price_cents: i64,
    pub currency: String,
    pub interval: PlanInterval,
    pub features: Vec<String>,
    pub active: bool,
}

/// The company's current subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub id: EntityId,
    pub plan: PlanResponse,
    pub status: SubscriptionStatus,
    pub current_period_end: Timestamp,
    pub cancel_at_period_end: bool,
}

/// Request to move the subscription to a different plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePlanRequest {
    pub plan_id: EntityId,
}

// ============================================================================
// FEATURE FLAG TYPES
// ============================================================================

/// A feature flag and its current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlagResponse {
    pub id: EntityId,
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    pub enabled: bool,
}

/// Request to flip a feature flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFeatureFlagRequest {
    pub enabled: bool,
}

// ============================================================================
// PAYMENT METHOD TYPES
// ============================================================================

/// A stored payment method available for selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodResponse {
    pub id: EntityId,
    pub provider: PaymentProvider,
    pub label: String,
    /// Last four digits for card instruments.
    pub last4: Option<String>,
    pub is_default: bool,
}

/// Request to make a stored payment method the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectPaymentMethodRequest {
    pub payment_method_id: EntityId,
}

// ============================================================================
// DASHBOARD TYPES
// ============================================================================

/// Role-scoped dashboard summary.
///
/// The backend fills the fleet fields only for super admins; owners see the
/// company-scoped numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummaryResponse {
    pub open_tickets: i64,
    pub active_subscriptions: i64,
    pub monthly_revenue_cents: i64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_companies: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_signups_30d: Option<i64>,
}
