//! Reckon Core - Shared Data Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types and their conversions - no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier. The backend assigns sequential integer ids; the console
/// never mints its own.
pub type EntityId = i64;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

// ============================================================================
// ENUMS
// ============================================================================

/// Lifecycle status of a support ticket.
///
/// Statuses are ordered: a ticket only moves forward
/// (`Open < InProgress < Resolved`). The ordering is what lets the poll
/// reconciliation tell a superseding server snapshot from a stale one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

/// Priority of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

/// Role of the signed-in operator. Owners see a single company; super admins
/// see the whole fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Owner,
    SuperAdmin,
}

/// Billing interval of a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanInterval {
    Monthly,
    Yearly,
}

/// Status of a company subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Canceled,
}

/// Payment instrument family offered during payment-method selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProvider {
    Card,
    BankTransfer,
    Wallet,
}

// ============================================================================
// DISPLAY / FROMSTR
// ============================================================================

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "open" => Ok(TicketStatus::Open),
            "inprogress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            _ => Err(format!("Invalid TicketStatus: {}", s)),
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            _ => Err(format!("Invalid TicketPriority: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            UserRole::Owner => "Owner",
            UserRole::SuperAdmin => "Super Admin",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "owner" => Ok(UserRole::Owner),
            "superadmin" => Ok(UserRole::SuperAdmin),
            _ => Err(format!("Invalid UserRole: {}", s)),
        }
    }
}

impl fmt::Display for PlanInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PlanInterval::Monthly => "Monthly",
            PlanInterval::Yearly => "Yearly",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for PlanInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "monthly" | "month" => Ok(PlanInterval::Monthly),
            "yearly" | "year" | "annual" => Ok(PlanInterval::Yearly),
            _ => Err(format!("Invalid PlanInterval: {}", s)),
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SubscriptionStatus::Trialing => "Trialing",
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::PastDue => "Past Due",
            SubscriptionStatus::Canceled => "Canceled",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "trialing" | "trial" => Ok(SubscriptionStatus::Trialing),
            "active" => Ok(SubscriptionStatus::Active),
            "pastdue" => Ok(SubscriptionStatus::PastDue),
            "canceled" | "cancelled" => Ok(SubscriptionStatus::Canceled),
            _ => Err(format!("Invalid SubscriptionStatus: {}", s)),
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PaymentProvider::Card => "Card",
            PaymentProvider::BankTransfer => "Bank Transfer",
            PaymentProvider::Wallet => "Wallet",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for PaymentProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "card" => Ok(PaymentProvider::Card),
            "banktransfer" | "bank" => Ok(PaymentProvider::BankTransfer),
            "wallet" => Ok(PaymentProvider::Wallet),
            _ => Err(format!("Invalid PaymentProvider: {}", s)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_ticket_status() -> impl Strategy<Value = TicketStatus> {
        prop_oneof![
            Just(TicketStatus::Open),
            Just(TicketStatus::InProgress),
            Just(TicketStatus::Resolved),
        ]
    }

    proptest! {
        /// Display and FromStr are inverses for every status.
        #[test]
        fn prop_ticket_status_display_parse_round_trip(status in arb_ticket_status()) {
            let parsed: TicketStatus = status.to_string().parse().unwrap();
            prop_assert_eq!(parsed, status);
        }

        /// Parsing is insensitive to case and separator noise.
        #[test]
        fn prop_ticket_status_parse_ignores_noise(status in arb_ticket_status(), upper in any::<bool>()) {
            let mut text = status.to_string().replace(' ', "_");
            if upper {
                text = text.to_uppercase();
            }
            let parsed: TicketStatus = text.parse().unwrap();
            prop_assert_eq!(parsed, status);
        }
    }
}
