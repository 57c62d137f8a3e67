//! Application state and view state definitions.

use crate::api_client::ApiClient;
use crate::config::TuiConfig;
use crate::nav::View;
use crate::notifications::{Notification, NotificationLevel};
use crate::session::SessionStore;
use crate::theme::{Theme, ThemeName};
use reckon_api::types::{
    DashboardSummaryResponse, FeatureFlagResponse, PaymentMethodResponse, PlanResponse,
    SubscriptionResponse, TicketMessageResponse, TicketResponse, UserResponse,
};
use reckon_core::{EntityId, TicketStatus, UserRole};

#[derive(Clone)]
pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub theme_name: ThemeName,
    pub api: ApiClient,
    pub session: SessionStore,
    /// The signed-in operator; `None` means the login view.
    pub user: Option<UserResponse>,
    pub active_view: View,

    pub login_view: LoginViewState,
    pub dashboard_view: DashboardViewState,
    pub ticket_view: TicketViewState,
    pub billing_view: BillingViewState,
    pub flag_view: FlagViewState,
    pub payment_view: PaymentViewState,

    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: TuiConfig, api: ApiClient, session: SessionStore) -> Self {
        let theme_name = ThemeName::Dark;
        Self {
            config,
            theme: Theme::named(theme_name),
            theme_name,
            api,
            session,
            user: None,
            active_view: View::Login,
            login_view: LoginViewState::new(),
            dashboard_view: DashboardViewState::new(),
            ticket_view: TicketViewState::new(),
            billing_view: BillingViewState::new(),
            flag_view: FlagViewState::new(),
            payment_view: PaymentViewState::new(),
            notifications: Vec::new(),
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn set_theme(&mut self, name: ThemeName) {
        self.theme_name = name;
        self.theme = Theme::named(name);
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Fail closed: drop everything tied to the dead session and return to
    /// the login view. The token store itself was already cleared by the
    /// client layer.
    pub fn hard_logout(&mut self) {
        self.user = None;
        self.dashboard_view = DashboardViewState::new();
        self.ticket_view = TicketViewState::new();
        self.billing_view = BillingViewState::new();
        self.flag_view = FlagViewState::new();
        self.payment_view = PaymentViewState::new();
        self.active_view = View::Login;
        self.notify(
            NotificationLevel::Warning,
            "Session expired. Please sign in again.",
        );
    }

    pub fn select_next(&mut self) {
        match self.active_view {
            View::Tickets => {
                select_next_id(&self.ticket_view.tickets, &mut self.ticket_view.selected)
            }
            View::Billing => {
                select_next_id(&self.billing_view.plans, &mut self.billing_view.selected)
            }
            View::FeatureFlags => {
                select_next_id(&self.flag_view.flags, &mut self.flag_view.selected)
            }
            View::PaymentMethods => {
                select_next_id(&self.payment_view.methods, &mut self.payment_view.selected)
            }
            View::Login | View::Dashboard => {}
        }
    }

    pub fn select_previous(&mut self) {
        match self.active_view {
            View::Tickets => {
                select_prev_id(&self.ticket_view.tickets, &mut self.ticket_view.selected)
            }
            View::Billing => {
                select_prev_id(&self.billing_view.plans, &mut self.billing_view.selected)
            }
            View::FeatureFlags => {
                select_prev_id(&self.flag_view.flags, &mut self.flag_view.selected)
            }
            View::PaymentMethods => {
                select_prev_id(&self.payment_view.methods, &mut self.payment_view.selected)
            }
            View::Login | View::Dashboard => {}
        }
    }
}

fn select_next_id<T: HasEntityId>(items: &[T], selected: &mut Option<EntityId>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected.and_then(|id| items.iter().position(|item| item.entity_id() == id));
    let next = match index {
        Some(index) => (index + 1) % items.len(),
        None => 0,
    };
    *selected = Some(items[next].entity_id());
}

fn select_prev_id<T: HasEntityId>(items: &[T], selected: &mut Option<EntityId>) {
    if items.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| items.iter().position(|item| item.entity_id() == id))
        .unwrap_or(0);
    let prev = if index == 0 { items.len() - 1 } else { index - 1 };
    *selected = Some(items[prev].entity_id());
}

trait HasEntityId {
    fn entity_id(&self) -> EntityId;
}

impl HasEntityId for TicketResponse {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

impl HasEntityId for PlanResponse {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

impl HasEntityId for FeatureFlagResponse {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

impl HasEntityId for PaymentMethodResponse {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

// ============================================================================
// VIEW STATE DEFINITIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginViewState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginViewState {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            submitting: false,
            error: None,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

#[derive(Debug, Clone)]
pub struct DashboardViewState {
    pub summary: Option<DashboardSummaryResponse>,
    pub loading: bool,
}

impl DashboardViewState {
    pub fn new() -> Self {
        Self {
            summary: None,
            loading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TicketViewState {
    pub tickets: Vec<TicketResponse>,
    pub selected: Option<EntityId>,
    /// The ticket open in the detail pane. A clone, reconciled against poll
    /// snapshots; the draft and scroll below are deliberately not part of it.
    pub open: Option<TicketResponse>,
    pub draft: String,
    pub composing: bool,
    /// Set when the open ticket's message sequence grows; the detail pane
    /// consumes it to jump to the latest message.
    pub scroll_to_latest: bool,
    pub loading: bool,
}

impl TicketViewState {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            selected: None,
            open: None,
            draft: String::new(),
            composing: false,
            scroll_to_latest: false,
            loading: false,
        }
    }

    /// Open the selected ticket in the detail pane. Switching tickets
    /// discards the draft; reopening the same ticket keeps it.
    pub fn open_ticket(&mut self, id: EntityId) {
        let Some(ticket) = self.tickets.iter().find(|t| t.id == id) else {
            return;
        };
        if self.open.as_ref().map(|open| open.id) != Some(id) {
            self.draft.clear();
            self.composing = false;
            self.scroll_to_latest = true;
        }
        self.selected = Some(id);
        self.open = Some(ticket.clone());
    }

    pub fn close_ticket(&mut self) {
        self.open = None;
        self.composing = false;
        self.draft.clear();
    }

    /// Replace the collection with a server snapshot and reconcile the open
    /// ticket.
    ///
    /// The open copy is replaced only when the snapshot strictly supersedes
    /// it - more messages, or a later status at the same message count. An
    /// identical snapshot leaves the reference untouched (no spurious
    /// re-render or scroll), and a stale snapshot can never roll back an
    /// optimistic reply or status change.
    pub fn replace_collection(&mut self, tickets: Vec<TicketResponse>) {
        self.tickets = tickets;
        let Some(open) = &self.open else {
            return;
        };
        let Some(incoming) = self.tickets.iter().find(|t| t.id == open.id) else {
            return;
        };
        if snapshot_supersedes(incoming, open) {
            if incoming.messages.len() > open.messages.len() {
                self.scroll_to_latest = true;
            }
            self.open = Some(incoming.clone());
        }
    }

    /// Optimistically append a posted reply to the open ticket and its
    /// collection entry, mirroring the server's open -> in_progress
    /// transition without waiting for the next poll.
    pub fn append_reply(&mut self, message: TicketMessageResponse) {
        let Some(open) = &mut self.open else {
            return;
        };
        open.messages.push(message.clone());
        if open.status == TicketStatus::Open {
            open.status = TicketStatus::InProgress;
        }
        let open_id = open.id;
        let open_status = open.status;
        if let Some(entry) = self.tickets.iter_mut().find(|t| t.id == open_id) {
            entry.messages.push(message);
            entry.status = open_status;
        }
        self.draft.clear();
        self.composing = false;
        self.scroll_to_latest = true;
    }

    /// Optimistically apply an explicit status change to the open ticket and
    /// its collection entry.
    pub fn set_status(&mut self, id: EntityId, status: TicketStatus) {
        if let Some(open) = &mut self.open {
            if open.id == id {
                open.status = status;
            }
        }
        if let Some(entry) = self.tickets.iter_mut().find(|t| t.id == id) {
            entry.status = status;
        }
    }
}

/// Whether a server snapshot strictly supersedes the locally held copy.
fn snapshot_supersedes(incoming: &TicketResponse, held: &TicketResponse) -> bool {
    incoming.messages.len() > held.messages.len()
        || (incoming.messages.len() == held.messages.len() && incoming.status > held.status)
}

#[derive(Debug, Clone)]
pub struct BillingViewState {
    pub plans: Vec<PlanResponse>,
    pub subscription: Option<SubscriptionResponse>,
    pub selected: Option<EntityId>,
    pub loading: bool,
}

impl BillingViewState {
    pub fn new() -> Self {
        Self {
            plans: Vec::new(),
            subscription: None,
            selected: None,
            loading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlagViewState {
    pub flags: Vec<FeatureFlagResponse>,
    pub selected: Option<EntityId>,
    pub loading: bool,
}

impl FlagViewState {
    pub fn new() -> Self {
        Self {
            flags: Vec::new(),
            selected: None,
            loading: false,
        }
    }

    /// Optimistically flip a flag; the server's answer lands via `upsert`.
    pub fn toggle(&mut self, id: EntityId) -> Option<bool> {
        let flag = self.flags.iter_mut().find(|f| f.id == id)?;
        flag.enabled = !flag.enabled;
        Some(flag.enabled)
    }

    pub fn upsert(&mut self, flag: FeatureFlagResponse) {
        if let Some(existing) = self.flags.iter_mut().find(|f| f.id == flag.id) {
            *existing = flag;
        } else {
            self.flags.push(flag);
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentViewState {
    pub methods: Vec<PaymentMethodResponse>,
    pub selected: Option<EntityId>,
    pub loading: bool,
}

impl PaymentViewState {
    pub fn new() -> Self {
        Self {
            methods: Vec::new(),
            selected: None,
            loading: false,
        }
    }

    /// Mark one method as the default, clearing the previous default.
    pub fn mark_default(&mut self, id: EntityId) {
        for method in &mut self.methods {
            method.is_default = method.id == id;
        }
    }
}

impl Default for LoginViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for DashboardViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for TicketViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for BillingViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for FlagViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PaymentViewState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reckon_api::types::TicketUserDetails;
    use reckon_core::TicketPriority;

    // ========================================================================
    // Test Fixtures
    // ========================================================================

    fn sample_message(id: EntityId, text: &str) -> TicketMessageResponse {
        TicketMessageResponse {
            id,
            sender: 12,
            sender_name: "Dana Ho".to_string(),
            message: text.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap(),
        }
    }

    fn sample_ticket(id: EntityId, status: TicketStatus, message_count: usize) -> TicketResponse {
        TicketResponse {
            id,
            subject: format!("Ticket {}", id),
            description: "Register cannot reach the network".to_string(),
            status,
            priority: TicketPriority::Medium,
            messages: (0..message_count)
                .map(|n| sample_message(n as EntityId + 1, "message"))
                .collect(),
            user_details: TicketUserDetails {
                id: 12,
                name: "Dana Ho".to_string(),
                email: "dana@example.com".to_string(),
            },
            company_name: "Harbor Coffee".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 5, 4, 9, 28, 0).unwrap(),
        }
    }

    fn state_with_open(ticket: TicketResponse) -> TicketViewState {
        let mut state = TicketViewState::new();
        state.tickets = vec![ticket.clone()];
        state.open_ticket(ticket.id);
        state
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    #[test]
    fn poll_with_more_messages_replaces_open_ticket() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Open, 3));
        state.scroll_to_latest = false;

        state.replace_collection(vec![sample_ticket(7, TicketStatus::Open, 4)]);

        assert_eq!(state.open.as_ref().unwrap().messages.len(), 4);
        assert!(state.scroll_to_latest);
    }

    #[test]
    fn identical_poll_leaves_open_ticket_untouched() {
        let ticket = sample_ticket(7, TicketStatus::Open, 3);
        let mut state = state_with_open(ticket.clone());
        state.scroll_to_latest = false;
        state.draft = "half-typed reply".to_string();

        state.replace_collection(vec![ticket]);

        assert_eq!(state.open.as_ref().unwrap().messages.len(), 3);
        assert!(!state.scroll_to_latest);
        assert_eq!(state.draft, "half-typed reply");
    }

    #[test]
    fn status_only_progress_replaces_open_ticket() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Open, 3));

        state.replace_collection(vec![sample_ticket(7, TicketStatus::Resolved, 3)]);

        assert_eq!(state.open.as_ref().unwrap().status, TicketStatus::Resolved);
    }

    #[test]
    fn stale_poll_never_reverts_optimistic_reply() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Open, 3));
        state.append_reply(sample_message(99, "thanks"));
        assert_eq!(state.open.as_ref().unwrap().messages.len(), 4);
        assert_eq!(
            state.open.as_ref().unwrap().status,
            TicketStatus::InProgress
        );

        // A poll taken before the reply landed: 3 messages, still open.
        state.replace_collection(vec![sample_ticket(7, TicketStatus::Open, 3)]);

        let open = state.open.as_ref().unwrap();
        assert_eq!(open.messages.len(), 4);
        assert_eq!(open.status, TicketStatus::InProgress);
    }

    #[test]
    fn poll_confirming_optimistic_reply_neither_reverts_nor_duplicates() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Open, 3));
        state.append_reply(sample_message(99, "thanks"));
        state.scroll_to_latest = false;

        // The server now reports the same 4 messages and in_progress.
        state.replace_collection(vec![sample_ticket(7, TicketStatus::InProgress, 4)]);

        let open = state.open.as_ref().unwrap();
        assert_eq!(open.messages.len(), 4);
        assert_eq!(open.status, TicketStatus::InProgress);
        assert!(!state.scroll_to_latest);
    }

    #[test]
    fn stale_poll_never_reverts_optimistic_status_change() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::InProgress, 3));
        state.set_status(7, TicketStatus::Resolved);

        state.replace_collection(vec![sample_ticket(7, TicketStatus::InProgress, 3)]);

        assert_eq!(state.open.as_ref().unwrap().status, TicketStatus::Resolved);
    }

    #[test]
    fn poll_for_a_closed_detail_pane_only_updates_the_collection() {
        let mut state = TicketViewState::new();
        state.tickets = vec![sample_ticket(7, TicketStatus::Open, 3)];

        state.replace_collection(vec![sample_ticket(7, TicketStatus::Resolved, 5)]);

        assert!(state.open.is_none());
        assert_eq!(state.tickets[0].messages.len(), 5);
    }

    #[test]
    fn poll_dropping_the_open_ticket_keeps_the_open_copy() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Open, 3));

        state.replace_collection(vec![sample_ticket(8, TicketStatus::Open, 1)]);

        // Tickets are never deleted at this layer; if the snapshot is
        // missing the open id, the open copy stays as-is.
        assert_eq!(state.open.as_ref().unwrap().id, 7);
    }

    // ========================================================================
    // Optimistic mutations
    // ========================================================================

    #[test]
    fn append_reply_updates_open_and_collection() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Open, 1));
        state.draft = "thanks".to_string();
        state.composing = true;

        state.append_reply(sample_message(50, "thanks"));

        assert_eq!(state.open.as_ref().unwrap().messages.len(), 2);
        assert_eq!(state.tickets[0].messages.len(), 2);
        assert_eq!(state.tickets[0].status, TicketStatus::InProgress);
        assert!(state.draft.is_empty());
        assert!(!state.composing);
        assert!(state.scroll_to_latest);
    }

    #[test]
    fn append_reply_keeps_resolved_status() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Resolved, 1));

        state.append_reply(sample_message(50, "one more thing"));

        assert_eq!(state.open.as_ref().unwrap().status, TicketStatus::Resolved);
    }

    #[test]
    fn set_status_updates_open_and_collection() {
        let mut state = state_with_open(sample_ticket(7, TicketStatus::Open, 1));

        state.set_status(7, TicketStatus::Resolved);

        assert_eq!(state.open.as_ref().unwrap().status, TicketStatus::Resolved);
        assert_eq!(state.tickets[0].status, TicketStatus::Resolved);
    }

    #[test]
    fn opening_a_different_ticket_clears_the_draft() {
        let mut state = TicketViewState::new();
        state.tickets = vec![
            sample_ticket(7, TicketStatus::Open, 1),
            sample_ticket(8, TicketStatus::Open, 1),
        ];
        state.open_ticket(7);
        state.draft = "draft for seven".to_string();

        state.open_ticket(8);
        assert!(state.draft.is_empty());

        // Re-opening the same ticket keeps whatever is typed.
        state.draft = "draft for eight".to_string();
        state.open_ticket(8);
        assert_eq!(state.draft, "draft for eight");
    }

    // ========================================================================
    // Selection navigation
    // ========================================================================

    #[test]
    fn select_next_wraps_around() {
        let tickets = vec![
            sample_ticket(1, TicketStatus::Open, 0),
            sample_ticket(2, TicketStatus::Open, 0),
        ];
        let mut selected = Some(2);
        select_next_id(&tickets, &mut selected);
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn select_next_on_empty_list_clears_selection() {
        let tickets: Vec<TicketResponse> = Vec::new();
        let mut selected = Some(1);
        select_next_id(&tickets, &mut selected);
        assert_eq!(selected, None);
    }

    #[test]
    fn select_prev_wraps_around() {
        let tickets = vec![
            sample_ticket(1, TicketStatus::Open, 0),
            sample_ticket(2, TicketStatus::Open, 0),
        ];
        let mut selected = Some(1);
        select_prev_id(&tickets, &mut selected);
        assert_eq!(selected, Some(2));
    }

    #[test]
    fn selection_recovers_when_selected_id_disappears() {
        let tickets = vec![sample_ticket(3, TicketStatus::Open, 0)];
        let mut selected = Some(99);
        select_next_id(&tickets, &mut selected);
        assert_eq!(selected, Some(3));
    }

    // ========================================================================
    // Flags and payment methods
    // ========================================================================

    fn sample_flag(id: EntityId, enabled: bool) -> FeatureFlagResponse {
        FeatureFlagResponse {
            id,
            key: format!("flag_{}", id),
            label: format!("Flag {}", id),
            description: None,
            enabled,
        }
    }

    #[test]
    fn flag_toggle_is_optimistic() {
        let mut state = FlagViewState::new();
        state.flags = vec![sample_flag(1, false)];
        assert_eq!(state.toggle(1), Some(true));
        assert!(state.flags[0].enabled);
        assert_eq!(state.toggle(99), None);
    }

    #[test]
    fn flag_upsert_replaces_by_id() {
        let mut state = FlagViewState::new();
        state.flags = vec![sample_flag(1, false)];
        state.upsert(sample_flag(1, true));
        assert_eq!(state.flags.len(), 1);
        assert!(state.flags[0].enabled);
        state.upsert(sample_flag(2, false));
        assert_eq!(state.flags.len(), 2);
    }

    #[test]
    fn mark_default_is_exclusive() {
        let mut state = PaymentViewState::new();
        state.methods = vec![
            PaymentMethodResponse {
                id: 1,
                provider: reckon_core::PaymentProvider::Card,
                label: "Visa".to_string(),
                last4: Some("4242".to_string()),
                is_default: true,
            },
            PaymentMethodResponse {
                id: 2,
                provider: reckon_core::PaymentProvider::BankTransfer,
                label: "Operating account".to_string(),
                last4: None,
                is_default: false,
            },
        ];
        state.mark_default(2);
        assert!(!state.methods[0].is_default);
        assert!(state.methods[1].is_default);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use reckon_api::types::TicketUserDetails;
    use reckon_core::TicketPriority;

    fn arb_status() -> impl Strategy<Value = TicketStatus> {
        prop_oneof![
            Just(TicketStatus::Open),
            Just(TicketStatus::InProgress),
            Just(TicketStatus::Resolved),
        ]
    }

    fn ticket(id: EntityId, status: TicketStatus, message_count: usize) -> TicketResponse {
        TicketResponse {
            id,
            subject: "subject".to_string(),
            description: "description".to_string(),
            status,
            priority: TicketPriority::Low,
            messages: (0..message_count)
                .map(|n| TicketMessageResponse {
                    id: n as EntityId + 1,
                    sender: 1,
                    sender_name: "sender".to_string(),
                    message: "text".to_string(),
                    created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                })
                .collect(),
            user_details: TicketUserDetails {
                id: 1,
                name: "name".to_string(),
                email: "mail@example.com".to_string(),
            },
            company_name: "company".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Reconciliation never loses messages: the open ticket's message
        /// count is monotonically non-decreasing across any poll snapshot.
        #[test]
        fn prop_open_ticket_messages_never_shrink(
            held_len in 0usize..6,
            incoming_len in 0usize..6,
            held_status in arb_status(),
            incoming_status in arb_status(),
        ) {
            let mut state = TicketViewState::new();
            state.tickets = vec![ticket(1, held_status, held_len)];
            state.open_ticket(1);

            state.replace_collection(vec![ticket(1, incoming_status, incoming_len)]);

            let open = state.open.as_ref().unwrap();
            prop_assert!(open.messages.len() >= held_len);
        }

        /// Reconciliation never moves the open ticket's status backwards.
        #[test]
        fn prop_open_ticket_status_never_regresses(
            held_status in arb_status(),
            incoming_status in arb_status(),
            len in 0usize..4,
        ) {
            let mut state = TicketViewState::new();
            state.tickets = vec![ticket(1, held_status, len)];
            state.open_ticket(1);

            state.replace_collection(vec![ticket(1, incoming_status, len)]);

            let open = state.open.as_ref().unwrap();
            prop_assert!(open.status >= held_status);
        }

        /// A snapshot identical to the held copy is never applied.
        #[test]
        fn prop_identical_snapshot_is_a_noop(status in arb_status(), len in 0usize..5) {
            let mut state = TicketViewState::new();
            state.tickets = vec![ticket(1, status, len)];
            state.open_ticket(1);
            state.scroll_to_latest = false;
            state.draft = "draft".to_string();

            state.replace_collection(vec![ticket(1, status, len)]);

            prop_assert!(!state.scroll_to_latest);
            prop_assert_eq!(state.draft.as_str(), "draft");
            let open = state.open.as_ref().unwrap();
            prop_assert_eq!(open.status, status);
            prop_assert_eq!(open.messages.len(), len);
        }
    }
}
