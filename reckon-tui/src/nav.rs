//! Navigation and view switching utilities.

use reckon_core::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Login,
    Dashboard,
    Tickets,
    Billing,
    FeatureFlags,
    PaymentMethods,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Sign In",
            View::Dashboard => "Dashboard",
            View::Tickets => "Tickets",
            View::Billing => "Billing",
            View::FeatureFlags => "Feature Flags",
            View::PaymentMethods => "Payment Methods",
        }
    }

    /// Views reachable for a role, in tab order. Login is not part of any
    /// rotation; it is entered only by signing out.
    pub fn all_for(role: UserRole) -> &'static [View] {
        match role {
            UserRole::Owner => &[
                View::Dashboard,
                View::Tickets,
                View::Billing,
                View::FeatureFlags,
                View::PaymentMethods,
            ],
            UserRole::SuperAdmin => &[View::Dashboard, View::Tickets, View::FeatureFlags],
        }
    }

    pub fn from_index(role: UserRole, index: usize) -> Option<View> {
        Self::all_for(role).get(index).copied()
    }

    pub fn next(&self, role: UserRole) -> View {
        let all = Self::all_for(role);
        let idx = all.iter().position(|v| v == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn previous(&self, role: UserRole) -> View {
        let all = Self::all_for(role);
        let idx = all.iter().position(|v| v == self).unwrap_or(0);
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_rotation_cycles_through_all_views() {
        let all = View::all_for(UserRole::Owner);
        let mut current = all[0];
        for _ in 0..all.len() {
            current = current.next(UserRole::Owner);
        }
        assert_eq!(current, all[0]);
    }

    #[test]
    fn super_admin_rotation_skips_company_views() {
        let all = View::all_for(UserRole::SuperAdmin);
        assert!(!all.contains(&View::Billing));
        assert!(!all.contains(&View::PaymentMethods));
    }

    #[test]
    fn previous_inverts_next() {
        for role in [UserRole::Owner, UserRole::SuperAdmin] {
            for view in View::all_for(role) {
                assert_eq!(view.next(role).previous(role), *view);
            }
        }
    }

    #[test]
    fn view_outside_rotation_falls_back_to_first() {
        // A super admin can never reach Billing; if state ends up there
        // anyway, navigation recovers instead of panicking.
        let next = View::Billing.next(UserRole::SuperAdmin);
        assert_eq!(next, View::Tickets);
    }
}
