//! Session state and route guards
//!
//! The identity provider itself is external; this module only models what
//! guards need from it (is the session loaded, who is signed in, on which
//! plan) and turns that into a render/redirect decision.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::navigation::Navigator;

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Enterprise,
}

impl Plan {
    /// Maps the stored subscription string; anything unknown is `Free`
    ///
    /// ```
    /// use planscope::auth::Plan;
    ///
    /// assert_eq!(Plan::from_subscription("pro"), Plan::Pro);
    /// assert_eq!(Plan::from_subscription("Enterprise"), Plan::Enterprise);
    /// assert_eq!(Plan::from_subscription("gold"), Plan::Free);
    /// ```
    pub fn from_subscription(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pro" => Plan::Pro,
            "enterprise" => Plan::Enterprise,
            _ => Plan::Free,
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Canceled,
    PastDue,
    Trialing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default)]
    pub preferred_city: Option<String>,
}

impl User {
    /// Display name falls back to the mailbox part of the email
    pub fn new(uid: impl Into<String>, email: impl Into<String>, plan: Plan) -> Self {
        let email = email.into();
        let name = email.split('@').next().unwrap_or("User").to_string();
        Self {
            uid: uid.into(),
            email,
            name,
            plan,
            subscription_status: SubscriptionStatus::Active,
            preferred_city: None,
        }
    }
}

/// Snapshot of the session provider
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    /// True until the provider has reported the session at least once
    pub loading: bool,
    pub user: Option<User>,
}

impl AuthState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            user: None,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            loading: false,
            user: None,
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            loading: false,
            user: Some(user),
        }
    }
}

/// Access requirement of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Open,
    Authenticated,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not loaded yet; show a spinner
    Loading,
    Render,
    Redirect(&'static str),
}

impl Guard {
    pub fn decide(&self, auth: &AuthState) -> GuardDecision {
        if *self == Guard::Open {
            return GuardDecision::Render;
        }
        if auth.loading {
            return GuardDecision::Loading;
        }
        match (&auth.user, self) {
            (None, _) => GuardDecision::Redirect("/login"),
            (Some(user), Guard::Paid) if !user.plan.is_paid() => GuardDecision::Redirect("/pricing"),
            _ => GuardDecision::Render,
        }
    }
}

/// Applies the current page's guard, navigating away on redirect
pub fn enforce(navigator: &Navigator, auth: &AuthState) -> GuardDecision {
    let page = navigator.page();
    let decision = page.guard().decide(auth);

    if let GuardDecision::Redirect(target) = decision {
        info!(?page, %target, "guard redirect");
        navigator.navigate(target);
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user(plan: Plan) -> AuthState {
        AuthState::signed_in(User::new("u1", "dana@example.com", plan))
    }

    #[rstest]
    #[case(Guard::Open, AuthState::loading(), GuardDecision::Render)]
    #[case(Guard::Open, AuthState::signed_out(), GuardDecision::Render)]
    #[case(Guard::Authenticated, AuthState::loading(), GuardDecision::Loading)]
    #[case(Guard::Authenticated, AuthState::signed_out(), GuardDecision::Redirect("/login"))]
    #[case(Guard::Authenticated, user(Plan::Free), GuardDecision::Render)]
    #[case(Guard::Paid, AuthState::loading(), GuardDecision::Loading)]
    #[case(Guard::Paid, AuthState::signed_out(), GuardDecision::Redirect("/login"))]
    #[case(Guard::Paid, user(Plan::Free), GuardDecision::Redirect("/pricing"))]
    #[case(Guard::Paid, user(Plan::Pro), GuardDecision::Render)]
    #[case(Guard::Paid, user(Plan::Enterprise), GuardDecision::Render)]
    fn test_guard_decisions(
        #[case] guard: Guard,
        #[case] auth: AuthState,
        #[case] expected: GuardDecision,
    ) {
        assert_eq!(guard.decide(&auth), expected);
    }

    #[test]
    fn test_user_name_from_email() {
        assert_eq!(User::new("u", "noa@city.gov.il", Plan::Pro).name, "noa");
    }

    #[test]
    fn test_plan_serde_names() {
        assert_eq!(serde_json::to_string(&Plan::Enterprise).unwrap(), "\"Enterprise\"");
        let status: SubscriptionStatus = serde_json::from_str("\"past_due\"").unwrap();
        assert_eq!(status, SubscriptionStatus::PastDue);
    }
}
