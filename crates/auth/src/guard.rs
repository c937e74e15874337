//! Client-side route gating.
//!
//! Mirrors the decisions the UI makes before rendering a protected page. This
//! is a UX convenience only: the service-side checks in [`crate::authorize`]
//! are authoritative and re-run on every request.

use serde::Serialize;

use crate::{Principal, Role};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// What a protected route demands of the current principal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteRequirement {
    /// Any signed-in principal.
    Authenticated,
    /// A role at or above the given rank (organizer pages, admin pages).
    AtLeast(Role),
    /// Exactly the given role.
    Exactly(Role),
}

impl RouteRequirement {
    pub const fn organizer_route() -> Self {
        RouteRequirement::AtLeast(Role::Organizer)
    }

    pub const fn admin_route() -> Self {
        RouteRequirement::AtLeast(Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    Allow,
    /// Not signed in. `from` is the page to return to after login.
    RedirectToLogin { from: String },
    /// Signed in without the required role.
    Redirect { to: &'static str },
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }

    /// Path the client should navigate to, if any.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardOutcome::Allow => None,
            GuardOutcome::RedirectToLogin { .. } => Some(LOGIN_PATH),
            GuardOutcome::Redirect { to } => Some(*to),
        }
    }

    /// Page to resume after signing in.
    pub fn return_to(&self) -> Option<&str> {
        match self {
            GuardOutcome::RedirectToLogin { from } => Some(from.as_str()),
            _ => None,
        }
    }
}

/// Decide whether `principal` may open the page at `requested`.
pub fn evaluate_guard(
    principal: Option<&Principal>,
    requirement: RouteRequirement,
    requested: &str,
) -> GuardOutcome {
    let Some(principal) = principal else {
        return GuardOutcome::RedirectToLogin {
            from: requested.to_string(),
        };
    };

    match requirement {
        RouteRequirement::Authenticated => GuardOutcome::Allow,
        RouteRequirement::AtLeast(required) => {
            if crate::is_role_higher_or_equal(principal.role, Some(required)) {
                GuardOutcome::Allow
            } else {
                GuardOutcome::Redirect { to: HOME_PATH }
            }
        }
        RouteRequirement::Exactly(required) => {
            if principal.role == Some(required) {
                GuardOutcome::Allow
            } else {
                GuardOutcome::Redirect { to: DASHBOARD_PATH }
            }
        }
    }
}
