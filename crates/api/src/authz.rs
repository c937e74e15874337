//! API-side authorization guard.
//!
//! Handlers resolve the principal and (for owned resources) the resource's
//! creator, then ask the shared policy. Denials are logged and mapped to
//! HTTP responses here, in one place.

use axum::http::StatusCode;
use axum::response::Response;

use campusnav_auth::{Action, AuthzError, Policy, ResourceKind};
use campusnav_core::{Owned, UserId};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Check a non-ownership action for the current principal.
pub fn require(
    policy: &Policy,
    principal: &PrincipalContext,
    action: Action,
    resource: ResourceKind,
) -> Result<(), Response> {
    policy
        .authorize(Some(principal.principal()), action, resource)
        .map_err(|e| deny(principal, action, resource, e))
}

/// Check an action on a loaded entity (`None`: resource missing).
pub fn require_entity<E: Owned>(
    policy: &Policy,
    principal: &PrincipalContext,
    action: Action,
    resource: ResourceKind,
    entity: Option<&E>,
) -> Result<(), Response> {
    policy
        .authorize_entity(Some(principal.principal()), action, resource, entity)
        .map_err(|e| deny(principal, action, resource, e))
}

/// Registrations of an event: admin, or the organizer who created it.
pub fn require_registrations_view<E: Owned>(
    policy: &Policy,
    principal: &PrincipalContext,
    event: Option<&E>,
) -> Result<(), Response> {
    policy
        .can_view_registrations(Some(principal.principal()), event)
        .map_err(|e| deny(principal, Action::ViewRegistrations, ResourceKind::Event, e))
}

/// Profile changes: the user themselves, or admin.
pub fn require_self_or_admin(
    policy: &Policy,
    principal: &PrincipalContext,
    target: &UserId,
) -> Result<(), Response> {
    policy
        .can_modify_user(Some(principal.principal()), target)
        .map_err(|e| deny(principal, Action::Edit, ResourceKind::User, e))
}

fn deny(principal: &PrincipalContext, action: Action, resource: ResourceKind, err: AuthzError) -> Response {
    tracing::debug!(
        user_id = %principal.user_id(),
        role = ?principal.role(),
        %action,
        %resource,
        error = %err,
        "authorization denied"
    );
    authz_error_to_response(&err, action)
}

/// Map an authorization failure to its HTTP status and message.
pub fn authz_error_to_response(err: &AuthzError, action: Action) -> Response {
    match err {
        AuthzError::Unauthenticated => errors::json_error(StatusCode::UNAUTHORIZED, "Authentication required"),
        AuthzError::NotFound(kind) => errors::json_error(StatusCode::NOT_FOUND, not_found_message(*kind)),
        AuthzError::NotOwner(kind) => errors::json_error(StatusCode::FORBIDDEN, not_owner_message(*kind, action)),
        AuthzError::Forbidden(_) => errors::json_error(
            StatusCode::FORBIDDEN,
            "Access denied. Insufficient permissions.",
        ),
    }
}

pub fn not_found_message(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Event => "Event not found",
        ResourceKind::Location => "Location not found",
        ResourceKind::User => "User not found",
    }
}

fn not_owner_message(kind: ResourceKind, action: Action) -> String {
    match (kind, action) {
        (ResourceKind::Event, Action::ViewRegistrations) => {
            "Access denied. You can only view registrations for events you created.".to_string()
        }
        (ResourceKind::User, _) => "Access denied. You can only modify your own profile.".to_string(),
        (kind, _) => format!("Access denied. You can only modify {}s you created.", kind.noun()),
    }
}
