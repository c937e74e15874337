use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};

use campusnav_auth::{Action, ResourceKind};
use campusnav_core::UserId;

use crate::app::dto::{self, ChangeRoleRequest, UpdateUserRequest};
use crate::app::errors;
use crate::app::models::UserRecord;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;
use crate::store::Store;

const INVALID_ID: &str = "Invalid user ID";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", put(update_user))
        .route("/:id/role", patch(change_role))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::ViewAll, ResourceKind::User) {
        return resp;
    }
    errors::json_ok(StatusCode::OK, services.users.list())
}

/// Create or update a profile. Users edit themselves; admin edits anyone.
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: UserId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = authz::require_self_or_admin(&services.policy, &principal, &id) {
        return resp;
    }
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    if let Some(name) = &body.name {
        if let Err(e) = dto::validate_name(name) {
            return errors::domain_error_to_response(e);
        }
    }

    let existing = services.users.get(&id);
    let user = match existing {
        Some(mut user) => {
            if let Some(name) = body.name {
                user.name = name.trim().to_string();
            }
            if let Some(email) = body.email {
                user.email = Some(email);
            }
            user
        }
        None => {
            let Some(name) = body.name else {
                return errors::domain_error_to_response(campusnav_core::DomainError::validation(
                    "Name is required",
                ));
            };
            // Only a self-created profile records the caller's role.
            let role = (id == principal.user_id()).then(|| principal.role()).flatten();
            UserRecord {
                id,
                name: name.trim().to_string(),
                email: body.email,
                role,
            }
        }
    };
    services.users.upsert(id, user.clone());

    errors::json_ok(StatusCode::OK, user)
}

pub async fn change_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<ChangeRoleRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::ChangeRole, ResourceKind::User) {
        return resp;
    }
    let id: UserId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let updated = services.users.update(&id, |user| {
        user.role = Some(body.role);
        user.clone()
    });

    match updated {
        Some(user) => {
            tracing::info!(user_id = %id, role = %body.role, changed_by = %principal.user_id(), "user role changed");
            errors::json_ok(StatusCode::OK, user)
        }
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::User)),
    }
}
