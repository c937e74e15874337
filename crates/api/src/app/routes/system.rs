use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use campusnav_auth::{ActionOptions, Policy, Role, RouteRequirement, evaluate_guard};

use crate::app::dto::{ExplainQuery, MeResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The shared policy document, for client-side gating.
pub async fn policy_document(Extension(policy): Extension<Arc<Policy>>) -> impl IntoResponse {
    Json(policy.document())
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let permissions = services.policy.role_permissions(principal.role());
    errors::json_ok(
        StatusCode::OK,
        MeResponse::new(principal.user_id(), principal.role(), permissions),
    )
}

pub async fn explain(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<ExplainQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match errors::query_params(query) {
        Ok(q) => q,
        Err(resp) => return resp,
    };
    let explanation = services.policy.explain_str(
        Some(principal.principal()),
        &query.action,
        &query.resource,
        ActionOptions {
            is_owner: query.is_owner,
        },
    );
    errors::json_ok(StatusCode::OK, explanation)
}

/// Client page groups: (name, page path, requirement).
const PAGE_GROUPS: [(&str, &str, RouteRequirement); 4] = [
    ("authenticated", "/dashboard", RouteRequirement::Authenticated),
    ("organizer", "/organizer", RouteRequirement::organizer_route()),
    ("admin", "/admin", RouteRequirement::admin_route()),
    ("student_only", "/my-events", RouteRequirement::Exactly(Role::Student)),
];

/// Guard outcomes of the client's protected page groups for this principal.
pub async fn route_access(Extension(principal): Extension<PrincipalContext>) -> axum::response::Response {
    let outcomes: serde_json::Map<String, serde_json::Value> = PAGE_GROUPS
        .into_iter()
        .map(|(name, path, requirement)| {
            let outcome = evaluate_guard(Some(principal.principal()), requirement, path);
            (name.to_string(), json!(outcome))
        })
        .collect();
    errors::json_ok(StatusCode::OK, outcomes)
}
