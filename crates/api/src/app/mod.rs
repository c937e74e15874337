//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared policy and record stores
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `models.rs`: stored records
//! - `dto.rs`: request/response DTOs and validation
//! - `errors.rs`: consistent JSON bodies

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use campusnav_auth::Policy;

use crate::middleware;
use crate::token::Hs256JwtValidator;

pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: String, policy: Policy) -> Router {
    let jwt = Arc::new(Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let policy = Arc::new(policy);
    let services = Arc::new(services::build_services(Arc::clone(&policy)));

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/policy", get(routes::system::policy_document))
        .layer(Extension(policy))
        .merge(protected)
        .layer(ServiceBuilder::new())
}
