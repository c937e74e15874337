use axum::{routing::get, Router};

pub mod events;
pub mod locations;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/me", get(system::me))
        .route("/me/explain", get(system::explain))
        .route("/me/routes", get(system::route_access))
        .nest("/events", events::router())
        .nest("/locations", locations::router())
        .nest("/users", users::router())
}
