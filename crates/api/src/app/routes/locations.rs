use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use campusnav_auth::{Action, ResourceKind};
use campusnav_core::LocationId;

use crate::app::dto::{self, CreateLocationRequest, UpdateLocationRequest};
use crate::app::errors;
use crate::app::models::LocationRecord;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;
use crate::store::Store;

const INVALID_ID: &str = "Invalid location ID";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route(
            "/:id",
            get(get_location).put(update_location).delete(delete_location),
        )
}

pub async fn list_locations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::View, ResourceKind::Location) {
        return resp;
    }

    let mut items = services.locations.list();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    errors::json_ok(StatusCode::OK, items)
}

pub async fn get_location(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::View, ResourceKind::Location) {
        return resp;
    }
    let id: LocationId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.locations.get(&id) {
        Some(location) => errors::json_ok(StatusCode::OK, location),
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Location)),
    }
}

pub async fn create_location(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<CreateLocationRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::Create, ResourceKind::Location) {
        return resp;
    }
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    if let Err(e) = dto::validate_name(&body.name)
        .and_then(|()| dto::validate_coordinates(body.latitude, body.longitude))
    {
        return errors::domain_error_to_response(e);
    }

    let location = LocationRecord {
        id: LocationId::new(),
        name: body.name.trim().to_string(),
        category: body.category,
        latitude: body.latitude,
        longitude: body.longitude,
        description: body.description,
        created_by: principal.user_id(),
    };
    services.locations.upsert(location.id, location.clone());

    tracing::info!(location_id = %location.id, "location created");
    errors::json_ok(StatusCode::CREATED, location)
}

pub async fn update_location(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateLocationRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::Edit, ResourceKind::Location) {
        return resp;
    }
    let id: LocationId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let Some(current) = services.locations.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Location));
    };
    let name = body.name.unwrap_or(current.name);
    let latitude = body.latitude.unwrap_or(current.latitude);
    let longitude = body.longitude.unwrap_or(current.longitude);
    if let Err(e) = dto::validate_name(&name).and_then(|()| dto::validate_coordinates(latitude, longitude)) {
        return errors::domain_error_to_response(e);
    }

    let updated = services.locations.update(&id, |location| {
        location.name = name.trim().to_string();
        location.latitude = latitude;
        location.longitude = longitude;
        if let Some(category) = body.category {
            location.category = Some(category);
        }
        if let Some(description) = body.description {
            location.description = Some(description);
        }
        location.clone()
    });

    match updated {
        Some(location) => errors::json_ok(StatusCode::OK, location),
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Location)),
    }
}

pub async fn delete_location(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::Delete, ResourceKind::Location) {
        return resp;
    }
    let id: LocationId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.locations.remove(&id) {
        Some(location) => errors::json_ok(StatusCode::OK, serde_json::json!({ "id": location.id })),
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Location)),
    }
}
