use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use campusnav_auth::{Action, ResourceKind};
use campusnav_core::{DomainError, EventId};

use crate::app::dto::{self, CreateEventRequest, EventResponse, RegistrationEntry, UpdateEventRequest};
use crate::app::errors;
use crate::app::models::EventRecord;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;
use crate::store::Store;

const INVALID_ID: &str = "Invalid event ID";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/:id/register", post(register))
        .route("/:id/registrations", get(registrations))
}

pub async fn list_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::View, ResourceKind::Event) {
        return resp;
    }

    let mut events: Vec<EventRecord> = services.events.list();
    events.sort_by_key(|e| e.starts_at);
    let items: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    errors::json_ok(StatusCode::OK, items)
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::View, ResourceKind::Event) {
        return resp;
    }
    let id: EventId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.events.get(&id) {
        Some(event) => errors::json_ok(StatusCode::OK, EventResponse::from(event)),
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Event)),
    }
}

pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::Create, ResourceKind::Event) {
        return resp;
    }
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    if let Err(e) = dto::validate_title(&body.title).and_then(|()| validate_location(&services, body.location_id.as_ref())) {
        return errors::domain_error_to_response(e);
    }

    let event = EventRecord {
        id: EventId::new(),
        title: body.title.trim().to_string(),
        description: body.description,
        location_id: body.location_id,
        starts_at: body.starts_at,
        created_by: principal.user_id(),
        registrations: Default::default(),
        created_at: Utc::now(),
    };
    services.events.upsert(event.id, event.clone());

    tracing::info!(event_id = %event.id, created_by = %event.created_by, "event created");
    errors::json_ok(StatusCode::CREATED, EventResponse::from(event))
}

pub async fn update_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let event = services.events.get(&id);
    if let Err(resp) = authz::require_entity(
        &services.policy,
        &principal,
        Action::Edit,
        ResourceKind::Event,
        event.as_ref(),
    ) {
        return resp;
    }

    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    if let Some(title) = &body.title {
        if let Err(e) = dto::validate_title(title) {
            return errors::domain_error_to_response(e);
        }
    }
    if let Err(e) = validate_location(&services, body.location_id.as_ref()) {
        return errors::domain_error_to_response(e);
    }

    let updated = services.events.update(&id, |event| {
        if let Some(title) = body.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = body.description {
            event.description = Some(description);
        }
        if let Some(location_id) = body.location_id {
            event.location_id = Some(location_id);
        }
        if let Some(starts_at) = body.starts_at {
            event.starts_at = starts_at;
        }
        event.clone()
    });

    match updated {
        Some(event) => errors::json_ok(StatusCode::OK, EventResponse::from(event)),
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Event)),
    }
}

pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let event = services.events.get(&id);
    if let Err(resp) = authz::require_entity(
        &services.policy,
        &principal,
        Action::Delete,
        ResourceKind::Event,
        event.as_ref(),
    ) {
        return resp;
    }

    match services.events.remove(&id) {
        Some(event) => {
            tracing::info!(event_id = %event.id, deleted_by = %principal.user_id(), "event deleted");
            errors::json_ok(StatusCode::OK, serde_json::json!({ "id": event.id }))
        }
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Event)),
    }
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&services.policy, &principal, Action::Register, ResourceKind::Event) {
        return resp;
    }
    let id: EventId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let user_id = principal.user_id();
    match services.events.update(&id, |event| event.registrations.insert(user_id)) {
        Some(true) => errors::json_ok(
            StatusCode::CREATED,
            serde_json::json!({ "event_id": id, "user_id": user_id }),
        ),
        Some(false) => errors::domain_error_to_response(DomainError::conflict(
            "Already registered for this event",
        )),
        None => errors::json_error(StatusCode::NOT_FOUND, authz::not_found_message(ResourceKind::Event)),
    }
}

pub async fn registrations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match errors::parse_id(&id, INVALID_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let event = services.events.get(&id);
    if let Err(resp) = authz::require_registrations_view(&services.policy, &principal, event.as_ref()) {
        return resp;
    }

    let entries: Vec<RegistrationEntry> = event
        .map(|e| e.registrations)
        .unwrap_or_default()
        .into_iter()
        .map(|user_id| RegistrationEntry::new(user_id, services.users.get(&user_id)))
        .collect();
    errors::json_ok(StatusCode::OK, entries)
}

fn validate_location(
    services: &AppServices,
    location_id: Option<&campusnav_core::LocationId>,
) -> Result<(), DomainError> {
    match location_id {
        Some(id) if services.locations.get(id).is_none() => {
            Err(DomainError::validation(format!("Unknown location {id}")))
        }
        _ => Ok(()),
    }
}
