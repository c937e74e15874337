use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campusnav_auth::{PermissionKey, Role, role_display_name};
use campusnav_core::{DomainError, DomainResult, LocationId, UserId};

use crate::app::models::{EventRecord, UserRecord};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location_id: Option<LocationId>,
    pub starts_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location_id: Option<LocationId>,
    pub starts_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

/// Query of `GET /me/explain`.
///
/// Names are kept raw: unknown ones are explained, not rejected.
#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub action: String,
    pub resource: String,
    #[serde(default)]
    pub is_owner: bool,
}

// -------------------------
// Validation
// -------------------------

pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("Event title is required"));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Name is required"));
    }
    Ok(())
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> DomainResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(DomainError::validation("Latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(DomainError::validation("Longitude must be between -180 and 180"));
    }
    Ok(())
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
    pub role: Option<Role>,
    pub role_display_name: &'static str,
    pub permissions: Vec<PermissionKey>,
}

impl MeResponse {
    pub fn new(id: UserId, role: Option<Role>, permissions: impl IntoIterator<Item = PermissionKey>) -> Self {
        Self {
            id,
            role,
            role_display_name: role_display_name(role),
            permissions: permissions.into_iter().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: EventRecord,
    pub registration_count: usize,
}

impl From<EventRecord> for EventResponse {
    fn from(event: EventRecord) -> Self {
        let registration_count = event.registration_count();
        Self {
            event,
            registration_count,
        }
    }
}

/// One entry of an event's registration list.
#[derive(Debug, Serialize)]
pub struct RegistrationEntry {
    pub user_id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl RegistrationEntry {
    pub fn new(user_id: UserId, profile: Option<UserRecord>) -> Self {
        let (name, email) = match profile {
            Some(p) => (Some(p.name), p.email),
            None => (None, None),
        };
        Self { user_id, name, email }
    }
}
