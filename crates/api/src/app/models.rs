//! Campus records held by the service stores.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use campusnav_auth::Role;
use campusnav_core::{Entity, EventId, LocationId, Owned, UserId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub location_id: Option<LocationId>,
    pub starts_at: DateTime<Utc>,
    pub created_by: UserId,
    /// Omitted from public listings; served via the registrations endpoint.
    #[serde(skip)]
    pub registrations: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }
}

impl Entity for EventRecord {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Owned for EventRecord {
    fn created_by(&self) -> &UserId {
        &self.created_by
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub created_by: UserId,
}

/// Profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<Role>,
}
