use std::sync::Arc;

use campusnav_auth::Policy;
use campusnav_core::{EventId, LocationId, UserId};

use crate::app::models::{EventRecord, LocationRecord, UserRecord};
use crate::store::InMemoryStore;

/// Shared state handed to every protected handler.
#[derive(Debug)]
pub struct AppServices {
    pub policy: Arc<Policy>,
    pub events: InMemoryStore<EventId, EventRecord>,
    pub locations: InMemoryStore<LocationId, LocationRecord>,
    pub users: InMemoryStore<UserId, UserRecord>,
}

pub fn build_services(policy: Arc<Policy>) -> AppServices {
    AppServices {
        policy,
        events: InMemoryStore::new(),
        locations: InMemoryStore::new(),
        users: InMemoryStore::new(),
    }
}
