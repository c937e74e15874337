use serde::{Deserialize, Serialize};

use campusnav_core::UserId;

use crate::Role;

/// A fully resolved principal for authorization decisions.
///
/// Produced once per request by the authentication layer; never mutated by
/// the engine. A principal may carry no recognised role (e.g. an account whose
/// stored role is missing or unknown), in which case every table check denies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Option<Role>,
}

impl Principal {
    pub fn new(id: UserId, role: Option<Role>) -> Self {
        Self { id, role }
    }

    pub fn with_role(id: UserId, role: Role) -> Self {
        Self {
            id,
            role: Some(role),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_some_and(|r| r.is_admin())
    }
}
