use campusnav_auth::{Principal, Role};
use campusnav_core::UserId;

/// Principal context for a request (authenticated identity + role).
///
/// Inserted by the auth middleware; immutable for the rest of the request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_id(&self) -> UserId {
        self.principal.id
    }

    pub fn role(&self) -> Option<Role> {
        self.principal.role
    }
}
