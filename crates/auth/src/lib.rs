//! `campusnav-auth`: the campus authorization engine.
//!
//! Pure decision functions over an immutable permission policy: no IO, no
//! global state. The crate has no HTTP or storage dependencies;
//! callers resolve principals and ownership facts and enforce the answers.

pub mod authorize;
pub mod claims;
pub mod guard;
pub mod permissions;
pub mod policy;
pub mod principal;
pub mod roles;

pub use authorize::{ActionOptions, AuthorizationExplanation, AuthzError, DenialKind};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use guard::{GuardOutcome, RouteRequirement, evaluate_guard};
pub use permissions::{Action, ParseKeyError, PermissionKey, ResourceKind, Scope};
pub use policy::{BUILTIN_POLICY, Policy, PolicyDocument, PolicyError};
pub use principal::Principal;
pub use roles::{
    Role, UnknownRole, is_role_higher_or_equal, is_role_higher_or_equal_str, role_display_name,
    role_level,
};
