use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role identifier used for RBAC.
///
/// The set is closed: roles are not user-extensible at runtime. Roles are
/// totally ordered by privilege level (`admin > organizer > student`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Organizer,
    Admin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Organizer, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }

    /// Hierarchy level. Higher means more privileges.
    pub fn level(&self) -> u8 {
        match self {
            Role::Student => 1,
            Role::Organizer => 2,
            Role::Admin => 3,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Organizer => "Event Organizer",
            Role::Admin => "Administrator",
        }
    }

    /// Lenient parse for untrusted input: unknown names mean "no role".
    pub fn parse(s: &str) -> Option<Role> {
        s.parse().ok()
    }

    pub fn is_higher_or_equal(&self, other: Role) -> bool {
        self.level() >= other.level()
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "organizer" => Ok(Role::Organizer),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level of a possibly-absent role (`0` when absent).
pub fn role_level(role: Option<Role>) -> u8 {
    role.map_or(0, |r| r.level())
}

/// Rank comparison for display logic; not an authorization decision.
pub fn is_role_higher_or_equal(role1: Option<Role>, role2: Option<Role>) -> bool {
    role_level(role1) >= role_level(role2)
}

/// String form of [`is_role_higher_or_equal`]. Unknown names rank as `0`.
pub fn is_role_higher_or_equal_str(role1: &str, role2: &str) -> bool {
    is_role_higher_or_equal(Role::parse(role1), Role::parse(role2))
}

/// Display name for a possibly-absent role.
pub fn role_display_name(role: Option<Role>) -> &'static str {
    role.map_or("User", |r| r.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_levels() {
        assert_eq!(Role::Admin.level(), 3);
        assert_eq!(Role::Organizer.level(), 2);
        assert_eq!(Role::Student.level(), 1);
        assert_eq!(role_level(None), 0);
    }

    #[test]
    fn higher_or_equal_examples() {
        for role in Role::ALL {
            assert!(role.is_higher_or_equal(role));
        }
        assert!(is_role_higher_or_equal_str("admin", "organizer"));
        assert!(!is_role_higher_or_equal_str("student", "organizer"));
        assert!(is_role_higher_or_equal_str("student", "user"));
        assert!(is_role_higher_or_equal_str("", "nobody"));
        assert!(!is_role_higher_or_equal_str("nobody", "student"));
    }

    #[test]
    fn parse_is_case_sensitive_and_closed() {
        assert_eq!(Role::parse("organizer"), Some(Role::Organizer));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("user"), None);
        assert_eq!("superuser".parse::<Role>(), Err(UnknownRole("superuser".into())));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Role::Organizer).unwrap();
        assert_eq!(json, "\"organizer\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn display_names() {
        assert_eq!(role_display_name(Some(Role::Admin)), "Administrator");
        assert_eq!(role_display_name(Some(Role::Organizer)), "Event Organizer");
        assert_eq!(role_display_name(None), "User");
    }
}
