use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of resource an action targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Event,
    Location,
    User,
}

/// Action requested on a resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Register,
    ViewRegistrations,
    ViewAll,
    ChangeRole,
}

/// Ownership qualifier of a permission key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Scope {
    /// `RESOURCE_ACTION`
    #[default]
    Unqualified,
    /// `RESOURCE_ACTION_OWN`: only on resources the principal created.
    Own,
    /// `RESOURCE_ACTION_ANY`: on any resource of the kind.
    Any,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("unknown resource kind '{0}'")]
    UnknownResource(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("malformed permission key '{0}'")]
    Malformed(String),
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Event, ResourceKind::Location, ResourceKind::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Event => "EVENT",
            ResourceKind::Location => "LOCATION",
            ResourceKind::User => "USER",
        }
    }

    /// Lowercase noun used in user-facing messages.
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Event => "event",
            ResourceKind::Location => "location",
            ResourceKind::User => "user",
        }
    }
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Register,
        Action::ViewRegistrations,
        Action::ViewAll,
        Action::ChangeRole,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "VIEW",
            Action::Create => "CREATE",
            Action::Edit => "EDIT",
            Action::Delete => "DELETE",
            Action::Register => "REGISTER",
            Action::ViewRegistrations => "VIEW_REGISTRATIONS",
            Action::ViewAll => "VIEW_ALL",
            Action::ChangeRole => "CHANGE_ROLE",
        }
    }

    /// Whether ownership rewrites this action to its `_OWN` key.
    ///
    /// Only `EDIT` and `DELETE` have ownership-qualified variants.
    pub fn has_own_variant(&self) -> bool {
        matches!(self, Action::Edit | Action::Delete)
    }
}

impl FromStr for ResourceKind {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseKeyError::UnknownResource(s.to_string()))
    }
}

impl FromStr for Action {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseKeyError::UnknownAction(s.to_string()))
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission identifier: a `(resource, action, scope)` triple.
///
/// The canonical string form is `RESOURCE_ACTION` with an optional `_OWN` or
/// `_ANY` suffix (e.g. `EVENT_EDIT_OWN`). Any triple can be represented; only
/// the keys in [`PermissionKey::VOCABULARY`] can ever be granted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionKey {
    pub resource: ResourceKind,
    pub action: Action,
    pub scope: Scope,
}

impl PermissionKey {
    pub const fn new(resource: ResourceKind, action: Action) -> Self {
        Self {
            resource,
            action,
            scope: Scope::Unqualified,
        }
    }

    pub const fn own(resource: ResourceKind, action: Action) -> Self {
        Self {
            resource,
            action,
            scope: Scope::Own,
        }
    }

    pub const fn any(resource: ResourceKind, action: Action) -> Self {
        Self {
            resource,
            action,
            scope: Scope::Any,
        }
    }

    /// Key consulted for `action` on `resource`.
    ///
    /// Owners of a resource are checked against the `_OWN` key for actions
    /// that have one; every other request uses the unqualified key.
    pub fn for_action(resource: ResourceKind, action: Action, is_owner: bool) -> Self {
        if is_owner && action.has_own_variant() {
            Self::own(resource, action)
        } else {
            Self::new(resource, action)
        }
    }

    /// The closed set of grantable permission keys.
    pub const VOCABULARY: [PermissionKey; 17] = [
        PermissionKey::new(ResourceKind::Event, Action::View),
        PermissionKey::new(ResourceKind::Event, Action::Create),
        PermissionKey::own(ResourceKind::Event, Action::Edit),
        PermissionKey::any(ResourceKind::Event, Action::Edit),
        PermissionKey::own(ResourceKind::Event, Action::Delete),
        PermissionKey::any(ResourceKind::Event, Action::Delete),
        PermissionKey::new(ResourceKind::Event, Action::Register),
        PermissionKey::new(ResourceKind::Event, Action::ViewRegistrations),
        PermissionKey::new(ResourceKind::Location, Action::View),
        PermissionKey::new(ResourceKind::Location, Action::Create),
        PermissionKey::new(ResourceKind::Location, Action::Edit),
        PermissionKey::new(ResourceKind::Location, Action::Delete),
        PermissionKey::new(ResourceKind::User, Action::ViewAll),
        PermissionKey::own(ResourceKind::User, Action::Edit),
        PermissionKey::any(ResourceKind::User, Action::Edit),
        PermissionKey::any(ResourceKind::User, Action::Delete),
        PermissionKey::new(ResourceKind::User, Action::ChangeRole),
    ];

    pub fn is_in_vocabulary(&self) -> bool {
        Self::VOCABULARY.contains(self)
    }
}

impl core::fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}_{}", self.resource, self.action)?;
        match self.scope {
            Scope::Unqualified => Ok(()),
            Scope::Own => f.write_str("_OWN"),
            Scope::Any => f.write_str("_ANY"),
        }
    }
}

impl FromStr for PermissionKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, rest) = s
            .split_once('_')
            .ok_or_else(|| ParseKeyError::Malformed(s.to_string()))?;
        let resource: ResourceKind = resource.parse()?;

        for (suffix, scope) in [("_OWN", Scope::Own), ("_ANY", Scope::Any)] {
            if let Some(action) = rest.strip_suffix(suffix) {
                if let Ok(action) = action.parse::<Action>() {
                    return Ok(Self {
                        resource,
                        action,
                        scope,
                    });
                }
            }
        }

        Ok(Self::new(resource, rest.parse()?))
    }
}

impl TryFrom<String> for PermissionKey {
    type Error = ParseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PermissionKey> for String {
    fn from(value: PermissionKey) -> Self {
        value.to_string()
    }
}
