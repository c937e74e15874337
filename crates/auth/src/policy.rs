//! Permission policy: the shared, data-described grant table.
//!
//! The policy document (`policy/permissions.json`) is the single source of
//! truth for which role may exercise which permission key. It is embedded into
//! this crate and served verbatim to clients so UI gating and service-side
//! enforcement read the same vocabulary.
//!
//! The document lists non-admin grants only. Admin is granted every key when
//! the table is built, and decision functions bypass the table for admin.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PermissionKey, Role};

/// The policy document shipped with the crate.
pub const BUILTIN_POLICY: &str = include_str!("../policy/permissions.json");

/// Serialized form of the policy, shared with clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub version: u32,
    pub permissions: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("policy document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown permission key '{0}'")]
    UnknownKey(String),

    #[error("permission key '{0}' is missing from the policy")]
    MissingKey(PermissionKey),

    #[error("unknown role '{role}' granted '{key}'")]
    UnknownRole { key: String, role: String },

    #[error("'{0}' lists admin explicitly; admin is granted every permission implicitly")]
    RedundantAdminGrant(PermissionKey),
}

/// Immutable permission table.
///
/// Built once at process start and shared read-only (`Arc<Policy>`); there is
/// no mutation path after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    version: u32,
    grants: BTreeMap<PermissionKey, BTreeSet<Role>>,
}

impl Policy {
    /// Load the embedded policy document.
    pub fn builtin() -> Result<Self, PolicyError> {
        Self::from_json(BUILTIN_POLICY)
    }

    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let doc: PolicyDocument = serde_json::from_str(json)?;
        Self::from_document(&doc)
    }

    /// Validate a policy document and build the table.
    ///
    /// Every key in [`PermissionKey::VOCABULARY`] must appear exactly once and
    /// nothing else may appear.
    pub fn from_document(doc: &PolicyDocument) -> Result<Self, PolicyError> {
        let mut grants: BTreeMap<PermissionKey, BTreeSet<Role>> = BTreeMap::new();

        for (name, roles) in &doc.permissions {
            let key: PermissionKey = name
                .parse()
                .map_err(|_| PolicyError::UnknownKey(name.clone()))?;
            if !key.is_in_vocabulary() {
                return Err(PolicyError::UnknownKey(name.clone()));
            }

            let mut granted = BTreeSet::new();
            for role in roles {
                let role: Role = role.parse().map_err(|_| PolicyError::UnknownRole {
                    key: name.clone(),
                    role: role.clone(),
                })?;
                if role.is_admin() {
                    return Err(PolicyError::RedundantAdminGrant(key));
                }
                granted.insert(role);
            }
            granted.insert(Role::Admin);

            grants.insert(key, granted);
        }

        if let Some(missing) = PermissionKey::VOCABULARY
            .into_iter()
            .find(|k| !grants.contains_key(k))
        {
            return Err(PolicyError::MissingKey(missing));
        }

        tracing::debug!(version = doc.version, keys = grants.len(), "permission policy loaded");

        Ok(Self {
            version: doc.version,
            grants,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Document form of this policy (admin grants omitted, as in the source).
    pub fn document(&self) -> PolicyDocument {
        let permissions = self
            .grants
            .iter()
            .map(|(key, roles)| {
                let roles = roles
                    .iter()
                    .filter(|r| !r.is_admin())
                    .map(|r| r.as_str().to_string())
                    .collect();
                (key.to_string(), roles)
            })
            .collect();

        PolicyDocument {
            version: self.version,
            permissions,
        }
    }

    /// Roles granted `key`, or `None` if the key is not in the table.
    pub fn granted_roles(&self, key: &PermissionKey) -> Option<&BTreeSet<Role>> {
        self.grants.get(key)
    }

    /// Whether `role` is in the grant set of `key`.
    ///
    /// Keys that are not in the table are never granted.
    pub fn has_permission(&self, role: Role, key: &PermissionKey) -> bool {
        self.grants.get(key).is_some_and(|roles| roles.contains(&role))
    }

    /// String form of [`Policy::has_permission`].
    ///
    /// Absent, empty or unrecognised inputs are a normal "not permitted"
    /// outcome, never an error.
    pub fn has_permission_str(&self, role: Option<&str>, key: Option<&str>) -> bool {
        let (Some(role), Some(key)) = (role.and_then(Role::parse), key) else {
            return false;
        };
        key.parse::<PermissionKey>()
            .is_ok_and(|key| self.has_permission(role, &key))
    }

    /// All keys granted to `role` (empty when the role is absent).
    pub fn role_permissions(&self, role: Option<Role>) -> BTreeSet<PermissionKey> {
        let Some(role) = role else {
            return BTreeSet::new();
        };
        self.grants
            .iter()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(key, _)| *key)
            .collect()
    }

    /// String form of [`Policy::role_permissions`].
    pub fn role_permissions_str(&self, role: Option<&str>) -> BTreeSet<PermissionKey> {
        self.role_permissions(role.and_then(Role::parse))
    }
}
