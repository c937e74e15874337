use serde::Serialize;
use thiserror::Error;

use campusnav_core::{Owned, UserId};

use crate::{Action, PermissionKey, Policy, Principal, ResourceKind, Role};

/// Extra facts about the request that the table lookup depends on.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ActionOptions {
    /// The principal created the target resource.
    pub is_owner: bool,
}

impl ActionOptions {
    pub fn owner() -> Self {
        Self { is_owner: true }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("{} not found", .0.noun())]
    NotFound(ResourceKind),

    #[error("forbidden: not the owner of this {}", .0.noun())]
    NotOwner(ResourceKind),

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(PermissionKey),
}

impl AuthzError {
    /// Denial of an authenticated principal (HTTP 403 territory).
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthzError::NotOwner(_) | AuthzError::Forbidden(_))
    }
}

impl Policy {
    /// May `principal` perform `action` on a resource of kind `resource`?
    ///
    /// - No IO
    /// - No panics
    /// - Admin is allowed everything, including pairs with no table entry
    /// - Everyone else is allowed only what the table grants (fail-closed)
    pub fn can_perform_action(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: ResourceKind,
        options: ActionOptions,
    ) -> bool {
        let Some(role) = principal.and_then(|p| p.role) else {
            return false;
        };
        if role.is_admin() {
            return true;
        }

        let key = PermissionKey::for_action(resource, action, options.is_owner);
        self.has_permission(role, &key)
    }

    /// String form of [`Policy::can_perform_action`].
    ///
    /// Unknown actions or resource kinds have no table entry: they are denied
    /// for everyone except admin.
    pub fn can_perform_action_str(
        &self,
        principal: Option<&Principal>,
        action: &str,
        resource: &str,
        options: ActionOptions,
    ) -> bool {
        let Some(role) = principal.and_then(|p| p.role) else {
            return false;
        };
        if role.is_admin() {
            return true;
        }

        match (action.parse::<Action>(), resource.parse::<ResourceKind>()) {
            (Ok(action), Ok(resource)) => self.can_perform_action(principal, action, resource, options),
            _ => false,
        }
    }

    /// Gate for actions that do not depend on ownership.
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: ResourceKind,
    ) -> Result<(), AuthzError> {
        let principal = principal.ok_or(AuthzError::Unauthenticated)?;

        if self.can_perform_action(Some(principal), action, resource, ActionOptions::default()) {
            Ok(())
        } else {
            Err(AuthzError::Forbidden(PermissionKey::for_action(resource, action, false)))
        }
    }

    /// Ownership-aware gate: the one place that decides "is owner".
    ///
    /// `owner` is the creator of the target resource, or `None` when the
    /// resource does not exist. Checks run in this order:
    ///
    /// 1. missing resource → [`AuthzError::NotFound`]
    /// 2. missing principal → [`AuthzError::Unauthenticated`]
    /// 3. neither owner nor admin → [`AuthzError::NotOwner`]
    /// 4. table check with the ownership fact → [`AuthzError::Forbidden`]
    pub fn authorize_owned(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: ResourceKind,
        owner: Option<&UserId>,
    ) -> Result<(), AuthzError> {
        let (principal, is_owner) = ownership(principal, resource, owner)?;

        let options = ActionOptions { is_owner };
        if self.can_perform_action(Some(principal), action, resource, options) {
            Ok(())
        } else {
            Err(AuthzError::Forbidden(PermissionKey::for_action(resource, action, is_owner)))
        }
    }

    /// [`Policy::authorize_owned`] over a loaded entity.
    pub fn authorize_entity<E: Owned>(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: ResourceKind,
        entity: Option<&E>,
    ) -> Result<(), AuthzError> {
        self.authorize_owned(principal, action, resource, entity.map(|e| e.created_by()))
    }

    /// Admin sees all registrations; organizers only those of events they created.
    pub fn can_view_registrations<E: Owned>(
        &self,
        principal: Option<&Principal>,
        event: Option<&E>,
    ) -> Result<(), AuthzError> {
        self.authorize_entity(principal, Action::ViewRegistrations, ResourceKind::Event, event)
    }

    /// Users may modify their own profile; admin may modify anyone's.
    ///
    /// Editing oneself needs no role grant: any authenticated principal,
    /// including one without a recognised role, may edit their own profile.
    pub fn can_modify_user(
        &self,
        principal: Option<&Principal>,
        target: &UserId,
    ) -> Result<(), AuthzError> {
        // Only the owner or admin get past the ownership check, and admin
        // holds every grant.
        ownership(principal, ResourceKind::User, Some(target)).map(|_| ())
    }
}

/// Existence, authentication and ownership checks shared by the owned gates.
///
/// Returns the principal and whether it created the resource. Admin passes
/// as a non-owner.
fn ownership<'p>(
    principal: Option<&'p Principal>,
    resource: ResourceKind,
    owner: Option<&UserId>,
) -> Result<(&'p Principal, bool), AuthzError> {
    let owner = owner.ok_or(AuthzError::NotFound(resource))?;
    let principal = principal.ok_or(AuthzError::Unauthenticated)?;

    let is_owner = principal.id == *owner;
    if !is_owner && !principal.is_admin() {
        return Err(AuthzError::NotOwner(resource));
    }
    Ok((principal, is_owner))
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Why a [`Policy::can_perform_action`] decision came out the way it did.
///
/// Computed on demand for debugging endpoints; nothing is recorded.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    /// Key consulted in the table (absent for admin bypass and missing roles).
    pub permission: Option<PermissionKey>,

    pub granted: bool,

    pub reason: String,

    pub role: Option<Role>,

    /// Roles the table grants the consulted key to.
    pub granted_to: Vec<Role>,

    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    NoRole,
    UnknownPermission,
    MissingPermission,
}

impl Policy {
    /// Explain the decision [`Policy::can_perform_action`] would make.
    pub fn explain(
        &self,
        principal: Option<&Principal>,
        action: Action,
        resource: ResourceKind,
        options: ActionOptions,
    ) -> AuthorizationExplanation {
        let role = match explained_role(principal) {
            Ok(role) => role,
            Err(explanation) => return explanation,
        };
        if role.is_admin() {
            return admin_bypass(format!("role 'admin' may perform {action} on any {}", resource.noun()));
        }

        let key = PermissionKey::for_action(resource, action, options.is_owner);
        let Some(granted_to) = self.granted_roles(&key) else {
            return denied(
                Some(role),
                Some(key),
                format!("permission '{key}' is not defined; only admin may perform it"),
                Vec::new(),
                DenialKind::UnknownPermission,
            );
        };
        let granted_to: Vec<Role> = granted_to.iter().copied().collect();

        if granted_to.contains(&role) {
            AuthorizationExplanation {
                permission: Some(key),
                granted: true,
                reason: format!("role '{role}' is granted '{key}'"),
                role: Some(role),
                granted_to,
                denial: None,
            }
        } else {
            denied(
                Some(role),
                Some(key),
                format!("role '{role}' is not granted '{key}'"),
                granted_to,
                DenialKind::MissingPermission,
            )
        }
    }

    /// String form of [`Policy::explain`], mirroring [`Policy::can_perform_action_str`].
    ///
    /// Unrecognised action or resource names have no table entry: the
    /// explanation is an admin bypass or an unknown-permission denial.
    pub fn explain_str(
        &self,
        principal: Option<&Principal>,
        action: &str,
        resource: &str,
        options: ActionOptions,
    ) -> AuthorizationExplanation {
        if let (Ok(action), Ok(resource)) = (action.parse::<Action>(), resource.parse::<ResourceKind>()) {
            return self.explain(principal, action, resource, options);
        }

        let role = match explained_role(principal) {
            Ok(role) => role,
            Err(explanation) => return explanation,
        };
        if role.is_admin() {
            return admin_bypass(format!("role 'admin' may perform {action} on {resource}"));
        }
        denied(
            Some(role),
            None,
            format!("action '{action}' on '{resource}' is not defined; only admin may perform it"),
            Vec::new(),
            DenialKind::UnknownPermission,
        )
    }
}

/// The role an explanation is about, or the explanation of why there is none.
fn explained_role(principal: Option<&Principal>) -> Result<Role, AuthorizationExplanation> {
    let Some(principal) = principal else {
        return Err(denied(
            None,
            None,
            "no authenticated principal".to_string(),
            Vec::new(),
            DenialKind::Unauthenticated,
        ));
    };
    principal.role.ok_or_else(|| {
        denied(
            None,
            None,
            format!("principal {} has no recognised role", principal.id),
            Vec::new(),
            DenialKind::NoRole,
        )
    })
}

fn admin_bypass(reason: String) -> AuthorizationExplanation {
    AuthorizationExplanation {
        permission: None,
        granted: true,
        reason,
        role: Some(Role::Admin),
        granted_to: Vec::new(),
        denial: None,
    }
}

fn denied(
    role: Option<Role>,
    permission: Option<PermissionKey>,
    reason: String,
    granted_to: Vec<Role>,
    kind: DenialKind,
) -> AuthorizationExplanation {
    AuthorizationExplanation {
        permission,
        granted: false,
        reason,
        role,
        granted_to,
        denial: Some(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> Policy {
        Policy::builtin().unwrap()
    }

    fn principal(role: Role) -> Principal {
        Principal::with_role(UserId::new(), role)
    }

    struct Event {
        id: u32,
        created_by: UserId,
    }

    impl campusnav_core::Entity for Event {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    impl Owned for Event {
        fn created_by(&self) -> &UserId {
            &self.created_by
        }
    }

    #[test]
    fn missing_principal_or_role_denies() {
        let policy = policy();
        assert!(!policy.can_perform_action(None, Action::View, ResourceKind::Event, ActionOptions::default()));

        let roleless = Principal::new(UserId::new(), None);
        assert!(!policy.can_perform_action(
            Some(&roleless),
            Action::View,
            ResourceKind::Event,
            ActionOptions::default()
        ));
    }

    #[test]
    fn unknown_pairs_deny_non_admins() {
        let policy = policy();
        let student = principal(Role::Student);
        assert!(!policy.can_perform_action_str(Some(&student), "FROB", "WIDGET", ActionOptions::default()));

        let admin = principal(Role::Admin);
        assert!(policy.can_perform_action_str(Some(&admin), "FROB", "WIDGET", ActionOptions::default()));
    }

    #[test]
    fn owner_vs_non_owner_divergence() {
        let policy = policy();
        let organizer = principal(Role::Organizer);

        assert!(policy.can_perform_action(Some(&organizer), Action::Edit, ResourceKind::Event, ActionOptions::owner()));
        assert!(!policy.can_perform_action(
            Some(&organizer),
            Action::Edit,
            ResourceKind::Event,
            ActionOptions::default()
        ));
        assert!(policy.can_perform_action_str(Some(&organizer), "DELETE", "EVENT", ActionOptions::owner()));
        assert!(!policy.can_perform_action_str(Some(&organizer), "DELETE", "EVENT", ActionOptions::default()));
    }

    #[test]
    fn organizers_cannot_manage_locations() {
        let policy = policy();
        let organizer = principal(Role::Organizer);
        for action in [Action::Create, Action::Edit, Action::Delete] {
            assert_eq!(
                policy.authorize(Some(&organizer), action, ResourceKind::Location),
                Err(AuthzError::Forbidden(PermissionKey::new(ResourceKind::Location, action)))
            );
        }
        assert!(policy.authorize(Some(&organizer), Action::View, ResourceKind::Location).is_ok());
    }

    #[test]
    fn authorize_requires_principal() {
        let policy = policy();
        assert_eq!(
            policy.authorize(None, Action::View, ResourceKind::Event),
            Err(AuthzError::Unauthenticated)
        );
    }

    #[test]
    fn ownership_gate_order_of_checks() {
        let policy = policy();
        let owner_id = UserId::new();

        // Missing resource wins over missing principal.
        assert_eq!(
            policy.authorize_owned(None, Action::Edit, ResourceKind::Event, None),
            Err(AuthzError::NotFound(ResourceKind::Event))
        );
        assert_eq!(
            policy.authorize_owned(None, Action::Edit, ResourceKind::Event, Some(&owner_id)),
            Err(AuthzError::Unauthenticated)
        );

        let stranger = principal(Role::Organizer);
        assert_eq!(
            policy.authorize_owned(Some(&stranger), Action::Edit, ResourceKind::Event, Some(&owner_id)),
            Err(AuthzError::NotOwner(ResourceKind::Event))
        );

        let owner = Principal::with_role(owner_id, Role::Organizer);
        assert_eq!(
            policy.authorize_owned(Some(&owner), Action::Edit, ResourceKind::Event, Some(&owner_id)),
            Ok(())
        );

        let admin = principal(Role::Admin);
        assert_eq!(
            policy.authorize_owned(Some(&admin), Action::Delete, ResourceKind::Event, Some(&owner_id)),
            Ok(())
        );
    }

    #[test]
    fn owning_student_still_needs_the_own_grant() {
        let policy = policy();
        let id = UserId::new();
        let student = Principal::with_role(id, Role::Student);
        assert_eq!(
            policy.authorize_owned(Some(&student), Action::Edit, ResourceKind::Event, Some(&id)),
            Err(AuthzError::Forbidden(PermissionKey::own(ResourceKind::Event, Action::Edit)))
        );
    }

    #[test]
    fn authorize_entity_uses_created_by() {
        let policy = policy();
        let organizer = principal(Role::Organizer);
        let mine = Event {
            id: 1,
            created_by: organizer.id,
        };
        let theirs = Event {
            id: 2,
            created_by: UserId::new(),
        };

        assert!(policy.authorize_entity(Some(&organizer), Action::Delete, ResourceKind::Event, Some(&mine)).is_ok());
        assert!(
            policy
                .authorize_entity(Some(&organizer), Action::Delete, ResourceKind::Event, Some(&theirs))
                .unwrap_err()
                .is_forbidden()
        );
        assert_eq!(
            policy.authorize_entity::<Event>(Some(&organizer), Action::Delete, ResourceKind::Event, None),
            Err(AuthzError::NotFound(ResourceKind::Event))
        );
    }

    #[test]
    fn registration_visibility() {
        let policy = policy();
        let organizer = principal(Role::Organizer);
        let event_by = |created_by| Event { id: 7, created_by };
        let theirs = event_by(UserId::new());

        assert!(policy.can_view_registrations(Some(&organizer), Some(&event_by(organizer.id))).is_ok());
        assert_eq!(
            policy.can_view_registrations(Some(&organizer), Some(&theirs)),
            Err(AuthzError::NotOwner(ResourceKind::Event))
        );
        assert!(policy.can_view_registrations(Some(&principal(Role::Admin)), Some(&theirs)).is_ok());
        assert_eq!(
            policy.can_view_registrations::<Event>(Some(&organizer), None),
            Err(AuthzError::NotFound(ResourceKind::Event))
        );

        // A student who somehow created an event is still not an organizer.
        let student = principal(Role::Student);
        assert!(
            policy
                .can_view_registrations(Some(&student), Some(&event_by(student.id)))
                .unwrap_err()
                .is_forbidden()
        );
    }

    #[test]
    fn users_modify_only_themselves_unless_admin() {
        let policy = policy();
        let student = principal(Role::Student);
        let someone = UserId::new();

        assert!(policy.can_modify_user(Some(&student), &student.id).is_ok());
        assert_eq!(
            policy.can_modify_user(Some(&student), &someone),
            Err(AuthzError::NotOwner(ResourceKind::User))
        );
        assert!(policy.can_modify_user(Some(&principal(Role::Admin)), &someone).is_ok());
        assert_eq!(policy.can_modify_user(None, &someone), Err(AuthzError::Unauthenticated));
    }

    #[test]
    fn roleless_principals_may_still_edit_themselves() {
        let policy = policy();
        let roleless = Principal::new(UserId::new(), None);

        assert!(policy.can_modify_user(Some(&roleless), &roleless.id).is_ok());
        assert_eq!(
            policy.can_modify_user(Some(&roleless), &UserId::new()),
            Err(AuthzError::NotOwner(ResourceKind::User))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(AuthzError::NotFound(ResourceKind::Event).to_string(), "event not found");
        assert_eq!(
            AuthzError::Forbidden(PermissionKey::own(ResourceKind::Event, Action::Edit)).to_string(),
            "forbidden: missing permission 'EVENT_EDIT_OWN'"
        );
    }

    #[test]
    fn explanation_reports_denial_kind() {
        let policy = policy();

        let e = policy.explain(None, Action::View, ResourceKind::Event, ActionOptions::default());
        assert_eq!(e.denial, Some(DenialKind::Unauthenticated));

        let roleless = Principal::new(UserId::new(), None);
        let e = policy.explain(Some(&roleless), Action::View, ResourceKind::Event, ActionOptions::default());
        assert_eq!(e.denial, Some(DenialKind::NoRole));

        let student = principal(Role::Student);
        let e = policy.explain(Some(&student), Action::Edit, ResourceKind::Event, ActionOptions::default());
        assert_eq!(e.denial, Some(DenialKind::UnknownPermission));
        assert_eq!(e.permission.map(|k| k.to_string()).as_deref(), Some("EVENT_EDIT"));

        let e = policy.explain(Some(&student), Action::Create, ResourceKind::Event, ActionOptions::default());
        assert_eq!(e.denial, Some(DenialKind::MissingPermission));
        assert_eq!(e.granted_to, vec![Role::Organizer, Role::Admin]);

        let e = policy.explain(Some(&principal(Role::Admin)), Action::ChangeRole, ResourceKind::Event, ActionOptions::default());
        assert!(e.granted);
        assert!(e.permission.is_none());
    }

    #[test]
    fn string_explanations_cover_unknown_pairs() {
        let policy = policy();
        let student = principal(Role::Student);

        let e = policy.explain_str(Some(&student), "FROB", "WIDGET", ActionOptions::default());
        assert!(!e.granted);
        assert_eq!(e.denial, Some(DenialKind::UnknownPermission));
        assert!(e.permission.is_none());

        let e = policy.explain_str(Some(&principal(Role::Admin)), "FROB", "WIDGET", ActionOptions::default());
        assert!(e.granted);

        let e = policy.explain_str(Some(&student), "REGISTER", "EVENT", ActionOptions::default());
        assert!(e.granted);
        assert_eq!(e.permission.map(|k| k.to_string()).as_deref(), Some("EVENT_REGISTER"));

        let e = policy.explain_str(None, "FROB", "WIDGET", ActionOptions::default());
        assert_eq!(e.denial, Some(DenialKind::Unauthenticated));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn role_strategy() -> impl Strategy<Value = Role> {
            prop::sample::select(Role::ALL.to_vec())
        }

        fn action_strategy() -> impl Strategy<Value = Action> {
            prop::sample::select(Action::ALL.to_vec())
        }

        fn resource_strategy() -> impl Strategy<Value = ResourceKind> {
            prop::sample::select(ResourceKind::ALL.to_vec())
        }

        fn key_strategy() -> impl Strategy<Value = PermissionKey> {
            let scope = prop::sample::select(vec![
                crate::Scope::Unqualified,
                crate::Scope::Own,
                crate::Scope::Any,
            ]);
            (resource_strategy(), action_strategy(), scope).prop_map(|(resource, action, scope)| {
                PermissionKey {
                    resource,
                    action,
                    scope,
                }
            })
        }

        fn role_name_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                role_strategy().prop_map(|r| r.as_str().to_string()),
                "[a-z]{0,10}",
            ]
        }

        fn key_name_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                key_strategy().prop_map(|k| k.to_string()),
                "[A-Z_]{0,24}",
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1024,
                ..ProptestConfig::default()
            })]

            #[test]
            fn fail_closed_on_missing_inputs(role in role_name_strategy(), key in key_name_strategy()) {
                let policy = policy();
                prop_assert!(!policy.has_permission_str(None, Some(&key)));
                prop_assert!(!policy.has_permission_str(Some(&role), None));
            }

            #[test]
            fn admin_bypass_is_absolute(
                action in action_strategy(),
                resource in resource_strategy(),
                is_owner in any::<bool>(),
                raw_action in "[A-Z_]{0,16}",
                raw_resource in "[A-Z]{0,10}",
            ) {
                let policy = policy();
                let admin = principal(Role::Admin);
                let options = ActionOptions { is_owner };
                prop_assert!(policy.can_perform_action(Some(&admin), action, resource, options));
                prop_assert!(policy.can_perform_action_str(Some(&admin), &raw_action, &raw_resource, options));
            }

            #[test]
            fn unknown_pairs_deny_non_admins(
                role in prop::sample::select(vec![Role::Student, Role::Organizer]),
                raw_action in "[A-Z]{1,12}",
                raw_resource in "[A-Z]{1,12}",
                is_owner in any::<bool>(),
            ) {
                prop_assume!(raw_resource.parse::<ResourceKind>().is_err() || raw_action.parse::<Action>().is_err());
                let policy = policy();
                let p = principal(role);
                let options = ActionOptions { is_owner };
                prop_assert!(!policy.can_perform_action_str(Some(&p), &raw_action, &raw_resource, options));
            }

            #[test]
            fn ownership_only_matters_for_edit_and_delete(
                role in role_strategy(),
                action in action_strategy(),
                resource in resource_strategy(),
            ) {
                prop_assume!(!action.has_own_variant());
                let policy = policy();
                let p = principal(role);
                prop_assert_eq!(
                    policy.can_perform_action(Some(&p), action, resource, ActionOptions::owner()),
                    policy.can_perform_action(Some(&p), action, resource, ActionOptions::default())
                );
            }

            #[test]
            fn role_hierarchy_is_reflexive_and_ordered(a in role_strategy(), b in role_strategy()) {
                prop_assert!(crate::is_role_higher_or_equal(Some(a), Some(a)));
                prop_assert_eq!(
                    crate::is_role_higher_or_equal(Some(a), Some(b)),
                    a.level() >= b.level()
                );
                prop_assert!(
                    crate::is_role_higher_or_equal(Some(a), Some(b))
                        || crate::is_role_higher_or_equal(Some(b), Some(a))
                );
            }

            #[test]
            fn role_permissions_agree_with_has_permission(role in role_strategy(), key in key_strategy()) {
                let policy = policy();
                prop_assert_eq!(
                    policy.role_permissions(Some(role)).contains(&key),
                    policy.has_permission(role, &key)
                );
            }

            #[test]
            fn explanation_agrees_with_decision(
                role in prop::option::of(role_strategy()),
                action in action_strategy(),
                resource in resource_strategy(),
                is_owner in any::<bool>(),
            ) {
                let policy = policy();
                let p = Principal::new(UserId::new(), role);
                let options = ActionOptions { is_owner };
                prop_assert_eq!(
                    policy.explain(Some(&p), action, resource, options).granted,
                    policy.can_perform_action(Some(&p), action, resource, options)
                );
            }

            #[test]
            fn string_explanation_agrees_with_string_decision(
                role in prop::option::of(role_strategy()),
                raw_action in prop_oneof![action_strategy().prop_map(|a| a.as_str().to_string()), "[A-Z_]{0,12}"],
                raw_resource in prop_oneof![resource_strategy().prop_map(|r| r.as_str().to_string()), "[A-Z]{0,10}"],
                is_owner in any::<bool>(),
            ) {
                let policy = policy();
                let p = Principal::new(UserId::new(), role);
                let options = ActionOptions { is_owner };
                prop_assert_eq!(
                    policy.explain_str(Some(&p), &raw_action, &raw_resource, options).granted,
                    policy.can_perform_action_str(Some(&p), &raw_action, &raw_resource, options)
                );
            }

            #[test]
            fn decisions_are_deterministic(
                role in prop::option::of(role_strategy()),
                action in action_strategy(),
                resource in resource_strategy(),
                is_owner in any::<bool>(),
                key in key_strategy(),
            ) {
                let policy = policy();
                let p = Principal::new(UserId::new(), role);
                let options = ActionOptions { is_owner };

                let first = policy.can_perform_action(Some(&p), action, resource, options);
                let first_perms = policy.role_permissions(role);
                let first_has = role.map(|r| policy.has_permission(r, &key));
                for _ in 0..8 {
                    prop_assert_eq!(policy.can_perform_action(Some(&p), action, resource, options), first);
                    prop_assert_eq!(&policy.role_permissions(role), &first_perms);
                    prop_assert_eq!(role.map(|r| policy.has_permission(r, &key)), first_has);
                }
            }
        }
    }
}
