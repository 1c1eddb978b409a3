//! Central authorization policy.
//!
//! Every handler consults [`can`] instead of comparing role strings inline,
//! so the rules cannot drift between endpoints.

use crate::models::Role;

use super::AuthUser;

/// An action an actor may attempt, with the resource context needed to
/// decide ownership.
#[derive(Debug)]
pub enum Action<'a> {
    /// List user accounts (without credentials).
    ListUsers,
    /// Create, edit, or delete user accounts.
    ManageUsers,
    /// Register a new zone.
    CreateZone,
    /// Record a status update for the zone with this reference.
    UpdateZoneStatus { zone_ref: &'a str },
    /// Create a task and its assignments.
    CreateTask,
    /// Change status of or comment on a task with this assignment set.
    ActOnTask { assigned_zones: &'a [String] },
    /// Delete the task created by this user id.
    DeleteTask { created_by: i64 },
}

/// Decide whether `actor` may perform `action`.
pub fn can(actor: &AuthUser, action: &Action<'_>) -> bool {
    match action {
        Action::ListUsers => actor.role.is_admin(),
        Action::ManageUsers => actor.role == Role::Superadmin,
        Action::CreateZone => actor.role.is_admin(),
        Action::UpdateZoneStatus { zone_ref } => {
            actor.role.is_admin() || actor.zone_ref == *zone_ref
        }
        Action::CreateTask => actor.role.is_admin(),
        Action::ActOnTask { assigned_zones } => {
            actor.role.is_admin() || assigned_zones.iter().any(|z| z == &actor.zone_ref)
        }
        Action::DeleteTask { created_by } => match actor.role {
            Role::Superadmin => true,
            Role::Admin => *created_by == actor.user_id,
            Role::User => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ALL_ZONES_REF;

    fn actor(role: Role, zone_ref: &str) -> AuthUser {
        AuthUser {
            user_id: 10,
            username: "actor".to_string(),
            role,
            zone_ref: zone_ref.to_string(),
        }
    }

    #[test]
    fn test_user_may_only_update_own_zone() {
        let user = actor(Role::User, "KAR001");
        assert!(can(&user, &Action::UpdateZoneStatus { zone_ref: "KAR001" }));
        assert!(!can(&user, &Action::UpdateZoneStatus { zone_ref: "LAH001" }));
    }

    #[test]
    fn test_admin_may_update_any_zone() {
        let admin = actor(Role::Admin, ALL_ZONES_REF);
        assert!(can(&admin, &Action::UpdateZoneStatus { zone_ref: "KAR001" }));
        assert!(can(&admin, &Action::UpdateZoneStatus { zone_ref: "LAH001" }));
    }

    #[test]
    fn test_only_superadmin_manages_users() {
        assert!(can(&actor(Role::Superadmin, ALL_ZONES_REF), &Action::ManageUsers));
        assert!(!can(&actor(Role::Admin, ALL_ZONES_REF), &Action::ManageUsers));
        assert!(!can(&actor(Role::User, "KAR001"), &Action::ManageUsers));
    }

    #[test]
    fn test_task_actions_require_assignment_for_users() {
        let user = actor(Role::User, "ISB001");
        let assigned = vec!["ISB001".to_string(), "KAR001".to_string()];
        let unassigned = vec!["KAR001".to_string()];
        assert!(can(
            &user,
            &Action::ActOnTask {
                assigned_zones: &assigned
            }
        ));
        assert!(!can(
            &user,
            &Action::ActOnTask {
                assigned_zones: &unassigned
            }
        ));
        assert!(!can(&user, &Action::CreateTask));
    }

    #[test]
    fn test_delete_task_ownership() {
        let superadmin = actor(Role::Superadmin, ALL_ZONES_REF);
        let admin = actor(Role::Admin, ALL_ZONES_REF);
        let user = actor(Role::User, "KAR001");

        assert!(can(&superadmin, &Action::DeleteTask { created_by: 99 }));
        // Admin may delete only tasks they created (actor id is 10).
        assert!(can(&admin, &Action::DeleteTask { created_by: 10 }));
        assert!(!can(&admin, &Action::DeleteTask { created_by: 99 }));
        assert!(!can(&user, &Action::DeleteTask { created_by: 10 }));
    }
}
