//! The access guard: instance-level allow/deny for one entity.
//!
//! Pure decision functions. Ownership and roster data is supplied by
//! the caller, already resolved from the collaborator store; these
//! functions do no I/O and never raise on denial — callers translate
//! `false` into a `Forbidden` response and an audit entry.

use appejv_core::models::profile::{Role, TeamRoster};
use uuid::Uuid;

/// May the actor touch a specific customer?
///
/// - `admin`: always.
/// - `sale_admin`: assignee is self or a roster member.
/// - `sale`: assignee is self.
/// - anything else: never.
///
/// An unassigned customer (`assigned_to == None`) is reachable only by
/// an admin.
pub fn can_access_customer(
    role: Role,
    actor_id: Uuid,
    assigned_to: Option<Uuid>,
    roster: &TeamRoster,
) -> bool {
    match role {
        Role::Admin => true,
        Role::SaleAdmin => match assigned_to {
            Some(assignee) => assignee == actor_id || roster.contains(assignee),
            None => false,
        },
        Role::Sale => assigned_to == Some(actor_id),
        Role::Warehouse | Role::Customer => false,
    }
}

/// May the actor touch a specific order?
///
/// Access follows either direct authorship (`created_by`) or customer
/// stewardship (the order's customer is assigned to the actor); either
/// condition suffices.
pub fn can_access_order(
    role: Role,
    actor_id: Uuid,
    created_by: Uuid,
    customer_owner: Option<Uuid>,
) -> bool {
    match role {
        Role::Admin => true,
        Role::SaleAdmin | Role::Sale => {
            created_by == actor_id || customer_owner == Some(actor_id)
        }
        Role::Warehouse | Role::Customer => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(ids: &[Uuid]) -> TeamRoster {
        ids.iter().copied().collect()
    }

    #[test]
    fn admin_accesses_any_customer() {
        let u = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(can_access_customer(Role::Admin, u, Some(other), &TeamRoster::new()));
        assert!(can_access_customer(Role::Admin, u, None, &TeamRoster::new()));
    }

    #[test]
    fn sale_admin_accesses_own_and_team_customers() {
        let u = Uuid::new_v4();
        let member = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let roster = roster_of(&[member, Uuid::new_v4()]);

        assert!(can_access_customer(Role::SaleAdmin, u, Some(u), &roster));
        assert!(can_access_customer(Role::SaleAdmin, u, Some(member), &roster));
        assert!(!can_access_customer(Role::SaleAdmin, u, Some(stranger), &roster));
        assert!(!can_access_customer(Role::SaleAdmin, u, None, &roster));
    }

    #[test]
    fn sale_accesses_only_own_customers() {
        let u = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(can_access_customer(Role::Sale, u, Some(u), &TeamRoster::new()));
        assert!(!can_access_customer(Role::Sale, u, Some(other), &TeamRoster::new()));
    }

    #[test]
    fn non_sales_roles_access_no_customers() {
        let u = Uuid::new_v4();
        assert!(!can_access_customer(Role::Warehouse, u, Some(u), &TeamRoster::new()));
        assert!(!can_access_customer(Role::Customer, u, Some(u), &TeamRoster::new()));
    }

    #[test]
    fn admin_accesses_any_order() {
        let u = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(can_access_order(Role::Admin, u, other, Some(other)));
    }

    #[test]
    fn sale_accesses_order_by_authorship() {
        let u = Uuid::new_v4();
        assert!(can_access_order(Role::Sale, u, u, None));
    }

    #[test]
    fn sale_accesses_order_by_customer_stewardship() {
        let u = Uuid::new_v4();
        let other = Uuid::new_v4();
        // Not the author, but the order's customer is assigned to u.
        assert!(can_access_order(Role::Sale, u, other, Some(u)));
    }

    #[test]
    fn sale_denied_without_authorship_or_stewardship() {
        let u = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(!can_access_order(Role::Sale, u, other, Some(other)));
        assert!(!can_access_order(Role::Sale, u, other, None));
    }

    #[test]
    fn sale_admin_order_access_mirrors_sale() {
        let u = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(can_access_order(Role::SaleAdmin, u, u, None));
        assert!(can_access_order(Role::SaleAdmin, u, other, Some(u)));
        assert!(!can_access_order(Role::SaleAdmin, u, other, Some(other)));
    }

    #[test]
    fn non_sales_roles_access_no_orders() {
        let u = Uuid::new_v4();
        assert!(!can_access_order(Role::Warehouse, u, u, Some(u)));
        assert!(!can_access_order(Role::Customer, u, u, Some(u)));
    }
}
