//! The scope resolver: how much data a role may see.
//!
//! `data_scope` is a total pure function of the role; [`visibility`]
//! turns a scope into the row predicate the store applies before any
//! per-entity guard runs.

use appejv_core::models::profile::{Role, TeamRoster};
use appejv_core::repository::Visibility;
use uuid::Uuid;

/// Breadth of sales data visible to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Everything (admin).
    All,
    /// Own rows plus the team roster's rows (sale_admin).
    Team,
    /// Own rows only (sale).
    Own,
    /// Warehouse data only; no customer/order ownership.
    Warehouse,
    /// The customer's own surface; no sales rows.
    Customer,
    /// Unknown actors see nothing.
    None,
}

/// Map a role to its data scope. Total: every role has exactly one
/// scope, and only undefined roles would fall to `None` (which the
/// closed [`Role`] enum makes unrepresentable).
pub fn data_scope(role: Role) -> Scope {
    match role {
        Role::Admin => Scope::All,
        Role::SaleAdmin => Scope::Team,
        Role::Sale => Scope::Own,
        Role::Warehouse => Scope::Warehouse,
        Role::Customer => Scope::Customer,
    }
}

/// Build the row predicate for sales-owned rows (customers, orders).
///
/// `team` means "owned by self OR by any id in the roster". Warehouse
/// and customer scopes see no sales rows at all.
pub fn visibility(scope: Scope, actor_id: Uuid, roster: &TeamRoster) -> Visibility {
    match scope {
        Scope::All => Visibility::Unrestricted,
        Scope::Team => {
            let mut ids: Vec<Uuid> = roster.members().collect();
            ids.push(actor_id);
            Visibility::Only(ids)
        }
        Scope::Own => Visibility::Only(vec![actor_id]),
        Scope::Warehouse | Scope::Customer | Scope::None => Visibility::Denied,
    }
}
