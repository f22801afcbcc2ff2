//! The policy engine: a static mapping from role to capabilities.
//!
//! Pure, total, and exhaustively matched: adding a role or a capability
//! forces every arm here to be revisited at compile time. These are
//! *class-level* permissions; whether an actor may touch a *specific*
//! entity is the access guard's job.

use appejv_core::models::profile::Role;

/// Named boolean permissions keyed by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    // System management
    ManageUsers,
    ManageSettings,
    ManageCategories,
    ViewSystemAnalytics,

    // Sales: customers
    ViewOwnCustomers,
    ViewTeamCustomers,
    ViewAllCustomers,
    AssignCustomers,
    ReassignCustomers,

    // Sales: orders
    CreateOrders,
    ViewOwnOrders,
    ViewTeamOrders,
    ApproveOrders,

    // Sales: reports and team
    ViewPersonalReports,
    ViewTeamReports,
    ManageTeam,
    ViewTeamPerformance,

    // Products
    AddProducts,
    EditProducts,
    DeleteProducts,
    ViewProducts,

    // Warehouse
    ManageInventory,
    ReceiveStock,
    ShipOrders,
    Stocktake,

    // Customer-facing
    PlaceOrders,
}

/// Does the given role hold the given capability?
///
/// Never panics and has no side effects; callers translate `false`
/// into a `Forbidden` error at the mutation boundary.
pub fn has_capability(role: Role, capability: Capability) -> bool {
    use Capability::*;
    use Role::*;

    match capability {
        ManageUsers | ManageSettings | ManageCategories | ViewSystemAnalytics => {
            matches!(role, Admin)
        }

        ViewOwnCustomers => matches!(role, Admin | SaleAdmin | Sale),
        ViewTeamCustomers => matches!(role, Admin | SaleAdmin),
        ViewAllCustomers => matches!(role, Admin),
        AssignCustomers | ReassignCustomers => matches!(role, Admin | SaleAdmin),

        CreateOrders | ViewOwnOrders => matches!(role, Admin | SaleAdmin | Sale),
        ViewTeamOrders | ApproveOrders => matches!(role, Admin | SaleAdmin),

        ViewPersonalReports => matches!(role, Admin | SaleAdmin | Sale),
        ViewTeamReports | ManageTeam | ViewTeamPerformance => matches!(role, Admin | SaleAdmin),

        AddProducts | EditProducts | DeleteProducts => matches!(role, Admin),
        ViewProducts => true,

        ManageInventory | ReceiveStock | ShipOrders | Stocktake => {
            matches!(role, Admin | Warehouse)
        }

        PlaceOrders => matches!(role, Admin | SaleAdmin | Sale | Customer),
    }
}

/// Privilege-escalation guard for account creation.
///
/// Only an admin may create `admin` or `sale_admin` accounts; a
/// `sale_admin` may create the lower roles. Everyone else creates
/// nothing. Enforced at the mutation boundary, never only in a UI.
pub fn can_create_role(creator: Role, target: Role) -> bool {
    match creator {
        Role::Admin => true,
        Role::SaleAdmin => matches!(target, Role::Sale | Role::Customer | Role::Warehouse),
        Role::Sale | Role::Warehouse | Role::Customer => false,
    }
}

/// Is this role part of the sales organisation?
pub fn is_sales_role(role: Role) -> bool {
    matches!(role, Role::SaleAdmin | Role::Sale)
}

#[cfg(test)]
mod tests {
    //! Regression oracle for the capability matrix. Each block mirrors
    //! one row of the role/capability table; keep them exhaustive.

    use super::*;

    // -------------------------------------------------------------------
    // Admin
    // -------------------------------------------------------------------

    #[test]
    fn admin_can_manage_system() {
        assert!(has_capability(Role::Admin, Capability::ManageUsers));
        assert!(has_capability(Role::Admin, Capability::ManageSettings));
        assert!(has_capability(Role::Admin, Capability::ManageCategories));
        assert!(has_capability(Role::Admin, Capability::ViewSystemAnalytics));
    }

    #[test]
    fn admin_can_manage_products() {
        assert!(has_capability(Role::Admin, Capability::AddProducts));
        assert!(has_capability(Role::Admin, Capability::EditProducts));
        assert!(has_capability(Role::Admin, Capability::DeleteProducts));
    }

    #[test]
    fn admin_can_view_all_customers() {
        assert!(has_capability(Role::Admin, Capability::ViewOwnCustomers));
        assert!(has_capability(Role::Admin, Capability::ViewTeamCustomers));
        assert!(has_capability(Role::Admin, Capability::ViewAllCustomers));
    }

    #[test]
    fn admin_holds_every_sales_and_warehouse_capability() {
        for cap in [
            Capability::AssignCustomers,
            Capability::ReassignCustomers,
            Capability::CreateOrders,
            Capability::ViewOwnOrders,
            Capability::ViewTeamOrders,
            Capability::ApproveOrders,
            Capability::ViewPersonalReports,
            Capability::ViewTeamReports,
            Capability::ManageTeam,
            Capability::ViewTeamPerformance,
            Capability::ManageInventory,
            Capability::ReceiveStock,
            Capability::ShipOrders,
            Capability::Stocktake,
            Capability::PlaceOrders,
        ] {
            assert!(has_capability(Role::Admin, cap), "admin should hold {cap:?}");
        }
    }

    // -------------------------------------------------------------------
    // Sale admin
    // -------------------------------------------------------------------

    #[test]
    fn sale_admin_cannot_manage_system() {
        assert!(!has_capability(Role::SaleAdmin, Capability::ManageUsers));
        assert!(!has_capability(Role::SaleAdmin, Capability::ManageSettings));
        assert!(!has_capability(Role::SaleAdmin, Capability::ManageCategories));
        assert!(!has_capability(Role::SaleAdmin, Capability::ViewSystemAnalytics));
    }

    #[test]
    fn sale_admin_sees_own_and_team_customers_but_not_all() {
        assert!(has_capability(Role::SaleAdmin, Capability::ViewOwnCustomers));
        assert!(has_capability(Role::SaleAdmin, Capability::ViewTeamCustomers));
        assert!(!has_capability(Role::SaleAdmin, Capability::ViewAllCustomers));
    }

    #[test]
    fn sale_admin_can_assign_customers() {
        assert!(has_capability(Role::SaleAdmin, Capability::AssignCustomers));
        assert!(has_capability(Role::SaleAdmin, Capability::ReassignCustomers));
    }

    #[test]
    fn sale_admin_order_capabilities() {
        assert!(has_capability(Role::SaleAdmin, Capability::CreateOrders));
        assert!(has_capability(Role::SaleAdmin, Capability::ViewOwnOrders));
        assert!(has_capability(Role::SaleAdmin, Capability::ViewTeamOrders));
        assert!(has_capability(Role::SaleAdmin, Capability::ApproveOrders));
    }

    #[test]
    fn sale_admin_team_capabilities() {
        assert!(has_capability(Role::SaleAdmin, Capability::ViewPersonalReports));
        assert!(has_capability(Role::SaleAdmin, Capability::ViewTeamReports));
        assert!(has_capability(Role::SaleAdmin, Capability::ManageTeam));
        assert!(has_capability(Role::SaleAdmin, Capability::ViewTeamPerformance));
    }

    #[test]
    fn sale_admin_cannot_touch_products_or_inventory() {
        assert!(!has_capability(Role::SaleAdmin, Capability::AddProducts));
        assert!(!has_capability(Role::SaleAdmin, Capability::EditProducts));
        assert!(!has_capability(Role::SaleAdmin, Capability::DeleteProducts));
        assert!(!has_capability(Role::SaleAdmin, Capability::ManageInventory));
    }

    // -------------------------------------------------------------------
    // Sale
    // -------------------------------------------------------------------

    #[test]
    fn sale_sees_only_own_customers() {
        assert!(has_capability(Role::Sale, Capability::ViewOwnCustomers));
        assert!(!has_capability(Role::Sale, Capability::ViewTeamCustomers));
        assert!(!has_capability(Role::Sale, Capability::ViewAllCustomers));
        assert!(!has_capability(Role::Sale, Capability::AssignCustomers));
    }

    #[test]
    fn sale_order_capabilities() {
        assert!(has_capability(Role::Sale, Capability::CreateOrders));
        assert!(has_capability(Role::Sale, Capability::ViewOwnOrders));
        assert!(!has_capability(Role::Sale, Capability::ViewTeamOrders));
        assert!(!has_capability(Role::Sale, Capability::ApproveOrders));
    }

    #[test]
    fn sale_report_and_team_capabilities() {
        assert!(has_capability(Role::Sale, Capability::ViewPersonalReports));
        assert!(!has_capability(Role::Sale, Capability::ViewTeamReports));
        assert!(!has_capability(Role::Sale, Capability::ManageTeam));
    }

    #[test]
    fn sale_cannot_manage_users_or_products() {
        assert!(!has_capability(Role::Sale, Capability::ManageUsers));
        assert!(!has_capability(Role::Sale, Capability::AddProducts));
        assert!(!has_capability(Role::Sale, Capability::EditProducts));
        assert!(!has_capability(Role::Sale, Capability::DeleteProducts));
    }

    // -------------------------------------------------------------------
    // Warehouse
    // -------------------------------------------------------------------

    #[test]
    fn warehouse_inventory_capabilities() {
        assert!(has_capability(Role::Warehouse, Capability::ManageInventory));
        assert!(has_capability(Role::Warehouse, Capability::ReceiveStock));
        assert!(has_capability(Role::Warehouse, Capability::ShipOrders));
        assert!(has_capability(Role::Warehouse, Capability::Stocktake));
    }

    #[test]
    fn warehouse_sees_no_customers_or_orders() {
        assert!(!has_capability(Role::Warehouse, Capability::ManageUsers));
        assert!(!has_capability(Role::Warehouse, Capability::ViewOwnCustomers));
        assert!(!has_capability(Role::Warehouse, Capability::CreateOrders));
        assert!(!has_capability(Role::Warehouse, Capability::PlaceOrders));
    }

    // -------------------------------------------------------------------
    // Customer
    // -------------------------------------------------------------------

    #[test]
    fn customer_can_place_orders_only() {
        assert!(has_capability(Role::Customer, Capability::PlaceOrders));
        assert!(!has_capability(Role::Customer, Capability::CreateOrders));
        assert!(!has_capability(Role::Customer, Capability::ViewOwnCustomers));
        assert!(!has_capability(Role::Customer, Capability::ManageUsers));
        assert!(!has_capability(Role::Customer, Capability::ManageInventory));
    }

    // -------------------------------------------------------------------
    // Cross-role rows
    // -------------------------------------------------------------------

    #[test]
    fn every_role_can_view_products() {
        for role in Role::ALL {
            assert!(
                has_capability(role, Capability::ViewProducts),
                "{role} should view products"
            );
        }
    }

    #[test]
    fn place_orders_row() {
        assert!(has_capability(Role::Admin, Capability::PlaceOrders));
        assert!(has_capability(Role::SaleAdmin, Capability::PlaceOrders));
        assert!(has_capability(Role::Sale, Capability::PlaceOrders));
        assert!(!has_capability(Role::Warehouse, Capability::PlaceOrders));
        assert!(has_capability(Role::Customer, Capability::PlaceOrders));
    }

    // -------------------------------------------------------------------
    // Account creation guard
    // -------------------------------------------------------------------

    #[test]
    fn admin_may_create_any_role() {
        for target in Role::ALL {
            assert!(can_create_role(Role::Admin, target));
        }
    }

    #[test]
    fn sale_admin_may_not_escalate() {
        assert!(!can_create_role(Role::SaleAdmin, Role::Admin));
        assert!(!can_create_role(Role::SaleAdmin, Role::SaleAdmin));
    }

    #[test]
    fn sale_admin_may_create_lower_roles() {
        assert!(can_create_role(Role::SaleAdmin, Role::Sale));
        assert!(can_create_role(Role::SaleAdmin, Role::Customer));
        assert!(can_create_role(Role::SaleAdmin, Role::Warehouse));
    }

    #[test]
    fn other_roles_create_nothing() {
        for creator in [Role::Sale, Role::Warehouse, Role::Customer] {
            for target in Role::ALL {
                assert!(!can_create_role(creator, target), "{creator} -> {target}");
            }
        }
    }

    #[test]
    fn sales_role_helper() {
        assert!(is_sales_role(Role::SaleAdmin));
        assert!(is_sales_role(Role::Sale));
        assert!(!is_sales_role(Role::Admin));
        assert!(!is_sales_role(Role::Warehouse));
        assert!(!is_sales_role(Role::Customer));
    }
}
