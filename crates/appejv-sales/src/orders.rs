//! Order service — creation, guarded status transitions, comments,
//! and the per-order history trail.

use appejv_audit::AuditRecorder;
use appejv_authz::{Actor, Capability, access, policy, scope};
use appejv_core::error::{AppejvError, AppejvResult};
use appejv_core::models::order::{CreateOrder, Order, OrderStatus};
use appejv_core::models::order_history::{CreateOrderHistoryEntry, OrderHistoryEntry};
use appejv_core::repository::{
    AuditLogRepository, CustomerRepository, OrderHistoryRepository, OrderRepository,
    PaginatedResult, Pagination,
};
use serde_json::json;
use uuid::Uuid;

/// Order service.
///
/// Generic over repository implementations; the collaborator store is
/// reached only through the `appejv-core` traits. Status transitions
/// are validated against the *persisted* status atomically with the
/// write, so a stale read can never produce a second success.
pub struct OrderService<O, C, H, A>
where
    O: OrderRepository,
    C: CustomerRepository,
    H: OrderHistoryRepository,
    A: AuditLogRepository,
{
    orders: O,
    customers: C,
    history: H,
    audit: AuditRecorder<A>,
}

impl<O, C, H, A> OrderService<O, C, H, A>
where
    O: OrderRepository,
    C: CustomerRepository,
    H: OrderHistoryRepository,
    A: AuditLogRepository,
{
    pub fn new(orders: O, customers: C, history: H, audit: AuditRecorder<A>) -> Self {
        Self {
            orders,
            customers,
            history,
            audit,
        }
    }

    /// Create an order in the initial `draft` status and append its
    /// `created` history entry.
    pub async fn create_order(
        &self,
        actor: &Actor,
        customer_id: Option<Uuid>,
        total_amount: f64,
    ) -> AppejvResult<Order> {
        if !policy::has_capability(actor.role, Capability::CreateOrders) {
            let reason = format!("role {} may not create orders", actor.role);
            self.deny("orders", "create", actor, &reason).await;
            return Err(AppejvError::Forbidden { reason });
        }

        if total_amount < 0.0 {
            return Err(AppejvError::Validation {
                message: "total amount must not be negative".into(),
            });
        }

        let order = self
            .orders
            .create(CreateOrder {
                customer_id,
                sale_id: actor.id,
                total_amount,
            })
            .await?;

        self.history
            .append(CreateOrderHistoryEntry::created(order.id, actor.id))
            .await?;

        self.audit
            .modification(
                "orders",
                "create",
                actor.email.clone(),
                actor.ip_address.clone(),
                json!({ "order_id": order.id }),
            )
            .await;

        Ok(order)
    }

    /// Advance an order to the next status.
    ///
    /// The owning sale may advance their own order; `approve orders`
    /// additionally allows advancing any order the actor can access
    /// (the cross-team override for admin/sale_admin).
    pub async fn advance_order(
        &self,
        actor: &Actor,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> AppejvResult<Order> {
        self.transition(actor, order_id, new_status, None).await
    }

    /// Cancel an order from any non-terminal state, with an optional
    /// reason recorded on the history entry.
    pub async fn cancel_order(
        &self,
        actor: &Actor,
        order_id: Uuid,
        reason: Option<String>,
    ) -> AppejvResult<Order> {
        self.transition(actor, order_id, OrderStatus::Cancelled, reason)
            .await
    }

    async fn transition(
        &self,
        actor: &Actor,
        order_id: Uuid,
        new_status: OrderStatus,
        comment: Option<String>,
    ) -> AppejvResult<Order> {
        let order = self.orders.get_by_id(order_id).await?;

        self.guard_order_access(actor, &order, "update_status").await?;

        let may_advance = order.sale_id == actor.id
            || policy::has_capability(actor.role, Capability::ApproveOrders);
        if !may_advance {
            let reason = format!(
                "role {} may not advance orders it does not own",
                actor.role
            );
            self.deny("orders", "update_status", actor, &reason).await;
            return Err(AppejvError::Forbidden { reason });
        }

        // An illegal edge is a caller defect: reported synchronously,
        // no history entry written.
        crate::lifecycle::check_transition(order.status, new_status)?;

        // Conditional write keyed on the status we just read; a racing
        // transition surfaces as Conflict, never a second success.
        let updated = self
            .orders
            .update_status(order_id, order.status, new_status)
            .await?;

        self.history
            .append(CreateOrderHistoryEntry::status_change(
                order_id,
                actor.id,
                order.status,
                new_status,
                comment,
            ))
            .await?;

        self.audit
            .modification(
                "orders",
                "update_status",
                actor.email.clone(),
                actor.ip_address.clone(),
                json!({
                    "order_id": order_id,
                    "old_status": order.status,
                    "new_status": new_status,
                }),
            )
            .await;

        Ok(updated)
    }

    /// Append a human-entered comment to an order's history.
    pub async fn add_comment(
        &self,
        actor: &Actor,
        order_id: Uuid,
        comment: String,
    ) -> AppejvResult<OrderHistoryEntry> {
        if comment.trim().is_empty() {
            return Err(AppejvError::Validation {
                message: "comment must not be empty".into(),
            });
        }

        let order = self.orders.get_by_id(order_id).await?;
        self.guard_order_access(actor, &order, "comment").await?;

        self.history
            .append(CreateOrderHistoryEntry::comment(order_id, actor.id, comment))
            .await
    }

    /// The order's history trail, readable by anyone with access to
    /// the order itself.
    pub async fn order_history(
        &self,
        actor: &Actor,
        order_id: Uuid,
    ) -> AppejvResult<Vec<OrderHistoryEntry>> {
        let order = self.orders.get_by_id(order_id).await?;
        self.guard_order_access(actor, &order, "read_history").await?;
        self.history.list_for_order(order_id).await
    }

    /// Fetch one order through the access guard.
    pub async fn get_order(&self, actor: &Actor, order_id: Uuid) -> AppejvResult<Order> {
        let order = self.orders.get_by_id(order_id).await?;
        self.guard_order_access(actor, &order, "read").await?;
        Ok(order)
    }

    /// List the orders visible under the actor's data scope.
    pub async fn list_orders(
        &self,
        actor: &Actor,
        pagination: Pagination,
    ) -> AppejvResult<PaginatedResult<Order>> {
        let visibility = scope::visibility(scope::data_scope(actor.role), actor.id, &actor.roster);
        self.orders.list_visible(&visibility, pagination).await
    }

    /// Resolve the owner of the order's customer, then run the access
    /// guard; denial is audited and surfaces as `Forbidden`.
    async fn guard_order_access(
        &self,
        actor: &Actor,
        order: &Order,
        action: &str,
    ) -> AppejvResult<()> {
        let customer_owner = match order.customer_id {
            Some(customer_id) => match self.customers.get_by_id(customer_id).await {
                Ok(customer) => customer.assigned_to,
                // A dangling customer reference degrades to authorship-only
                // access rather than blocking the order outright.
                Err(AppejvError::NotFound { .. }) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };

        if access::can_access_order(actor.role, actor.id, order.sale_id, customer_owner) {
            Ok(())
        } else {
            let reason = format!("order {} is outside the actor's scope", order.id);
            self.deny("orders", action, actor, &reason).await;
            Err(AppejvError::Forbidden { reason })
        }
    }

    async fn deny(&self, resource: &str, action: &str, actor: &Actor, reason: &str) {
        self.audit
            .denied(
                resource,
                action,
                actor.email.clone(),
                actor.ip_address.clone(),
                reason,
            )
            .await;
    }
}
