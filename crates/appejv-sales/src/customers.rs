//! Customer service — scoped reads and the assignment mutation.

use appejv_audit::AuditRecorder;
use appejv_authz::{Actor, Capability, access, policy, scope};
use appejv_core::error::{AppejvError, AppejvResult};
use appejv_core::models::customer::Customer;
use appejv_core::repository::{
    AuditLogRepository, CustomerRepository, PaginatedResult, Pagination, ProfileRepository,
};
use serde_json::json;
use uuid::Uuid;

/// Customer service.
///
/// Assignment is the privileged mutation here: one customer has at
/// most one assignee at a time, and reassignment is capability-gated,
/// guarded against stealing another team's customer, and audited.
pub struct CustomerService<C, P, A>
where
    C: CustomerRepository,
    P: ProfileRepository,
    A: AuditLogRepository,
{
    customers: C,
    profiles: P,
    audit: AuditRecorder<A>,
}

impl<C, P, A> CustomerService<C, P, A>
where
    C: CustomerRepository,
    P: ProfileRepository,
    A: AuditLogRepository,
{
    pub fn new(customers: C, profiles: P, audit: AuditRecorder<A>) -> Self {
        Self {
            customers,
            profiles,
            audit,
        }
    }

    /// Fetch one customer through the access guard.
    pub async fn get_customer(&self, actor: &Actor, customer_id: Uuid) -> AppejvResult<Customer> {
        let customer = self.customers.get_by_id(customer_id).await?;

        if !access::can_access_customer(actor.role, actor.id, customer.assigned_to, &actor.roster)
        {
            let reason = format!("customer {} is outside the actor's scope", customer.id);
            self.deny("customers", "read", actor, &reason).await;
            return Err(AppejvError::Forbidden { reason });
        }

        Ok(customer)
    }

    /// List the customers visible under the actor's data scope.
    pub async fn list_customers(
        &self,
        actor: &Actor,
        pagination: Pagination,
    ) -> AppejvResult<PaginatedResult<Customer>> {
        let visibility = scope::visibility(scope::data_scope(actor.role), actor.id, &actor.roster);
        self.customers.list_visible(&visibility, pagination).await
    }

    /// Assign (or reassign, or unassign) a customer to a sales person.
    pub async fn assign_customer(
        &self,
        actor: &Actor,
        customer_id: Uuid,
        new_assignee: Option<Uuid>,
    ) -> AppejvResult<Customer> {
        if !policy::has_capability(actor.role, Capability::AssignCustomers) {
            let reason = format!("role {} may not assign customers", actor.role);
            self.deny("customers", "assign", actor, &reason).await;
            return Err(AppejvError::Forbidden { reason });
        }

        let customer = self.customers.get_by_id(customer_id).await?;

        // A sale_admin can only move customers already within its team;
        // an admin can move anything.
        if customer.assigned_to.is_some()
            && !access::can_access_customer(
                actor.role,
                actor.id,
                customer.assigned_to,
                &actor.roster,
            )
        {
            let reason = format!("customer {} is outside the actor's scope", customer.id);
            self.deny("customers", "assign", actor, &reason).await;
            return Err(AppejvError::Forbidden { reason });
        }

        // The new assignee must exist and be part of the sales org.
        if let Some(assignee) = new_assignee {
            let profile = self.profiles.get_by_id(assignee).await?;
            if !policy::is_sales_role(profile.role) {
                return Err(AppejvError::Validation {
                    message: format!(
                        "customers can only be assigned to sales roles, not {}",
                        profile.role
                    ),
                });
            }
        }

        let updated = self.customers.set_assignee(customer_id, new_assignee).await?;

        self.audit
            .modification(
                "customers",
                "assign",
                actor.email.clone(),
                actor.ip_address.clone(),
                json!({
                    "customer_id": customer_id,
                    "previous_assignee": customer.assigned_to,
                    "new_assignee": new_assignee,
                }),
            )
            .await;

        Ok(updated)
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
