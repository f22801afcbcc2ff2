//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The collaborator store applies
//! row visibility server-side via [`Visibility`], so the service layer —
//! never a UI — is the enforcement point for data scoping.

use uuid::Uuid;

use crate::error::AppejvResult;
use crate::models::{
    audit::{AuditLogEntry, CreateAuditLogEntry},
    customer::{CreateCustomer, Customer},
    order::{CreateOrder, Order, OrderStatus},
    order_history::{CreateOrderHistoryEntry, OrderHistoryEntry},
    profile::{CreateProfile, Profile, TeamRoster},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> PaginatedResult<T> {
    /// An empty page, used when a scope denies all rows without
    /// touching the store.
    pub fn empty(pagination: &Pagination) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }
}

/// Row-level predicate derived from a role's data scope, ready for the
/// store to apply before any per-entity guard runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// No predicate; every row is visible.
    Unrestricted,
    /// Only rows owned by one of these identities (self plus roster).
    Only(Vec<Uuid>),
    /// No rows are visible; the store is not queried.
    Denied,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

pub trait ProfileRepository: Send + Sync {
    fn create(&self, input: CreateProfile) -> impl Future<Output = AppejvResult<Profile>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = AppejvResult<Profile>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = AppejvResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = AppejvResult<PaginatedResult<Profile>>> + Send;

    /// Resolve the team roster for a `sale_admin`: every profile whose
    /// `manager_id` points at the given manager.
    fn list_team(&self, manager_id: Uuid)
    -> impl Future<Output = AppejvResult<TeamRoster>> + Send;
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

pub trait CustomerRepository: Send + Sync {
    fn create(&self, input: CreateCustomer) -> impl Future<Output = AppejvResult<Customer>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = AppejvResult<Customer>> + Send;

    /// Set or clear the assignee. The capability and access checks live
    /// in the service layer; this is the raw write.
    fn set_assignee(
        &self,
        id: Uuid,
        assigned_to: Option<Uuid>,
    ) -> impl Future<Output = AppejvResult<Customer>> + Send;

    /// List customers whose `assigned_to` falls within the visibility
    /// predicate.
    fn list_visible(
        &self,
        visibility: &Visibility,
        pagination: Pagination,
    ) -> impl Future<Output = AppejvResult<PaginatedResult<Customer>>> + Send;
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

pub trait OrderRepository: Send + Sync {
    /// Create a new order in the initial `draft` status.
    fn create(&self, input: CreateOrder) -> impl Future<Output = AppejvResult<Order>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = AppejvResult<Order>> + Send;

    /// Conditional status write: succeeds only if the persisted status
    /// still equals `expected`, so two racing transitions can never
    /// both succeed. A stale expectation fails with `Conflict`.
    fn update_status(
        &self,
        id: Uuid,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> impl Future<Output = AppejvResult<Order>> + Send;

    /// List orders whose `sale_id` falls within the visibility predicate.
    fn list_visible(
        &self,
        visibility: &Visibility,
        pagination: Pagination,
    ) -> impl Future<Output = AppejvResult<PaginatedResult<Order>>> + Send;
}

// ---------------------------------------------------------------------------
// Order history (append-only)
// ---------------------------------------------------------------------------

pub trait OrderHistoryRepository: Send + Sync {
    /// Append a history entry. No update or delete operations exist.
    fn append(
        &self,
        input: CreateOrderHistoryEntry,
    ) -> impl Future<Output = AppejvResult<OrderHistoryEntry>> + Send;

    /// All entries for one order, in insertion (timestamp) order.
    fn list_for_order(
        &self,
        order_id: Uuid,
    ) -> impl Future<Output = AppejvResult<Vec<OrderHistoryEntry>>> + Send;
}

// ---------------------------------------------------------------------------
// Security audit log (append-only, global)
// ---------------------------------------------------------------------------

/// Query filters for the operator-facing audit surface.
#[derive(Debug, Clone)]
pub struct AuditLogFilter {
    /// Substring match on the event type (case-insensitive).
    pub event_type: Option<String>,
    pub success: Option<bool>,
    /// Exact match on the resource.
    pub resource: Option<String>,
    /// Free-text search over event_type/user_email/resource/action.
    pub search: Option<String>,
    /// Bounded window, newest first.
    pub limit: u64,
}

impl Default for AuditLogFilter {
    fn default() -> Self {
        Self {
            event_type: None,
            success: None,
            resource: None,
            search: None,
            limit: 200,
        }
    }
}

pub trait AuditLogRepository: Send + Sync {
    /// Append a new audit entry. No update or delete operations exist.
    fn append(
        &self,
        input: CreateAuditLogEntry,
    ) -> impl Future<Output = AppejvResult<AuditLogEntry>> + Send;

    /// Query entries newest-first within the filter's bounded window.
    fn query(
        &self,
        filter: AuditLogFilter,
    ) -> impl Future<Output = AppejvResult<Vec<AuditLogEntry>>> + Send;
}
