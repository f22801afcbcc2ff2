//! Customer domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// The sale/sale_admin responsible for this customer. At most one
    /// assignee at a time; reassignment is a privileged mutation.
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub assigned_to: Option<Uuid>,
}
