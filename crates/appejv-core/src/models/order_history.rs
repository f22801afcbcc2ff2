//! Order history domain model — the business-facing audit trail.
//!
//! Entries are immutable and append-only; once written they are never
//! edited or removed. Within one order's stream, insertion order is
//! timestamp order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppejvError;
use crate::models::order::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Created,
    StatusChange,
    Comment,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Created => "created",
            ActionType::StatusChange => "status_change",
            ActionType::Comment => "comment",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = AppejvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(ActionType::Created),
            "status_change" => Ok(ActionType::StatusChange),
            "comment" => Ok(ActionType::Comment),
            other => Err(AppejvError::Validation {
                message: format!("unrecognized history action type: {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistoryEntry {
    pub id: Uuid,
    pub order_id: Uuid,
    /// The acting user.
    pub user_id: Uuid,
    pub action_type: ActionType,
    pub old_value: Option<OrderStatus>,
    pub new_value: Option<OrderStatus>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderHistoryEntry {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub action_type: ActionType,
    pub old_value: Option<OrderStatus>,
    pub new_value: Option<OrderStatus>,
    pub comment: Option<String>,
}

impl CreateOrderHistoryEntry {
    pub fn created(order_id: Uuid, user_id: Uuid) -> Self {
        Self {
            order_id,
            user_id,
            action_type: ActionType::Created,
            old_value: None,
            new_value: None,
            comment: None,
        }
    }

    pub fn status_change(
        order_id: Uuid,
        user_id: Uuid,
        old: OrderStatus,
        new: OrderStatus,
        comment: Option<String>,
    ) -> Self {
        Self {
            order_id,
            user_id,
            action_type: ActionType::StatusChange,
            old_value: Some(old),
            new_value: Some(new),
            comment,
        }
    }

    pub fn comment(order_id: Uuid, user_id: Uuid, comment: String) -> Self {
        Self {
            order_id,
            user_id,
            action_type: ActionType::Comment,
            old_value: None,
            new_value: None,
            comment: Some(comment),
        }
    }
}
