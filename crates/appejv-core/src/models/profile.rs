//! Profile domain model — one row per system actor.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppejvError;

/// Closed set of system actor roles.
///
/// A user's role is immutable at a point in time; it is changed only by
/// an admin-level mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SaleAdmin,
    Sale,
    Warehouse,
    Customer,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::SaleAdmin,
        Role::Sale,
        Role::Warehouse,
        Role::Customer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SaleAdmin => "sale_admin",
            Role::Sale => "sale",
            Role::Warehouse => "warehouse",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppejvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "sale_admin" => Ok(Role::SaleAdmin),
            "sale" => Ok(Role::Sale),
            "warehouse" => Ok(Role::Warehouse),
            "customer" => Ok(Role::Customer),
            other => Err(AppejvError::Validation {
                message: format!("unrecognized role: {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub role: Role,
    /// Back-reference to the managing `sale_admin`. Creates a team; the
    /// manager does not own this profile's data.
    pub manager_id: Option<Uuid>,
    pub full_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfile {
    pub role: Role,
    pub manager_id: Option<Uuid>,
    pub full_name: String,
    pub phone: Option<String>,
}

/// The set of subordinate identities under one `sale_admin`.
///
/// Resolved once per request by the collaborator store and passed down
/// explicitly; never owned or cached by the decision functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    members: HashSet<Uuid>,
}

impl TeamRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.members.contains(&id)
    }

    pub fn members(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<Uuid> for TeamRoster {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
