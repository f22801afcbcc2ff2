//! Per-request actor context.

use appejv_core::models::profile::{Role, TeamRoster};
use uuid::Uuid;

/// The authenticated actor of one request, with the team roster
/// resolved once up front and passed down explicitly.
///
/// Email and IP address ride along solely for audit entries.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    pub roster: TeamRoster,
    pub email: Option<String>,
    pub ip_address: Option<String>,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self {
            id,
            role,
            roster: TeamRoster::new(),
            email: None,
            ip_address: None,
        }
    }

    pub fn with_roster(mut self, roster: TeamRoster) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }
}
