//! Security audit log domain model — the operator-facing stream.
//!
//! Separate from per-order business history by design: this stream
//! records authentication/authorization events for security review.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppejvError;

/// Closed vocabulary of security-relevant event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    LoginSuccess,
    LoginFailed,
    Logout,
    PasswordChange,
    UnauthorizedAccess,
    RateLimitExceeded,
    SuspiciousActivity,
    DataAccess,
    DataModification,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::LoginSuccess => "LOGIN_SUCCESS",
            AuditEventType::LoginFailed => "LOGIN_FAILED",
            AuditEventType::Logout => "LOGOUT",
            AuditEventType::PasswordChange => "PASSWORD_CHANGE",
            AuditEventType::UnauthorizedAccess => "UNAUTHORIZED_ACCESS",
            AuditEventType::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AuditEventType::SuspiciousActivity => "SUSPICIOUS_ACTIVITY",
            AuditEventType::DataAccess => "DATA_ACCESS",
            AuditEventType::DataModification => "DATA_MODIFICATION",
        }
    }
}

impl fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditEventType {
    type Err = AppejvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOGIN_SUCCESS" => Ok(AuditEventType::LoginSuccess),
            "LOGIN_FAILED" => Ok(AuditEventType::LoginFailed),
            "LOGOUT" => Ok(AuditEventType::Logout),
            "PASSWORD_CHANGE" => Ok(AuditEventType::PasswordChange),
            "UNAUTHORIZED_ACCESS" => Ok(AuditEventType::UnauthorizedAccess),
            "RATE_LIMIT_EXCEEDED" => Ok(AuditEventType::RateLimitExceeded),
            "SUSPICIOUS_ACTIVITY" => Ok(AuditEventType::SuspiciousActivity),
            "DATA_ACCESS" => Ok(AuditEventType::DataAccess),
            "DATA_MODIFICATION" => Ok(AuditEventType::DataModification),
            other => Err(AppejvError::Validation {
                message: format!("unrecognized audit event type: {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub event_type: AuditEventType,
    pub resource: Option<String>,
    pub action: Option<String>,
    pub user_email: Option<String>,
    pub ip_address: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    pub event_type: AuditEventType,
    pub resource: Option<String>,
    pub action: Option<String>,
    pub user_email: Option<String>,
    pub ip_address: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
    pub metadata: serde_json::Value,
}
