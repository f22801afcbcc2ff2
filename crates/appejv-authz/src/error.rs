//! Authorization error types.

use appejv_core::error::AppejvError;
use appejv_core::models::profile::Role;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("role {role} lacks the {capability} capability")]
    MissingCapability { role: Role, capability: String },

    #[error("{creator} may not create {target} accounts")]
    EscalationDenied { creator: Role, target: Role },

    #[error("cannot delete your own account")]
    SelfDeletion,
}

impl From<AuthzError> for AppejvError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::MissingCapability { .. } | AuthzError::EscalationDenied { .. } => {
                AppejvError::Forbidden {
                    reason: err.to_string(),
                }
            }
            AuthzError::SelfDeletion => AppejvError::Validation {
                message: err.to_string(),
            },
        }
    }
}
