//! Error types for the APPEJV system.

use thiserror::Error;

use crate::models::order::OrderStatus;

#[derive(Debug, Error)]
pub enum AppejvError {
    /// No authenticated actor on the request.
    #[error("Unauthorized: no authenticated actor")]
    Unauthorized,

    /// Authenticated, but lacking a capability or failing an access guard.
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// The requested order status edge is not legal from the current state.
    #[error("Invalid order transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A conditional write lost a race against a concurrent mutation.
    #[error("Conflict: {entity} {id} was modified concurrently")]
    Conflict { entity: String, id: String },

    #[error("Database error: {0}")]
    Database(String),
}

pub type AppejvResult<T> = Result<T, AppejvError>;
