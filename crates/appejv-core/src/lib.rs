//! APPEJV Core — domain models, error types, and repository traits.
//!
//! These are the shared types of the sales/CRM backend. The persistence
//! engine is an external collaborator; this crate only defines the data
//! shapes and the async repository contracts that adapters implement.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{AppejvError, AppejvResult};
