//! APPEJV Authz — the authorization engine.
//!
//! Two layers, deliberately kept apart:
//!
//! - *Class-level* checks: [`policy`] maps a [`Role`] to capabilities and
//!   [`scope`] maps it to a data visibility scope. Pure functions of the
//!   role alone.
//! - *Instance-level* checks: [`access`] decides whether a specific actor
//!   may touch a specific entity, which additionally needs ownership and
//!   team-membership data supplied by the caller.
//!
//! Conflating the two is the chief correctness hazard in this subsystem;
//! every call site needs both.
//!
//! [`Role`]: appejv_core::models::profile::Role

pub mod access;
pub mod account;
pub mod context;
pub mod error;
pub mod policy;
pub mod scope;

pub use account::AccountService;
pub use context::Actor;
pub use error::AuthzError;
pub use policy::Capability;
pub use scope::Scope;
