//! Domain models for APPEJV.
//!
//! These are the core types shared across all crates.

pub mod audit;
pub mod customer;
pub mod order;
pub mod order_history;
pub mod profile;
