//! APPEJV Audit — the security audit trail.
//!
//! Append-only, operator-facing event stream, separate from per-order
//! business history. Writes are best-effort: a failed audit append is
//! escalated to process-level logging and never fails the operation
//! that triggered it.

pub mod config;
pub mod recorder;

pub use config::AuditConfig;
pub use recorder::AuditRecorder;
