//! Audit configuration.

/// Configuration for the audit recorder.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Hard cap on the query window (default: 200 entries).
    pub max_query_window: u64,
    /// Also emit every recorded event to the process log at DEBUG.
    pub echo_events: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_query_window: 200,
            echo_events: false,
        }
    }
}
