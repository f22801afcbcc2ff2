//! Best-effort audit recording.

use appejv_core::error::AppejvResult;
use appejv_core::models::audit::{AuditEventType, AuditLogEntry, CreateAuditLogEntry};
use appejv_core::repository::{AuditLogFilter, AuditLogRepository};
use tracing::{debug, error};

use crate::config::AuditConfig;

/// Records security events to the audit log repository.
///
/// Generic over the repository implementation so that callers have no
/// dependency on the database crate. Recording never propagates a
/// store failure: observability must not become an availability
/// hazard, so a failed append is logged at ERROR and swallowed.
#[derive(Clone)]
pub struct AuditRecorder<A: AuditLogRepository> {
    repo: A,
    config: AuditConfig,
}

impl<A: AuditLogRepository> AuditRecorder<A> {
    pub fn new(repo: A) -> Self {
        Self {
            repo,
            config: AuditConfig::default(),
        }
    }

    pub fn with_config(repo: A, config: AuditConfig) -> Self {
        Self { repo, config }
    }

    /// Append one audit entry, best-effort.
    pub async fn record(&self, entry: CreateAuditLogEntry) {
        if self.config.echo_events {
            debug!(
                event_type = %entry.event_type,
                resource = entry.resource.as_deref(),
                action = entry.action.as_deref(),
                success = entry.success,
                "audit event"
            );
        }

        if let Err(e) = self.repo.append(entry).await {
            // The triggering operation proceeds regardless; the lost
            // entry is escalated to process-level diagnostics.
            error!(error = %e, "failed to persist audit log entry");
        }
    }

    /// Record a denied authorization attempt.
    pub async fn denied(
        &self,
        resource: &str,
        action: &str,
        user_email: Option<String>,
        ip_address: Option<String>,
        reason: &str,
    ) {
        self.record(CreateAuditLogEntry {
            event_type: AuditEventType::UnauthorizedAccess,
            resource: Some(resource.to_string()),
            action: Some(action.to_string()),
            user_email,
            ip_address,
            success: false,
            error_message: Some(reason.to_string()),
            metadata: serde_json::Value::Object(Default::default()),
        })
        .await;
    }

    /// Record a successful privileged mutation.
    pub async fn modification(
        &self,
        resource: &str,
        action: &str,
        user_email: Option<String>,
        ip_address: Option<String>,
        metadata: serde_json::Value,
    ) {
        self.record(CreateAuditLogEntry {
            event_type: AuditEventType::DataModification,
            resource: Some(resource.to_string()),
            action: Some(action.to_string()),
            user_email,
            ip_address,
            success: true,
            error_message: None,
            metadata,
        })
        .await;
    }

    /// Operator query surface: newest-first, bounded window.
    ///
    /// The filter's limit is clamped to the configured maximum.
    pub async fn query(&self, mut filter: AuditLogFilter) -> AppejvResult<Vec<AuditLogEntry>> {
        filter.limit = filter.limit.min(self.config.max_query_window);
        self.repo.query(filter).await
    }
}
