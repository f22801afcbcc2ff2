//! Account management — the mutation boundary for user accounts.
//!
//! The privilege-escalation guard lives here, not in any UI: a
//! `sale_admin` may create `sale`/`customer`/`warehouse` accounts but
//! never `admin` or `sale_admin` ones. Every denial and every
//! successful mutation is recorded to the security audit log.

use appejv_audit::AuditRecorder;
use appejv_core::error::AppejvResult;
use appejv_core::models::profile::{CreateProfile, Profile, Role};
use appejv_core::repository::{AuditLogRepository, ProfileRepository};
use serde_json::json;
use uuid::Uuid;

use crate::context::Actor;
use crate::error::AuthzError;
use crate::policy;

/// Account service.
///
/// Generic over repository implementations so that the authorization
/// layer has no dependency on the database crate.
pub struct AccountService<P: ProfileRepository, A: AuditLogRepository> {
    profiles: P,
    audit: AuditRecorder<A>,
}

impl<P: ProfileRepository, A: AuditLogRepository> AccountService<P, A> {
    pub fn new(profiles: P, audit: AuditRecorder<A>) -> Self {
        Self { profiles, audit }
    }

    /// Create a user account, enforcing the escalation guard.
    pub async fn create_account(
        &self,
        actor: &Actor,
        input: CreateProfile,
    ) -> AppejvResult<Profile> {
        if !matches!(actor.role, Role::Admin | Role::SaleAdmin) {
            let err = AuthzError::MissingCapability {
                role: actor.role,
                capability: "manage users".into(),
            };
            self.deny("profiles", "create", actor, &err).await;
            return Err(err.into());
        }

        if !policy::can_create_role(actor.role, input.role) {
            let err = AuthzError::EscalationDenied {
                creator: actor.role,
                target: input.role,
            };
            self.deny("profiles", "create", actor, &err).await;
            return Err(err.into());
        }

        if input.full_name.trim().is_empty() {
            return Err(appejv_core::AppejvError::Validation {
                message: "full name must not be empty".into(),
            });
        }

        let profile = self.profiles.create(input).await?;

        self.audit
            .modification(
                "profiles",
                "create",
                actor.email.clone(),
                actor.ip_address.clone(),
                json!({
                    "created_id": profile.id,
                    "created_role": profile.role,
                }),
            )
            .await;

        Ok(profile)
    }

    /// Delete a user account. Self-deletion is rejected.
    pub async fn delete_account(&self, actor: &Actor, user_id: Uuid) -> AppejvResult<()> {
        if !matches!(actor.role, Role::Admin | Role::SaleAdmin) {
            let err = AuthzError::MissingCapability {
                role: actor.role,
                capability: "manage users".into(),
            };
            self.deny("profiles", "delete", actor, &err).await;
            return Err(err.into());
        }

        if user_id == actor.id {
            return Err(AuthzError::SelfDeletion.into());
        }

        // Ensure the target resolves before mutating.
        let target = self.profiles.get_by_id(user_id).await?;

        // A sale_admin may only remove accounts it could have created.
        if !policy::can_create_role(actor.role, target.role) {
            let err = AuthzError::EscalationDenied {
                creator: actor.role,
                target: target.role,
            };
            self.deny("profiles", "delete", actor, &err).await;
            return Err(err.into());
        }

        self.profiles.delete(user_id).await?;

        self.audit
            .modification(
                "profiles",
                "delete",
                actor.email.clone(),
                actor.ip_address.clone(),
                json!({ "deleted_id": user_id }),
            )
            .await;

        Ok(())
    }

    async fn deny(&self, resource: &str, action: &str, actor: &Actor, err: &AuthzError) {
        self.audit
            .denied(
                resource,
                action,
                actor.email.clone(),
                actor.ip_address.clone(),
                &err.to_string(),
            )
            .await;
    }
}
