//! Call service - scoped reads, validated writes

use std::sync::Arc;

use chrono::Utc;
use frontdesk_domain::constants::CALL_FETCH_LIMIT;
use frontdesk_domain::validation::validate_call_draft;
use frontdesk_domain::{
    Call, CallDraft, CallPatch, CallStats, CallStatus, FrontdeskError, Result,
};
use tracing::info;
use uuid::Uuid;

use super::ports::CallStore;
use crate::policy::TenantScope;
use crate::stats::call_stats;

/// Call operations against the backend store.
pub struct CallService {
    store: Arc<dyn CallStore>,
}

impl CallService {
    /// Create a new call service over a store port.
    pub fn new(store: Arc<dyn CallStore>) -> Self {
        Self { store }
    }

    /// Calls visible to the caller, newest first.
    pub async fn list(&self, scope: &TenantScope) -> Result<Vec<Call>> {
        self.store.list(scope, CALL_FETCH_LIMIT).await
    }

    /// Aggregate projection of the caller's visible calls.
    pub async fn stats(&self, scope: &TenantScope) -> Result<CallStats> {
        let calls = self.list(scope).await?;
        Ok(call_stats(&calls))
    }

    /// Log a new call. Records start in the `initiated` state.
    pub async fn log_call(
        &self,
        scope: &TenantScope,
        organization: Option<Uuid>,
        draft: CallDraft,
    ) -> Result<Call> {
        validate_call_draft(&draft)?;
        let organization_id = scope.creation_org(organization)?;

        let now = Utc::now();
        let call = Call {
            id: Uuid::new_v4(),
            organization_id,
            caller_name: draft.caller_name,
            caller_phone: draft.caller_phone,
            direction: draft.direction,
            status: CallStatus::Initiated,
            outcome: None,
            started_at: now,
            ended_at: None,
            notes: draft.notes,
            transcript: None,
            summary: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert(&call).await?;
        info!(call_id = %stored.id, organization_id = %organization_id, "call logged");
        Ok(stored)
    }

    /// Progress a call's lifecycle status, optionally tagging an outcome.
    ///
    /// Finalizing statuses stamp `ended_at`; a call that already reached a
    /// final state rejects further updates.
    pub async fn update_status(
        &self,
        scope: &TenantScope,
        id: Uuid,
        status: CallStatus,
        outcome: Option<String>,
    ) -> Result<Call> {
        let current = self.load_guarded(scope, id).await?;
        if current.status.is_final() {
            return Err(FrontdeskError::Validation(frontdesk_domain::ValidationErrors::from(
                vec![frontdesk_domain::FieldError::new(
                    "status",
                    format!("call already finalized as {}", current.status.as_str()),
                )],
            )));
        }

        let now = Utc::now();
        let patch = CallPatch {
            status: Some(status),
            outcome,
            ended_at: status.is_final().then_some(now),
            notes: None,
            updated_at: Some(now),
        };
        let updated = self.store.update(id, &patch).await?;
        info!(call_id = %id, status = status.as_str(), "call status updated");
        Ok(updated)
    }

    /// Hand a call off, recording the transfer as its outcome tag.
    pub async fn transfer(&self, scope: &TenantScope, id: Uuid, reason: &str) -> Result<Call> {
        self.update_status(scope, id, CallStatus::Completed, Some(format!("transferred: {reason}")))
            .await
    }

    /// Permanently delete a call record.
    pub async fn delete(&self, scope: &TenantScope, id: Uuid) -> Result<()> {
        self.load_guarded(scope, id).await?;
        self.store.delete(id).await?;
        info!(call_id = %id, "call deleted");
        Ok(())
    }

    async fn load_guarded(&self, scope: &TenantScope, id: Uuid) -> Result<Call> {
        let call = self
            .store
            .fetch(id)
            .await?
            .ok_or_else(|| FrontdeskError::NotFound(format!("call {id}")))?;
        scope.ensure_permits(call.organization_id)?;
        Ok(call)
    }
}
