//! Live call collection, kept newest-first by the change reducer

use std::sync::Arc;

use frontdesk_domain::{Call, CallStats, ChangeEvent, Result};
use parking_lot::RwLock;

use super::service::CallService;
use crate::live::{apply_change, event_in_scope, ChangeSubscription, WatchHandle};
use crate::policy::TenantScope;
use crate::stats::call_stats;

#[derive(Default)]
struct LiveState {
    rows: Vec<Call>,
    stats: CallStats,
    loading: bool,
}

/// Realtime-maintained call collection for one caller scope.
pub struct LiveCalls {
    scope: TenantScope,
    service: Arc<CallService>,
    state: Arc<RwLock<LiveState>>,
}

impl LiveCalls {
    /// Create an empty collection; call [`refresh`](Self::refresh) to load.
    pub fn new(service: Arc<CallService>, scope: TenantScope) -> Self {
        Self { scope, service, state: Arc::new(RwLock::new(LiveState::default())) }
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Snapshot of the current rows, newest first.
    pub fn snapshot(&self) -> Vec<Call> {
        self.state.read().rows.clone()
    }

    /// Current aggregate statistics.
    pub fn stats(&self) -> CallStats {
        self.state.read().stats.clone()
    }

    /// Refetch the full collection; failures leave prior state untouched.
    pub async fn refresh(&self) -> Result<()> {
        self.state.write().loading = true;
        let result = self.service.list(&self.scope).await;
        let mut state = self.state.write();
        state.loading = false;

        let rows = result?;
        state.stats = call_stats(&rows);
        state.rows = rows;
        Ok(())
    }

    /// Apply one change event; stats are recomputed after every event.
    pub fn apply(&self, event: &ChangeEvent) {
        if !event_in_scope(event, &self.scope) {
            return;
        }
        let mut state = self.state.write();
        apply_change(&mut state.rows, event);
        state.stats = call_stats(&state.rows);
    }

    /// Spawn a task applying feed events until the handle is dropped or the
    /// feed closes.
    pub fn watch(&self, mut subscription: ChangeSubscription) -> WatchHandle {
        let state = Arc::clone(&self.state);
        let scope = self.scope;
        let task = tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                if !event_in_scope(&event, &scope) {
                    continue;
                }
                let mut state = state.write();
                apply_change(&mut state.rows, &event);
                state.stats = call_stats(&state.rows);
            }
        });
        WatchHandle::new(task)
    }
}
