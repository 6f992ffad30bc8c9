//! Live appointment collection
//!
//! The in-memory analog of the dashboard's appointment view: owns its rows
//! and stats for the lifetime of the consumer that created it, refreshed by
//! full refetch after mutations and kept current by applying change events.

use std::sync::Arc;

use frontdesk_domain::{Appointment, AppointmentStats, ChangeEvent, Result};
use parking_lot::RwLock;

use super::service::AppointmentService;
use crate::live::{apply_change, event_in_scope, ChangeSubscription, WatchHandle};
use crate::policy::TenantScope;
use crate::stats::appointment_stats;

#[derive(Default)]
struct LiveState {
    rows: Vec<Appointment>,
    stats: AppointmentStats,
    loading: bool,
}

/// Realtime-maintained appointment collection for one caller scope.
pub struct LiveAppointments {
    scope: TenantScope,
    service: Arc<AppointmentService>,
    state: Arc<RwLock<LiveState>>,
}

impl LiveAppointments {
    /// Create an empty collection; call [`refresh`](Self::refresh) to load.
    pub fn new(service: Arc<AppointmentService>, scope: TenantScope) -> Self {
        Self { scope, service, state: Arc::new(RwLock::new(LiveState::default())) }
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Snapshot of the current rows, in scheduled order.
    pub fn snapshot(&self) -> Vec<Appointment> {
        self.state.read().rows.clone()
    }

    /// Current aggregate statistics.
    pub fn stats(&self) -> AppointmentStats {
        self.state.read().stats.clone()
    }

    /// Refetch the full collection from the store.
    ///
    /// On failure the previous rows and stats are left untouched.
    pub async fn refresh(&self) -> Result<()> {
        self.state.write().loading = true;
        let result = self.service.list(&self.scope).await;
        let mut state = self.state.write();
        state.loading = false;

        let rows = result?;
        state.stats = appointment_stats(&rows);
        state.rows = rows;
        Ok(())
    }

    /// Apply one change event to the collection.
    ///
    /// Synchronous reducer over the previous state; stats are recomputed
    /// from the updated collection after every event. Events outside the
    /// collection's scope are dropped before touching the rows.
    pub fn apply(&self, event: &ChangeEvent) {
        if !event_in_scope(event, &self.scope) {
            return;
        }
        let mut state = self.state.write();
        apply_change(&mut state.rows, event);
        state.stats = appointment_stats(&state.rows);
    }

    /// Spawn a task applying events from `subscription` until the handle is
    /// dropped or the feed closes.
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
                state.stats = appointment_stats(&state.rows);
            }
        });
        WatchHandle::new(task)
    }
}
