//! Realtime change application
//!
//! The reducer merges one push-delivered change event into an in-memory
//! collection while preserving the collection's ordering invariant. It is a
//! pure synchronous function over the previous state, so back-to-back events
//! for the same id are applied correctly regardless of when consumers
//! re-render. Events are applied in delivery order; the feed carries no
//! sequence numbers and no reordering is attempted.

use async_trait::async_trait;
use frontdesk_domain::{Appointment, Call, ChangeEvent, ChangeOp, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use uuid::Uuid;

use crate::policy::TenantScope;

/// A record that can live in a realtime-maintained collection.
pub trait LiveRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Opaque identity used to match update/delete events.
    fn record_id(&self) -> Uuid;

    /// Restore the collection's defined order after an insert or a merge
    /// that may have moved a record's order key.
    fn resort(rows: &mut Vec<Self>);
}

impl LiveRecord for Appointment {
    fn record_id(&self) -> Uuid {
        self.id
    }

    // Appointments are kept ascending by scheduled time.
    fn resort(rows: &mut Vec<Self>) {
        rows.sort_by_key(|appointment| appointment.scheduled_at);
    }
}

impl LiveRecord for Call {
    fn record_id(&self) -> Uuid {
        self.id
    }

    // Calls are kept descending by creation time (newest first).
    fn resort(rows: &mut Vec<Self>) {
        rows.sort_by_key(|call| std::cmp::Reverse(call.created_at));
    }
}

/// Apply a single change event to a collection, returning whether the
/// collection changed.
///
/// - insert: decode the new row, append, re-sort
/// - update: shallow-merge the incoming fields over the matching record;
///   fields absent from the event never clobber existing values
/// - delete: remove by id; an unknown id is a no-op
/// - unknown operation tags are reported by the envelope and ignored
pub fn apply_change<T: LiveRecord>(rows: &mut Vec<T>, event: &ChangeEvent) -> bool {
    let Some(op) = event.op() else {
        return false;
    };

    match op {
        ChangeOp::Insert => apply_insert(rows, event),
        ChangeOp::Update => apply_update(rows, event),
        ChangeOp::Delete => apply_delete(rows, event),
    }
}

fn apply_insert<T: LiveRecord>(rows: &mut Vec<T>, event: &ChangeEvent) -> bool {
    let Some(row) = event.new.as_ref() else {
        tracing::warn!("insert event without a row, ignoring");
        return false;
    };
    let record: T = match serde_json::from_value(row.clone()) {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(error = %err, "undecodable insert row, ignoring");
            return false;
        }
    };

    // A redelivered insert for a known id replaces the record instead of
    // duplicating it, keeping the reducer idempotent.
    let id = record.record_id();
    if let Some(existing) = rows.iter_mut().find(|candidate| candidate.record_id() == id) {
        *existing = record;
    } else {
        rows.push(record);
    }
    T::resort(rows);
    true
}

fn apply_update<T: LiveRecord>(rows: &mut Vec<T>, event: &ChangeEvent) -> bool {
    let Some(id) = event.record_id() else {
        tracing::warn!("update event without a record id, ignoring");
        return false;
    };
    let Some(incoming) = event.new.as_ref() else {
        tracing::warn!("update event without a row, ignoring");
        return false;
    };
    let Some(position) = rows.iter().position(|candidate| candidate.record_id() == id) else {
        return false;
    };

    let merged = match shallow_merge(&rows[position], incoming) {
        Ok(merged) => merged,
        Err(err) => {
            tracing::warn!(error = %err, %id, "unmergeable update row, keeping prior state");
            return false;
        }
    };

    rows[position] = merged;
    T::resort(rows);
    true
}

fn apply_delete<T: LiveRecord>(rows: &mut Vec<T>, event: &ChangeEvent) -> bool {
    let Some(id) = event.record_id() else {
        tracing::warn!("delete event without a record id, ignoring");
        return false;
    };
    let before = rows.len();
    rows.retain(|candidate| candidate.record_id() != id);
    rows.len() != before
}

/// Merge the fields present in `incoming` over `existing`, leaving every
/// absent field untouched.
fn shallow_merge<T: LiveRecord>(existing: &T, incoming: &Value) -> Result<T> {
    let mut base = serde_json::to_value(existing)
        .map_err(|err| frontdesk_domain::FrontdeskError::Internal(err.to_string()))?;

    if let (Value::Object(base_map), Value::Object(patch)) = (&mut base, incoming) {
        for (key, value) in patch {
            base_map.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(base)
        .map_err(|err| frontdesk_domain::FrontdeskError::Internal(err.to_string()))
}

/// Tenant check on an event payload: a scoped collection ignores rows from
/// other organizations even if the upstream filter leaks them.
pub(crate) fn event_in_scope(event: &ChangeEvent, scope: &TenantScope) -> bool {
    let Some(own) = scope.filter() else {
        return true;
    };
    let org_of = |value: &Value| {
        value
            .get("organization_id")
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
    };
    match (event.new.as_ref().and_then(org_of), event.old.as_ref().and_then(org_of)) {
        (Some(org), _) | (None, Some(org)) => org == own,
        // Rows without a tenant column are kept; the upstream filter and the
        // reducer's id matching bound the blast radius.
        (None, None) => true,
    }
}

/// Port for subscribing to a table's change stream.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Open a subscription scoped to the caller's tenant visibility.
    async fn subscribe(&self, table: &str, scope: &TenantScope) -> Result<ChangeSubscription>;
}

/// A live subscription: an ordered event stream plus a guard that tears the
/// upstream subscription down when dropped.
pub struct ChangeSubscription {
    events: mpsc::Receiver<ChangeEvent>,
    _guard: Option<DropGuard>,
}

impl ChangeSubscription {
    /// Wrap a receiving channel and the token that cancels its producer.
    pub fn new(events: mpsc::Receiver<ChangeEvent>, token: CancellationToken) -> Self {
        Self { events, _guard: Some(token.drop_guard()) }
    }

    /// Subscription without a producer-side guard (test feeds).
    pub fn detached(events: mpsc::Receiver<ChangeEvent>) -> Self {
        Self { events, _guard: None }
    }

    /// Receive the next event in delivery order.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        self.events.recv().await
    }
}

/// Handle for a spawned change-applier task.
///
/// Dropping the handle aborts the task, which in turn drops the subscription
/// and releases the upstream feed: no further events are applied after the
/// consumer goes away.
#[derive(Debug)]
pub struct WatchHandle {
    task: JoinHandle<()>,
}

impl WatchHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Whether the applier task is still running.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
