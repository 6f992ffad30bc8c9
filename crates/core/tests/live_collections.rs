//! Live collection tests: refresh, reducer wiring, watch lifecycle

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use frontdesk_core::{
    AppointmentService, CallService, ChangeSubscription, LiveAppointments, LiveCalls, TenantScope,
};
use frontdesk_domain::{AppointmentStatus, CallStatus, ChangeEvent};
use support::stores::{MockAppointmentStore, MockCallStore};
use tokio::sync::mpsc;
use uuid::Uuid;

#[tokio::test]
async fn refresh_loads_rows_and_stats() {
    let org = Uuid::new_v4();
    let store = MockAppointmentStore::new(vec![
        support::appointment(org, 30),
        support::appointment(org, 10),
    ]);
    let live =
        LiveAppointments::new(Arc::new(AppointmentService::new(Arc::new(store))), TenantScope::org(org));

    assert!(live.snapshot().is_empty());
    live.refresh().await.unwrap();

    let rows = live.snapshot();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].scheduled_at <= rows[1].scheduled_at);
    assert_eq!(live.stats().total, 2);
    assert!(!live.is_loading());
}

#[tokio::test]
async fn failed_refresh_keeps_last_known_good_state() {
    let org = Uuid::new_v4();
    let store = MockAppointmentStore::new(vec![support::appointment(org, 30)]);
    let live = LiveAppointments::new(
        Arc::new(AppointmentService::new(Arc::new(store.clone()))),
        TenantScope::org(org),
    );
    live.refresh().await.unwrap();

    store.fail_next();
    let err = live.refresh().await;
    assert!(err.is_err());

    // Collection unchanged, loading cleared.
    assert_eq!(live.snapshot().len(), 1);
    assert_eq!(live.stats().total, 1);
    assert!(!live.is_loading());
}

#[tokio::test]
async fn applied_events_update_rows_and_stats_together() {
    let org = Uuid::new_v4();
    let live = LiveAppointments::new(
        Arc::new(AppointmentService::new(Arc::new(MockAppointmentStore::default()))),
        TenantScope::org(org),
    );

    let record = support::appointment(org, 15);
    live.apply(&ChangeEvent::insert(serde_json::to_value(&record).unwrap()));
    assert_eq!(live.stats().scheduled, 1);

    live.apply(&ChangeEvent::update(
        serde_json::json!({ "id": record.id, "status": "confirmed" }),
    ));
    let stats = live.stats();
    assert_eq!(stats.scheduled, 0);
    assert_eq!(stats.confirmed, 1);
    assert_eq!(stats.status_sum(), stats.total);
}

#[tokio::test]
async fn events_for_other_orgs_are_dropped() {
    let org = Uuid::new_v4();
    let live = LiveAppointments::new(
        Arc::new(AppointmentService::new(Arc::new(MockAppointmentStore::default()))),
        TenantScope::org(org),
    );

    let foreign = support::appointment(Uuid::new_v4(), 15);
    live.apply(&ChangeEvent::insert(serde_json::to_value(&foreign).unwrap()));

    assert!(live.snapshot().is_empty());
    assert_eq!(live.stats().total, 0);
}

#[tokio::test]
async fn watch_applies_events_in_delivery_order() {
    let org = Uuid::new_v4();
    let live = LiveAppointments::new(
        Arc::new(AppointmentService::new(Arc::new(MockAppointmentStore::default()))),
        TenantScope::org(org),
    );

    let (tx, rx) = mpsc::channel(16);
    let handle = live.watch(ChangeSubscription::detached(rx));

    let record = support::appointment(org, 15);
    tx.send(ChangeEvent::insert(serde_json::to_value(&record).unwrap())).await.unwrap();
    tx.send(ChangeEvent::update(serde_json::json!({ "id": record.id, "status": "confirmed" })))
        .await
        .unwrap();
    tx.send(ChangeEvent::update(serde_json::json!({ "id": record.id, "status": "completed" })))
        .await
        .unwrap();

    // Give the applier task a moment to drain the channel.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let rows = live.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, AppointmentStatus::Completed);
    assert!(handle.is_active());
}

#[tokio::test]
async fn dropping_the_watch_handle_stops_event_application() {
    let org = Uuid::new_v4();
    let live = LiveAppointments::new(
        Arc::new(AppointmentService::new(Arc::new(MockAppointmentStore::default()))),
        TenantScope::org(org),
    );

    let (tx, rx) = mpsc::channel(16);
    let handle = live.watch(ChangeSubscription::detached(rx));
    drop(handle);

    // The aborted applier must not pick this up.
    let record = support::appointment(org, 15);
    let _ = tx.send(ChangeEvent::insert(serde_json::to_value(&record).unwrap())).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(live.snapshot().is_empty());
}

#[tokio::test]
async fn live_calls_track_display_buckets() {
    let org = Uuid::new_v4();
    let store = MockCallStore::new(vec![
        support::call(org, CallStatus::Answered, Utc::now()),
        support::call(org, CallStatus::NoAnswer, Utc::now()),
    ]);
    let live = LiveCalls::new(Arc::new(CallService::new(Arc::new(store))), TenantScope::org(org));
    live.refresh().await.unwrap();

    let stats = live.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.voicemail, 1);

    // A delete event for an unknown id changes nothing.
    live.apply(&ChangeEvent::delete(serde_json::json!({
        "id": Uuid::new_v4(),
        "organization_id": org,
    })));
    assert_eq!(live.stats(), stats);
}
