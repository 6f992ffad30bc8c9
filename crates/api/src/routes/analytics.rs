//! Combined dashboard analytics

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use frontdesk_core::{appointment_stats, call_stats};
use frontdesk_domain::{AppointmentStats, CallStats};
use serde::Serialize;

use super::identity::Caller;
use crate::context::AppContext;
use crate::error::ApiError;

/// Combined stats payload for the dashboard's overview cards.
#[derive(Debug, Serialize)]
pub struct AnalyticsOverview {
    pub appointments: AppointmentStats,
    pub calls: CallStats,
}

/// `GET /analytics`
///
/// Served from the realtime-maintained caches when the change feed is on
/// (scoped by folding the caller's slice of the cache), falling back to
/// direct store queries otherwise.
pub async fn overview(
    State(context): State<Arc<AppContext>>,
    caller: Caller,
) -> Result<Json<AnalyticsOverview>, ApiError> {
    if context.realtime_enabled() {
        let appointments: Vec<_> = context
            .live_appointments
            .snapshot()
            .into_iter()
            .filter(|row| caller.scope.permits(row.organization_id))
            .collect();
        let calls: Vec<_> = context
            .live_calls
            .snapshot()
            .into_iter()
            .filter(|row| caller.scope.permits(row.organization_id))
            .collect();

        return Ok(Json(AnalyticsOverview {
            appointments: appointment_stats(&appointments),
            calls: call_stats(&calls),
        }));
    }

    let appointments = context.appointments.stats(&caller.scope).await?;
    let calls = context.calls.stats(&caller.scope).await?;
    Ok(Json(AnalyticsOverview { appointments, calls }))
}
