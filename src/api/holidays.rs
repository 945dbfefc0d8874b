//! Holiday reconciliation endpoint.

use axum::extract::State;
use chrono::Utc;

use super::{success, ApiResult};
use crate::holidays::ReconcileReport;
use crate::AppState;

/// POST /api/holidays/reconcile - Run the holiday reconciliation for today (UTC) now.
pub async fn reconcile_holidays(State(state): State<AppState>) -> ApiResult<ReconcileReport> {
    let today = Utc::now().date_naive();
    let report = state.reconciler.reconcile(today).await.map_err(|e| {
        tracing::warn!("On-demand holiday reconciliation failed: {}", e);
        e
    })?;
    success(report)
}
