//! Daily reconciliation timer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, NaiveTime, Utc};
use tokio::task::JoinHandle;

use super::HolidayReconciler;

/// Time left until the next `hour_utc`:00:00 strictly after `now`.
pub fn until_next_run(now: DateTime<Utc>, hour_utc: u32) -> Duration {
    let at = NaiveTime::from_hms_opt(hour_utc, 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        now.date_naive()
            .checked_add_days(Days::new(1))
            .map(|d| d.and_time(at).and_utc())
            .unwrap_or(today)
    };
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

/// Spawn the task that reconciles once per day at `hour_utc`.
///
/// A failed run is logged and retried at the next tick.
pub fn spawn_daily(reconciler: Arc<HolidayReconciler>, hour_utc: u32) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = until_next_run(Utc::now(), hour_utc);
            tracing::debug!("Next holiday reconciliation in {:?}", wait);
            tokio::time::sleep(wait).await;

            let today = Utc::now().date_naive();
            match reconciler.reconcile(today).await {
                Ok(report) => tracing::info!(
                    date = %report.date,
                    matched = ?report.matched,
                    inserted = ?report.inserted,
                    deleted = ?report.deleted,
                    "Holiday reconciliation finished"
                ),
                Err(e) => tracing::warn!("Holiday reconciliation for {} skipped: {}", today, e),
            }
        }
    })
}
