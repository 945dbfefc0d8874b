//! Holiday banner reconciliation.
//!
//! Diffs the calendar window against the managed holiday banners in the V2
//! collection and applies the missing insert and the stale deletes.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::{holiday_banner_id, CalendarFeed, HolidayTable};
use crate::errors::AppError;
use crate::store::BannerStore;

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub date: NaiveDate,
    /// Keyword matched by the first feed entry, if any.
    pub matched: Option<String>,
    pub inserted: Option<String>,
    pub deleted: Vec<String>,
    /// Holiday banner ids the current window calls for.
    pub expected: Vec<String>,
}

/// Keeps managed holiday banners in sync with the calendar feed.
pub struct HolidayReconciler {
    feed: Arc<dyn CalendarFeed>,
    store: Arc<BannerStore>,
    table: HolidayTable,
    lookahead_days: u32,
}

impl HolidayReconciler {
    pub fn new(
        feed: Arc<dyn CalendarFeed>,
        store: Arc<BannerStore>,
        table: HolidayTable,
        lookahead_days: u32,
    ) -> Self {
        Self {
            feed,
            store,
            table,
            lookahead_days,
        }
    }

    /// Run one reconciliation for `today`.
    ///
    /// The feed is fetched before anything is written, so a feed failure leaves
    /// the store untouched. Each insert and delete is committed on its own.
    pub async fn reconcile(&self, today: NaiveDate) -> Result<ReconcileReport, AppError> {
        let end = today
            .checked_add_days(Days::new(u64::from(self.lookahead_days)))
            .ok_or_else(|| AppError::Internal(format!("Lookahead overflows from {}", today)))?;

        let items = self.feed.fetch(today, end).await?;
        let year = today.year();

        let matched = items.first().and_then(|item| {
            let holiday = self.table.match_title(&item.title)?;
            tracing::debug!(title = %item.title, date = ?item.date, "Holiday matched");
            Some(holiday)
        });

        let expected: BTreeSet<String> = items
            .iter()
            .filter_map(|item| self.table.match_title(&item.title))
            .map(|holiday| holiday_banner_id(&holiday.keyword, year))
            .collect();

        let mut report = ReconcileReport {
            date: today,
            matched: matched.map(|holiday| holiday.keyword.clone()),
            inserted: None,
            deleted: Vec::new(),
            expected: expected.iter().cloned().collect(),
        };

        if let Some(holiday) = matched {
            if let Some(banner) = self
                .store
                .v2
                .insert_if_absent(holiday.to_banner(year))
                .await?
            {
                tracing::info!("Holiday banner {} inserted", banner.id);
                report.inserted = Some(banner.id);
            }
        }

        let managed = self.table.managed_ids(year);
        let stale: Vec<String> = self
            .store
            .v2
            .list()
            .await?
            .into_iter()
            .map(|banner| banner.id)
            .filter(|id| managed.contains(id) && !expected.contains(id))
            .collect();

        for id in stale {
            match self.store.v2.delete(&id).await {
                Ok(_) => {
                    tracing::info!("Holiday banner {} retracted", id);
                    report.deleted.push(id);
                }
                // Removed by someone else since the listing.
                Err(AppError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}
