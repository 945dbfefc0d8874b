//! Calendar feed client.
//!
//! Only the response contract matters: an ordered list of items, each with a title.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::errors::AppError;

/// One entry of the calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarItem {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    items: Vec<CalendarItem>,
}

/// Source of calendar entries for a date range, ordered by date ascending.
#[async_trait]
pub trait CalendarFeed: Send + Sync {
    async fn fetch(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<CalendarItem>, AppError>;
}

/// HTTP calendar feed (Hebcal-compatible JSON).
#[derive(Clone)]
pub struct HttpCalendarFeed {
    client: Client,
    base_url: String,
}

impl HttpCalendarFeed {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CalendarFeed for HttpCalendarFeed {
    #[instrument(level = "info", skip(self))]
    async fn fetch(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarItem>, AppError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("start", start.to_string()), ("end", end.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let body: CalendarResponse = resp.json().await?;
        tracing::debug!("Calendar feed returned {} items", body.items.len());
        Ok(body.items)
    }
}
