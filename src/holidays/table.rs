//! Holiday keyword table and the deterministic holiday banner id scheme.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::BannerV2;

/// Type token of banners created by the reconciler.
pub const HOLIDAY_BANNER_TYPE: &str = "holiday";

/// Greeting shown while a holiday is in the calendar window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayGreeting {
    /// Lowercase substring searched for in feed titles.
    pub keyword: String,
    pub header: String,
    pub content: String,
}

impl HolidayGreeting {
    fn new(keyword: &str, header: &str, content: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            header: header.to_string(),
            content: content.to_string(),
        }
    }

    /// The managed V2 banner for this holiday in `year`.
    pub fn to_banner(&self, year: i32) -> BannerV2 {
        BannerV2 {
            id: holiday_banner_id(&self.keyword, year),
            kind: HOLIDAY_BANNER_TYPE.to_string(),
            persistent: true,
            header: self.header.clone(),
            content: self.content.clone(),
            enabled: true,
        }
    }
}

/// `"lag baomer"` in 2025 becomes `"lag_baomer_2025"`.
pub fn holiday_banner_id(keyword: &str, year: i32) -> String {
    format!("{}_{}", keyword.replace(' ', "_"), year)
}

/// Ordered keyword table. Order matters: on overlapping keywords the last match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayTable {
    entries: Vec<HolidayGreeting>,
}

impl Default for HolidayTable {
    fn default() -> Self {
        Self {
            entries: vec![
                HolidayGreeting::new(
                    "rosh hashana",
                    "Happy Rosh Hashanah!",
                    "Wishing you a happy, healthy and sweet New Year!",
                ),
                HolidayGreeting::new(
                    "sukkos",
                    "Happy Succos!",
                    "Wishing you a happy and healthy Succos!",
                ),
                HolidayGreeting::new(
                    "chanukah",
                    "Happy Chanukah!",
                    "Wishing you a happy and healthy Chanukah!",
                ),
                HolidayGreeting::new(
                    "tu bishvat",
                    "Happy Tu B'Shvat!",
                    "Wishing you a happy and healthy Tu B'Shvat!",
                ),
                HolidayGreeting::new(
                    "purim",
                    "Happy Purim!",
                    "Wishing you a happy and healthy Purim!",
                ),
                HolidayGreeting::new(
                    "pesach",
                    "Happy Pesach!",
                    "Wishing you a happy and healthy Pesach!",
                ),
                HolidayGreeting::new(
                    "lag baomer",
                    "Happy Lag B'Omer!",
                    "Wishing you a happy and healthy Lag B'Omer!",
                ),
                HolidayGreeting::new(
                    "shavuos",
                    "Happy Shavuos!",
                    "Wishing you a happy and healthy Shavuos!",
                ),
            ],
        }
    }
}

impl HolidayTable {
    /// Build a table, lower-casing keywords. Empty tables and blank fields are rejected.
    pub fn new(entries: Vec<HolidayGreeting>) -> Result<Self, AppError> {
        if entries.is_empty() {
            return Err(AppError::Validation(
                "Holiday table must contain at least one entry".to_string(),
            ));
        }

        let mut normalized = Vec::with_capacity(entries.len());
        for mut entry in entries {
            entry.keyword = entry.keyword.trim().to_lowercase();
            if entry.keyword.is_empty()
                || entry.header.trim().is_empty()
                || entry.content.trim().is_empty()
            {
                return Err(AppError::Validation(format!(
                    "Holiday entry '{}' needs a keyword, header and content",
                    entry.keyword
                )));
            }
            normalized.push(entry);
        }

        Ok(Self {
            entries: normalized,
        })
    }

    /// Load a table from a JSON array of `{keyword, header, content}` objects.
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path).await?;
        let entries: Vec<HolidayGreeting> = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Validation(format!(
                "Invalid holiday table {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[HolidayGreeting] {
        &self.entries
    }

    /// Find the holiday a feed title refers to. Case-insensitive; last match wins.
    pub fn match_title(&self, title: &str) -> Option<&HolidayGreeting> {
        let title = title.to_lowercase();
        self.entries
            .iter()
            .rev()
            .find(|entry| title.contains(entry.keyword.as_str()))
    }

    /// Every banner id the reconciler owns for `year`.
    pub fn managed_ids(&self, year: i32) -> HashSet<String> {
        self.entries
            .iter()
            .map(|entry| holiday_banner_id(&entry.keyword, year))
            .collect()
    }
}
