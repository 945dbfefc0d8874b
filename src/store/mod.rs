//! Banner storage module.
//!
//! Each schema version is an independent JSON file with its own lock.

mod collection;

pub use collection::*;

use std::path::Path;

use crate::models::{BannerV1, BannerV2};

/// The V1 and V2 banner collections.
pub struct BannerStore {
    pub v1: BannerCollection<BannerV1>,
    pub v2: BannerCollection<BannerV2>,
}

impl BannerStore {
    pub fn open(v1_path: &Path, v2_path: &Path) -> Self {
        Self {
            v1: BannerCollection::new(v1_path),
            v2: BannerCollection::new(v2_path),
        }
    }

    /// Log the current size of both collections. Corrupt files are reported, not fatal.
    pub async fn log_summary(&self) {
        match self.v1.list().await {
            Ok(banners) => tracing::info!("V1 banners: {} in {:?}", banners.len(), self.v1.path()),
            Err(e) => tracing::warn!("V1 banner file unreadable: {}", e),
        }
        match self.v2.list().await {
            Ok(banners) => tracing::info!("V2 banners: {} in {:?}", banners.len(), self.v2.path()),
            Err(e) => tracing::warn!("V2 banner file unreadable: {}", e),
        }
    }
}
