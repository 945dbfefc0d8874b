//! File-backed banner collection with read-modify-write under an exclusive lock.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::BannerRecord;

/// On-disk shape of a collection file. Unknown top-level keys survive rewrites.
#[derive(Debug, Serialize, Deserialize)]
struct BannerDocument<T> {
    banners: Vec<T>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl<T> Default for BannerDocument<T> {
    fn default() -> Self {
        Self {
            banners: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Ordered collection of one banner version, backed by a single JSON file.
///
/// Every mutation holds `write_lock` for the whole read-modify-write span.
/// Writes go to a sibling temporary file that is renamed over the target, so
/// readers always see a complete snapshot and may skip the lock.
pub struct BannerCollection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: BannerRecord> BannerCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List all banners in insertion order. A missing file is an empty collection.
    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        Ok(self.load().await?.banners)
    }

    /// Get a banner by ID.
    pub async fn get(&self, id: &str) -> Result<T, AppError> {
        self.load()
            .await?
            .banners
            .into_iter()
            .find(|b| b.id() == id)
            .ok_or_else(|| not_found::<T>(id))
    }

    /// Append a new banner. Fails if the id is already taken.
    pub async fn insert(&self, record: T) -> Result<T, AppError> {
        record.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;

        if doc.banners.iter().any(|b| b.id() == record.id()) {
            return Err(AppError::Validation(format!(
                "{} banner {} already exists",
                T::VERSION,
                record.id()
            )));
        }

        doc.banners.push(record.clone());
        self.save(&doc).await?;

        tracing::info!(version = %T::VERSION, id = record.id(), "Banner added");
        Ok(record)
    }

    /// Append a banner unless one with the same id exists. Returns `None` when skipped.
    pub async fn insert_if_absent(&self, record: T) -> Result<Option<T>, AppError> {
        record.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;

        if doc.banners.iter().any(|b| b.id() == record.id()) {
            return Ok(None);
        }

        doc.banners.push(record.clone());
        self.save(&doc).await?;

        tracing::info!(version = %T::VERSION, id = record.id(), "Banner added");
        Ok(Some(record))
    }

    /// Merge `patch` into the banner `old_id`, keeping its position.
    ///
    /// The patch may rename the banner, but not onto an id held by another banner.
    pub async fn edit_by_merge(&self, old_id: &str, patch: T::Patch) -> Result<T, AppError> {
        T::validate_patch(&patch)?;

        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;

        let index = doc
            .banners
            .iter()
            .position(|b| b.id() == old_id)
            .ok_or_else(|| not_found::<T>(old_id))?;

        let merged = doc.banners[index].merge(patch);

        if merged.id() != old_id && doc.banners.iter().any(|b| b.id() == merged.id()) {
            return Err(AppError::Validation(format!(
                "Cannot rename {} banner {} to {}: id already exists",
                T::VERSION,
                old_id,
                merged.id()
            )));
        }

        doc.banners[index] = merged.clone();
        self.save(&doc).await?;

        tracing::info!(version = %T::VERSION, old_id, id = merged.id(), "Banner edited");
        Ok(merged)
    }

    /// Remove the banner `id` and return it.
    pub async fn delete(&self, id: &str) -> Result<T, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.load().await?;

        let index = doc
            .banners
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;

        let removed = doc.banners.remove(index);
        self.save(&doc).await?;

        tracing::info!(version = %T::VERSION, id, "Banner deleted");
        Ok(removed)
    }

    async fn load(&self) -> Result<BannerDocument<T>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                tracing::error!("Failed to parse {}: {}", self.path.display(), e);
                AppError::Storage(format!(
                    "{} banner file {} is corrupt: {}",
                    T::VERSION,
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BannerDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, doc: &BannerDocument<T>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        doc.serialize(&mut serializer)
            .map_err(|e| AppError::Internal(format!("Failed to serialize banners: {}", e)))?;

        let tmp_path = self.tmp_path();
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(&buf).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn not_found<T: BannerRecord>(id: &str) -> AppError {
    AppError::NotFound(format!("{} banner {} not found", T::VERSION, id))
}
