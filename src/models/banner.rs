//! Shared behaviour of versioned banner records.

use serde::{de::DeserializeOwned, Serialize};

use super::BannerVersion;
use crate::errors::AppError;

/// A record that can live in a versioned banner collection.
///
/// `Patch` is the explicit partial-update form of the record: every field is
/// either present (override) or absent (keep the previous value). `merge` is
/// pure, so the merge law can be checked without touching storage.
pub trait BannerRecord:
    Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Patch: Send;

    const VERSION: BannerVersion;

    fn id(&self) -> &str;

    /// Apply `patch` on top of `self`, field by field.
    fn merge(&self, patch: Self::Patch) -> Self;

    /// Reject records that would be unusable by the downstream app.
    fn validate(&self) -> Result<(), AppError>;

    /// Check only the fields a patch supplies. Absent fields keep the stored
    /// value as is, even if it predates the current rules.
    fn validate_patch(patch: &Self::Patch) -> Result<(), AppError>;
}

pub(crate) fn default_true() -> bool {
    true
}

/// Serialization skip predicate: `enabled` is only written when it is false.
pub(crate) fn is_true(value: &bool) -> bool {
    *value
}

/// Unwrap a required request field, rejecting absent or blank values.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

pub(crate) fn ensure_present(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// `ensure_present` for an optional patch field; `None` passes.
pub(crate) fn ensure_present_if_set(value: Option<&str>, field: &str) -> Result<(), AppError> {
    value.map_or(Ok(()), |v| ensure_present(v, field))
}

pub(crate) fn ensure_known_type(token: &str) -> Result<(), AppError> {
    if super::is_known_type(token) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unknown banner type '{}', expected one of: {}",
            token,
            super::BANNER_TYPES.join(", ")
        )))
    }
}
