//! V2 banner model: typed banner with header and persistence flag.

use serde::{Deserialize, Serialize};

use super::banner::{
    default_true, ensure_known_type, ensure_present, ensure_present_if_set, is_true, required,
};
use super::{BannerRecord, BannerVersion};
use crate::errors::AppError;

/// A V2 banner as stored in the V2 collection file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerV2 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_true")]
    pub persistent: bool,
    pub header: String,
    pub content: String,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,
}

/// Partial update of a V2 banner. `None` keeps the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BannerV2Patch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub persistent: Option<bool>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl BannerRecord for BannerV2 {
    type Patch = BannerV2Patch;

    const VERSION: BannerVersion = BannerVersion::V2;

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&self, patch: BannerV2Patch) -> Self {
        Self {
            id: patch.id.unwrap_or_else(|| self.id.clone()),
            kind: patch.kind.unwrap_or_else(|| self.kind.clone()),
            persistent: patch.persistent.unwrap_or(self.persistent),
            header: patch.header.unwrap_or_else(|| self.header.clone()),
            content: patch.content.unwrap_or_else(|| self.content.clone()),
            enabled: patch.enabled.unwrap_or(self.enabled),
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        ensure_present(&self.id, "id")?;
        ensure_known_type(&self.kind)?;
        ensure_present(&self.header, "header")?;
        ensure_present(&self.content, "content")
    }

    fn validate_patch(patch: &BannerV2Patch) -> Result<(), AppError> {
        ensure_present_if_set(patch.id.as_deref(), "id")?;
        if let Some(kind) = &patch.kind {
            ensure_known_type(kind)?;
        }
        ensure_present_if_set(patch.header.as_deref(), "header")?;
        ensure_present_if_set(patch.content.as_deref(), "content")
    }
}

/// Request body for adding a V2 banner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBannerV2Request {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub persistent: Option<bool>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl TryFrom<CreateBannerV2Request> for BannerV2 {
    type Error = AppError;

    fn try_from(request: CreateBannerV2Request) -> Result<Self, Self::Error> {
        let banner = BannerV2 {
            id: required(request.id, "id")?,
            kind: required(request.kind, "type")?,
            persistent: request.persistent.unwrap_or(true),
            header: required(request.header, "header")?,
            content: required(request.content, "content")?,
            enabled: request.enabled.unwrap_or(true),
        };
        banner.validate()?;
        Ok(banner)
    }
}
