//! V1 banner model: a single styled line of text.

use serde::{Deserialize, Serialize};

use super::banner::{
    default_true, ensure_known_type, ensure_present, ensure_present_if_set, is_true, required,
};
use super::{BannerRecord, BannerVersion, ColorClass};
use crate::errors::AppError;

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_text_align() -> String {
    "center".to_string()
}

fn default_font_size() -> u32 {
    16
}

/// Display style of a V1 banner. Only `color` varies between banners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerStyle {
    pub color: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    #[serde(default = "default_text_align")]
    pub text_align: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl BannerStyle {
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            font_weight: default_font_weight(),
            text_align: default_text_align(),
            font_size: default_font_size(),
        }
    }
}

/// A V1 banner as stored in the V1 collection file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerV1 {
    pub id: String,
    pub title: String,
    pub style: BannerStyle,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,
}

/// Partial update of a V1 banner in stored terms. `None` keeps the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerV1Patch {
    pub id: Option<String>,
    pub title: Option<String>,
    pub color: Option<String>,
    pub enabled: Option<bool>,
}

impl BannerRecord for BannerV1 {
    type Patch = BannerV1Patch;

    const VERSION: BannerVersion = BannerVersion::V1;

    fn id(&self) -> &str {
        &self.id
    }

    fn merge(&self, patch: BannerV1Patch) -> Self {
        let style = match patch.color {
            Some(color) => BannerStyle {
                color,
                ..self.style.clone()
            },
            None => self.style.clone(),
        };

        Self {
            id: patch.id.unwrap_or_else(|| self.id.clone()),
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            style,
            enabled: patch.enabled.unwrap_or(self.enabled),
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        ensure_present(&self.id, "id")?;
        ensure_present(&self.title, "content")?;
        ensure_present(&self.style.color, "style.color")
    }

    fn validate_patch(patch: &BannerV1Patch) -> Result<(), AppError> {
        ensure_present_if_set(patch.id.as_deref(), "id")?;
        ensure_present_if_set(patch.title.as_deref(), "content")?;
        ensure_present_if_set(patch.color.as_deref(), "style.color")
    }
}

/// Resolve a caller-supplied type token to the hex color V1 stores.
fn resolve_color(kind: &str) -> Result<String, AppError> {
    ensure_known_type(kind)?;
    Ok(ColorClass::classify(kind).hex().to_string())
}

/// Request body for adding a V1 banner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBannerV1Request {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl TryFrom<CreateBannerV1Request> for BannerV1 {
    type Error = AppError;

    fn try_from(request: CreateBannerV1Request) -> Result<Self, Self::Error> {
        let id = required(request.id, "id")?;
        let title = required(request.content, "content")?;
        let color = resolve_color(&required(request.kind, "type")?)?;

        Ok(BannerV1 {
            id,
            title,
            style: BannerStyle::with_color(color),
            enabled: request.enabled.unwrap_or(true),
        })
    }
}

/// Request body for editing a V1 banner. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditBannerV1Request {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl TryFrom<EditBannerV1Request> for BannerV1Patch {
    type Error = AppError;

    fn try_from(request: EditBannerV1Request) -> Result<Self, Self::Error> {
        let color = request.kind.as_deref().map(resolve_color).transpose()?;

        Ok(BannerV1Patch {
            id: request.id,
            title: request.content,
            color,
            enabled: request.enabled,
        })
    }
}
