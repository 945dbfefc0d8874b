//! V2 banner API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{BannerV2, BannerV2Patch, CreateBannerV2Request};
use crate::AppState;

/// GET /api/v2/banners - List all V2 banners in display order.
pub async fn list_v2_banners(State(state): State<AppState>) -> ApiResult<Vec<BannerV2>> {
    success(state.store.v2.list().await?)
}

/// GET /api/v2/banners/{id} - Get a single V2 banner.
pub async fn get_v2_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BannerV2> {
    success(state.store.v2.get(&id).await?)
}

/// POST /api/v2/banners - Add a V2 banner.
pub async fn create_v2_banner(
    State(state): State<AppState>,
    Json(request): Json<CreateBannerV2Request>,
) -> ApiResult<BannerV2> {
    let banner = BannerV2::try_from(request)?;
    success(state.store.v2.insert(banner).await?)
}

/// PATCH /api/v2/banners/{id} - Edit a V2 banner; omitted fields keep their value.
pub async fn edit_v2_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BannerV2Patch>,
) -> ApiResult<BannerV2> {
    success(state.store.v2.edit_by_merge(&id, patch).await?)
}

/// DELETE /api/v2/banners/{id} - Delete a V2 banner and return it.
pub async fn delete_v2_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BannerV2> {
    success(state.store.v2.delete(&id).await?)
}
