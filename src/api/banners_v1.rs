//! V1 banner API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{BannerV1, BannerV1Patch, CreateBannerV1Request, EditBannerV1Request};
use crate::AppState;

/// GET /api/v1/banners - List all V1 banners in display order.
pub async fn list_v1_banners(State(state): State<AppState>) -> ApiResult<Vec<BannerV1>> {
    success(state.store.v1.list().await?)
}

/// GET /api/v1/banners/{id} - Get a single V1 banner.
pub async fn get_v1_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BannerV1> {
    success(state.store.v1.get(&id).await?)
}

/// POST /api/v1/banners - Add a V1 banner. The type token resolves to the stored color.
pub async fn create_v1_banner(
    State(state): State<AppState>,
    Json(request): Json<CreateBannerV1Request>,
) -> ApiResult<BannerV1> {
    let banner = BannerV1::try_from(request)?;
    success(state.store.v1.insert(banner).await?)
}

/// PATCH /api/v1/banners/{id} - Edit a V1 banner; omitted fields keep their value.
pub async fn edit_v1_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<EditBannerV1Request>,
) -> ApiResult<BannerV1> {
    let patch = BannerV1Patch::try_from(request)?;
    success(state.store.v1.edit_by_merge(&id, patch).await?)
}

/// DELETE /api/v1/banners/{id} - Delete a V1 banner and return it.
pub async fn delete_v1_banner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BannerV1> {
    success(state.store.v1.delete(&id).await?)
}
