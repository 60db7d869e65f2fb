//! Property image endpoints. Images are attached through one of the
//! property's units but belong to the property itself.

use super::{deleted, gone};
use crate::authz::guard;
use crate::error::{ApiError, ApiResult};
use crate::middleware::CurrentPrincipal;
use crate::request::{CreateImageRequest, ValidatedJson, ValidatedQuery};
use crate::response::{created, ok, PaginatedResponse, PaginationParams};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use leasehold_access::{Action, ResourceRef, Target};
use leasehold_common_core::{ImageId, UnitId};
use tracing::info;

/// `GET /units/:id/images`
pub async fn list_for_unit(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(unit): Path<String>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> ApiResult<Response> {
    let unit = UnitId::parse(&unit)?;
    let target = Target::Resource(ResourceRef::Unit(unit));
    guard(&state.pool, Some(&principal), Action::Read, target).await?;

    let property = state.units().find(unit).await?.ok_or_else(|| gone(unit))?.property_id;
    let (images, total) = state.images().list_for_property(property, &params).await?;
    Ok(ok(PaginatedResponse::new(images, &params, total)))
}

/// `POST /units/:id/images`
pub async fn create(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(unit): Path<String>,
    body: Result<ValidatedJson<CreateImageRequest>, ApiError>,
) -> ApiResult<Response> {
    let unit = UnitId::parse(&unit)?;
    let property = state.units().find(unit).await?.ok_or_else(|| gone(unit))?.property_id;
    guard(&state.pool, Some(&principal), Action::Create, Target::new_image(property)).await?;
    let ValidatedJson(req) = body?;

    let image = state.images().create(property, &req.image).await?;
    info!(image_id = %image.id, property_id = %property, "Image attached");
    Ok(created(&image, format!("/api/v1/images/{}", image.id.to_raw())))
}

pub async fn get(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = ImageId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Read, target(id)).await?;

    let image = state.images().find(id).await?.ok_or_else(|| gone(id))?;
    Ok(ok(image))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = ImageId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Delete, target(id)).await?;

    deleted(state.images().delete(id).await?, id)
}

fn target(id: ImageId) -> Target {
    Target::Resource(ResourceRef::Image(id))
}
