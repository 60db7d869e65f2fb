//! Property endpoints.

use super::{deleted, gone};
use crate::authz::guard;
use crate::error::{ApiError, ApiResult};
use crate::middleware::CurrentPrincipal;
use crate::request::{CreatePropertyRequest, UpdatePropertyRequest, ValidatedJson, ValidatedQuery};
use crate::response::{created, ok, PaginatedResponse, PaginationParams};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use leasehold_access::{Action, ListFilter, ResourceRef, Target};
use leasehold_common_core::PropertyId;
use tracing::info;

/// `GET /properties`: everything for admins, own properties otherwise.
pub async fn list(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> ApiResult<Response> {
    let filter = guard(&state.pool, Some(&principal), Action::List, Target::Properties).await?;
    let owner = match filter {
        Some(ListFilter::OwnedBy(owner)) => Some(owner),
        _ => None,
    };

    let (properties, total) = state.properties().list(owner, &params).await?;
    Ok(ok(PaginatedResponse::new(properties, &params, total)))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<ValidatedJson<CreatePropertyRequest>, ApiError>,
) -> ApiResult<Response> {
    guard(&state.pool, Some(&principal), Action::Create, Target::NewProperty).await?;
    let ValidatedJson(req) = body?;

    let property = state.properties().create(principal.id(), &req).await?;
    info!(property_id = %property.id, owner_id = %property.owner_id, "Property created");
    Ok(created(&property, format!("/api/v1/properties/{}", property.id.to_raw())))
}

pub async fn get(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = PropertyId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Read, target(id)).await?;

    let property = state.properties().find(id).await?.ok_or_else(|| gone(id))?;
    Ok(ok(property))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    body: Result<ValidatedJson<UpdatePropertyRequest>, ApiError>,
) -> ApiResult<Response> {
    let id = PropertyId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Update, target(id)).await?;
    let ValidatedJson(req) = body?;

    let property = state
        .properties()
        .update(id, principal.id(), &req)
        .await?
        .ok_or_else(|| gone(id))?;
    Ok(ok(property))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = PropertyId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Delete, target(id)).await?;

    let response = deleted(state.properties().delete(id).await?, id)?;
    info!(property_id = %id, deleted_by = %principal.id(), "Property deleted");
    Ok(response)
}

fn target(id: PropertyId) -> Target {
    Target::Resource(ResourceRef::Property(id))
}
