//! Unit endpoints, including the public vacancy listing.

use super::{deleted, gone};
use crate::authz::guard;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{CurrentPrincipal, MaybePrincipal};
use crate::request::{CreateUnitRequest, UpdateUnitRequest, ValidatedJson, ValidatedQuery};
use crate::response::{created, ok, PaginatedResponse, PaginationParams};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use leasehold_access::{Action, ListFilter, ResourceRef, Target};
use leasehold_common_core::{PropertyId, UnitId};
use tracing::info;

/// `GET /properties/:id/units`
pub async fn list_for_property(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(property): Path<String>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> ApiResult<Response> {
    let property = PropertyId::parse(&property)?;
    let target = Target::Resource(ResourceRef::Property(property));
    guard(&state.pool, Some(&principal), Action::Read, target).await?;

    let (units, total) = state.units().list_for_property(property, &params).await?;
    Ok(ok(PaginatedResponse::new(units, &params, total)))
}

/// `POST /properties/:id/units`
pub async fn create(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(property): Path<String>,
    body: Result<ValidatedJson<CreateUnitRequest>, ApiError>,
) -> ApiResult<Response> {
    let property = PropertyId::parse(&property)?;
    guard(&state.pool, Some(&principal), Action::Create, Target::new_unit(property)).await?;
    let ValidatedJson(req) = body?;

    let unit = state.units().create(property, principal.id(), &req).await?;
    info!(unit_id = %unit.id, property_id = %property, "Unit created");
    Ok(created(&unit, format!("/api/v1/units/{}", unit.id.to_raw())))
}

/// `GET /units/public`: vacant public units, open to anonymous callers.
pub async fn list_public(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> ApiResult<Response> {
    let filter = guard(&state.pool, principal.as_ref(), Action::List, Target::PublicUnits)
        .await?
        .unwrap_or(ListFilter::PublicVacant);

    let (units, total) = state.units().list_public(filter, &params).await?;
    Ok(ok(PaginatedResponse::new(units, &params, total)))
}

pub async fn get(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = UnitId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Read, target(id)).await?;

    let unit = state.units().find(id).await?.ok_or_else(|| gone(id))?;
    Ok(ok(unit))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    body: Result<ValidatedJson<UpdateUnitRequest>, ApiError>,
) -> ApiResult<Response> {
    let id = UnitId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Update, target(id)).await?;
    let ValidatedJson(req) = body?;

    let unit = state
        .units()
        .update(id, principal.id(), &req)
        .await?
        .ok_or_else(|| gone(id))?;
    Ok(ok(unit))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = UnitId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Delete, target(id)).await?;

    let response = deleted(state.units().delete(id).await?, id)?;
    info!(unit_id = %id, deleted_by = %principal.id(), "Unit deleted");
    Ok(response)
}

fn target(id: UnitId) -> Target {
    Target::Resource(ResourceRef::Unit(id))
}
