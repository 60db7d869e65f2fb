//! Lease endpoints.

use super::{deleted, gone};
use crate::authz::guard;
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::middleware::CurrentPrincipal;
use crate::request::{CreateLeaseRequest, UpdateLeaseRequest, ValidatedJson};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use leasehold_access::{Action, ResourceRef, Target};
use leasehold_common_core::{LeaseId, UnitId};
use tracing::info;

/// `GET /units/:id/lease`
pub async fn get_for_unit(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(unit): Path<String>,
) -> ApiResult<Response> {
    let unit = UnitId::parse(&unit)?;
    let target = Target::Resource(ResourceRef::Unit(unit));
    guard(&state.pool, Some(&principal), Action::Read, target).await?;

    let lease = state.leases().find_by_unit(unit).await?.not_found("Lease")?;
    Ok(ok(lease))
}

/// `POST /units/:id/lease`: lease the unit and mark it occupied.
pub async fn create(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(unit): Path<String>,
    body: Result<ValidatedJson<CreateLeaseRequest>, ApiError>,
) -> ApiResult<Response> {
    let unit = UnitId::parse(&unit)?;
    guard(&state.pool, Some(&principal), Action::Create, Target::new_lease(unit)).await?;
    let ValidatedJson(req) = body?;

    if !state.users().exists(req.tenant_id).await? {
        return Err(ApiError::BadRequest(format!(
            "tenant {} does not exist",
            req.tenant_id.to_raw()
        )));
    }

    let lease = state.leases().create(unit, &req).await?;
    info!(lease_id = %lease.id, unit_id = %unit, tenant_id = %lease.tenant_id, "Lease created");
    Ok(created(&lease, format!("/api/v1/leases/{}", lease.id.to_raw())))
}

pub async fn get(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = LeaseId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Read, target(id)).await?;

    let lease = state.leases().find(id).await?.ok_or_else(|| gone(id))?;
    Ok(ok(lease))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    body: Result<ValidatedJson<UpdateLeaseRequest>, ApiError>,
) -> ApiResult<Response> {
    let id = LeaseId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Update, target(id)).await?;
    let ValidatedJson(req) = body?;

    let lease = state.leases().update(id, &req).await?.ok_or_else(|| gone(id))?;
    Ok(ok(lease))
}

/// `DELETE /leases/:id`: end the lease and vacate its unit.
pub async fn delete(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = LeaseId::parse(&id)?;
    guard(&state.pool, Some(&principal), Action::Delete, target(id)).await?;

    let response = deleted(state.leases().delete(id).await?, id)?;
    info!(lease_id = %id, deleted_by = %principal.id(), "Lease deleted");
    Ok(response)
}

fn target(id: LeaseId) -> Target {
    Target::Resource(ResourceRef::Lease(id))
}
