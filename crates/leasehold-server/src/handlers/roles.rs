//! Role administration. Reads are open to any authenticated user.

use crate::authz::require_admin;
use crate::error::{not_found, ApiError, ApiResult};
use crate::middleware::CurrentPrincipal;
use crate::request::{CreateRoleRequest, UpdateRoleRequest, ValidatedJson, ValidatedQuery};
use crate::response::{created, no_content, ok, PaginatedResponse, PaginationParams};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use leasehold_common_core::RoleId;
use tracing::info;

pub async fn list(
    State(state): State<AppState>,
    CurrentPrincipal(_): CurrentPrincipal,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> ApiResult<Response> {
    let (roles, total) = state.roles().list(&params).await?;
    Ok(ok(PaginatedResponse::new(roles, &params, total)))
}

pub async fn get(
    State(state): State<AppState>,
    CurrentPrincipal(_): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = RoleId::parse(&id)?;
    let role = state
        .roles()
        .find(id)
        .await?
        .ok_or_else(|| not_found("role", &id.to_raw()))?;
    Ok(ok(role))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<ValidatedJson<CreateRoleRequest>, ApiError>,
) -> ApiResult<Response> {
    require_admin(&principal)?;
    let ValidatedJson(req) = body?;

    let role = state.roles().create(&req.name, &req.description).await?;
    info!(role_id = %role.id, name = %role.name, "Role created");
    Ok(created(&role, format!("/api/v1/roles/{}", role.id.to_raw())))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    body: Result<ValidatedJson<UpdateRoleRequest>, ApiError>,
) -> ApiResult<Response> {
    let id = RoleId::parse(&id)?;
    if state.roles().find(id).await?.is_none() {
        return Err(not_found("role", &id.to_raw()));
    }
    require_admin(&principal)?;
    let ValidatedJson(req) = body?;

    let role = state
        .roles()
        .update(id, &req)
        .await?
        .ok_or_else(|| not_found("role", &id.to_raw()))?;
    Ok(ok(role))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = RoleId::parse(&id)?;
    if state.roles().find(id).await?.is_none() {
        return Err(not_found("role", &id.to_raw()));
    }
    require_admin(&principal)?;

    if !state.roles().delete(id).await? {
        return Err(not_found("role", &id.to_raw()));
    }
    info!(role_id = %id, "Role deleted");
    Ok(no_content())
}
