//! API v1 routes.

use crate::handlers::{auth, images, leases, properties, roles, units};
use crate::middleware::AuthLayer;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Create the v1 API router.
pub fn router(state: &AppState) -> Router<AppState> {
    let auth = &state.config.auth;
    let required = AuthLayer::new(auth.jwt_secret.clone()).with_leeway(auth.leeway_secs);
    let optional = required.clone().optional();

    Router::new()
        .merge(public_routes().route_layer(optional))
        .merge(authenticated_routes().route_layer(required))
}

/// Routes open to anonymous callers. A token, if sent, must still be valid.
fn public_routes() -> Router<AppState> {
    Router::new().route("/units/public", get(units::list_public))
}

fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/user", get(auth::current_user))
        .merge(role_routes())
        .merge(property_routes())
        .merge(unit_routes())
        .route("/leases/:id", get(leases::get).put(leases::update).delete(leases::delete))
        .route("/images/:id", get(images::get).delete(images::delete))
}

fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles::list).post(roles::create))
        .route("/roles/:id", get(roles::get).put(roles::update).delete(roles::delete))
}

fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(properties::list).post(properties::create))
        .route(
            "/properties/:id",
            get(properties::get).put(properties::update).delete(properties::delete),
        )
        .route(
            "/properties/:id/units",
            get(units::list_for_property).post(units::create),
        )
}

fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/units/:id", get(units::get).put(units::update).delete(units::delete))
        .route("/units/:id/images", get(images::list_for_unit).post(images::create))
        .route("/units/:id/lease", get(leases::get_for_unit).post(leases::create))
}
