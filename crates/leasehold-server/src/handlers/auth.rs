//! Current-user endpoint.

use crate::error::{ApiError, ApiResult};
use crate::middleware::Auth;
use crate::response::ok;
use crate::state::AppState;
use axum::{extract::State, response::Response};

/// `GET /auth/user`: the caller's user record, role included.
pub async fn current_user(State(state): State<AppState>, Auth(user): Auth) -> ApiResult<Response> {
    let record = state.users().find(user.id).await?.ok_or(ApiError::Unauthorized)?;
    Ok(ok(record))
}
