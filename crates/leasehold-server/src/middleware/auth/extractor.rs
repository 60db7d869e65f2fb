//! Authentication extractors for handlers.

use super::types::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use leasehold_access::Principal;
use tracing::warn;

/// Extractor for the token-authenticated caller (required).
pub struct Auth(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(Auth)
            .ok_or(ApiError::Unauthorized)
    }
}

/// The caller's principal snapshot, loaded from the users table.
///
/// A token whose subject no longer exists is treated as unauthenticated.
pub struct CurrentPrincipal(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;
        load_principal(state, &user).await.map(CurrentPrincipal)
    }
}

/// Principal snapshot when the request carries a token, `None` otherwise.
pub struct MaybePrincipal(pub Option<Principal>);

#[async_trait]
impl FromRequestParts<AppState> for MaybePrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthUser>().cloned() {
            Some(user) => load_principal(state, &user).await.map(|p| MaybePrincipal(Some(p))),
            None => Ok(MaybePrincipal(None)),
        }
    }
}

async fn load_principal(state: &AppState, user: &AuthUser) -> Result<Principal, ApiError> {
    match state.users().find(user.id).await? {
        Some(record) => Ok(record.principal()),
        None => {
            warn!(user_id = %user.id, "Token subject has no user record");
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::types::Claims;
    use axum::http::Request;
    use leasehold_common_core::UserId;

    #[tokio::test]
    async fn test_auth_extractor_success() {
        let auth_user = AuthUser::from_claims(Claims::new_access(UserId::new(), "alice", 3600)).unwrap();

        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(auth_user.clone());

        let Auth(extracted) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted.id, auth_user.id);
    }

    #[tokio::test]
    async fn test_auth_extractor_missing() {
        let (mut parts, _) = Request::new(()).into_parts();

        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
