//! Authentication middleware layer.

use super::{
    jwt::decode_token,
    types::{AuthUser, TokenType},
};
use crate::error::ApiError;
use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

/// Authentication layer configuration.
#[derive(Clone)]
pub struct AuthLayer {
    jwt_secret: Arc<String>,
    leeway_secs: u64,
    optional: bool,
}

impl AuthLayer {
    /// Create new auth layer. Requests without a valid token are rejected.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Arc::new(jwt_secret.into()),
            leeway_secs: 0,
            optional: false,
        }
    }

    /// Tolerate clock skew when checking expiry.
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Let requests without a token through anonymously.
    ///
    /// A token that is present but invalid is still rejected.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt_secret: self.jwt_secret.clone(),
            leeway_secs: self.leeway_secs,
            optional: self.optional,
        }
    }
}

/// Authentication middleware service.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt_secret: Arc<String>,
    leeway_secs: u64,
    optional: bool,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let jwt_secret = self.jwt_secret.clone();
        let leeway_secs = self.leeway_secs;
        let optional = self.optional;
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match authenticate(&req, &jwt_secret, leeway_secs) {
                Ok(Some(auth_user)) => {
                    debug!(user_id = %auth_user.id, "Authenticated request");
                    req.extensions_mut().insert(auth_user);
                }
                Ok(None) if optional => {}
                Ok(None) => return Ok(ApiError::Unauthorized.into_response()),
                Err(err) => return Ok(err.into_response()),
            }

            inner.call(req).await
        })
    }
}

/// Validate the request's token, if it carries one.
fn authenticate(
    req: &Request<Body>,
    jwt_secret: &str,
    leeway_secs: u64,
) -> Result<Option<AuthUser>, ApiError> {
    let Some(token) = extract_token(req)? else {
        return Ok(None);
    };

    let claims = decode_token(&token, jwt_secret, leeway_secs)?;
    if claims.token_type != TokenType::Access {
        return Err(ApiError::InvalidToken);
    }

    AuthUser::from_claims(claims)
        .map(Some)
        .ok_or(ApiError::InvalidToken)
}

fn extract_token(req: &Request<Body>) -> Result<Option<String>, ApiError> {
    // Try Authorization header first
    if let Some(auth_header) = req.headers().get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| ApiError::InvalidToken)?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) => Ok(Some(token.trim().to_string())),
            None => Err(ApiError::InvalidToken),
        };
    }

    // Try cookie as fallback
    if let Some(cookie_header) = req.headers().get(header::COOKIE) {
        let cookie_str = cookie_header.to_str().map_err(|_| ApiError::InvalidToken)?;

        for cookie in cookie_str.split(';') {
            if let Some(token) = cookie.trim().strip_prefix("access_token=") {
                return Ok(Some(token.to_string()));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::{encode_token, Claims};
    use leasehold_common_core::UserId;

    const SECRET: &str = "layer_test_secret_32_characters!";

    #[test]
    fn test_extract_token_from_bearer_header() {
        let req = Request::builder()
            .header("Authorization", "Bearer test_token")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract_token(&req).unwrap().as_deref(), Some("test_token"));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let req = Request::builder()
            .header("Cookie", "theme=dark; access_token=test_token")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract_token(&req).unwrap().as_deref(), Some("test_token"));
    }

    #[test]
    fn test_extract_token_missing() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(extract_token(&req).unwrap().is_none());
    }

    #[test]
    fn test_non_bearer_scheme_is_invalid() {
        let req = Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        assert!(matches!(extract_token(&req), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_refresh_token_is_not_accepted() {
        let mut claims = Claims::new_access(UserId::new(), "alice", 3600);
        claims.token_type = TokenType::Refresh;
        let token = encode_token(&claims, SECRET).unwrap();
        let req = Request::builder()
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        assert!(matches!(authenticate(&req, SECRET, 0), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_valid_access_token_yields_user() {
        let id = UserId::new();
        let token = encode_token(&Claims::new_access(id, "alice", 3600), SECRET).unwrap();
        let req = Request::builder()
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let user = authenticate(&req, SECRET, 0).unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
    }
}
