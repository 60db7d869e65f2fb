use super::audit::log_authz;
use crate::error::{ApiError, ApiResult};
use crate::repository::load_ownership_chain;
use leasehold_access::{authorize, AccessError, Action, ListFilter, OwnershipArena, Principal, Target};
use sqlx::SqlitePool;

/// Authorize `action` on `target` for `principal`.
///
/// Missing records surface as 404 before any rule is consulted; a denial
/// surfaces as 403. On success returns the listing filter, if any.
pub async fn guard(
    pool: &SqlitePool,
    principal: Option<&Principal>,
    action: Action,
    target: Target,
) -> ApiResult<Option<ListFilter>> {
    let graph = match target.anchor() {
        Some(anchor) => load_ownership_chain(pool, anchor).await?,
        None => OwnershipArena::new(),
    };

    match authorize(principal, action, &target, &graph) {
        Ok(filter) => {
            log_authz(principal, action, &target, None);
            Ok(filter)
        }
        Err(AccessError::Forbidden(reason)) => {
            log_authz(principal, action, &target, Some(reason));
            Err(ApiError::ResourceAccessDenied(reason))
        }
        Err(err) => Err(err.into()),
    }
}

/// Role administration is reserved for staff and the admin role.
pub fn require_admin(principal: &Principal) -> ApiResult<()> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
