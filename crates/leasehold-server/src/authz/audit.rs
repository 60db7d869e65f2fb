//! Authorization audit logging.

use chrono::{DateTime, Utc};
use leasehold_access::{Action, DenyReason, Principal, Target};
use leasehold_common_core::UserId;
use serde::Serialize;
use tracing::info;

/// Authorization audit event.
#[derive(Debug, Serialize)]
pub struct AuthzAuditEvent {
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<UserId>,
    pub action: Action,
    pub target: String,
    pub granted: bool,
    pub reason: Option<DenyReason>,
}

impl AuthzAuditEvent {
    pub fn new(
        principal: Option<&Principal>,
        action: Action,
        target: &Target,
        reason: Option<DenyReason>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id: principal.map(Principal::id),
            action,
            target: target.to_string(),
            granted: reason.is_none(),
            reason,
        }
    }

    pub fn log(&self) {
        let user_id = self.user_id.map(|id| id.to_string());
        if self.granted {
            info!(
                event = "authz_granted",
                user_id = user_id.as_deref().unwrap_or("anonymous"),
                action = %self.action,
                target = %self.target,
                "Authorization granted"
            );
        } else {
            info!(
                event = "authz_denied",
                user_id = user_id.as_deref().unwrap_or("anonymous"),
                action = %self.action,
                target = %self.target,
                reason = ?self.reason,
                "Authorization denied"
            );
        }
    }
}

/// Log authorization decision.
pub fn log_authz(
    principal: Option<&Principal>,
    action: Action,
    target: &Target,
    reason: Option<DenyReason>,
) {
    AuthzAuditEvent::new(principal, action, target, reason).log();
}
