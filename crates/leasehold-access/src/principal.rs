//! Principal snapshots.

use leasehold_common_core::UserId;

/// Role name granting unrestricted access.
pub const ADMIN_ROLE: &str = "admin";
/// Role name allowed to create properties and their children.
pub const LANDLORD_ROLE: &str = "landlord";
/// Role name of lease holders.
pub const TENANT_ROLE: &str = "tenant";

/// Immutable view of the acting user, taken once per request.
///
/// Role membership is an exact, case-sensitive comparison on the role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    is_staff: bool,
    role: Option<String>,
}

impl Principal {
    /// Create a non-staff principal without a role.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            is_staff: false,
            role: None,
        }
    }

    /// Set the staff flag.
    pub fn with_staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    /// Set the role name.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set or clear the role name.
    pub fn with_optional_role(mut self, role: Option<String>) -> Self {
        self.role = role;
        self
    }

    /// User the snapshot was taken for.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Staff flag from the user record.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Role name, if the user has one.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Check role membership.
    pub fn has_role(&self, name: &str) -> bool {
        self.role.as_deref() == Some(name)
    }

    /// Staff flag or the `admin` role.
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.has_role(ADMIN_ROLE)
    }

    /// Holds the `landlord` role.
    pub fn is_landlord(&self) -> bool {
        self.has_role(LANDLORD_ROLE)
    }
}
