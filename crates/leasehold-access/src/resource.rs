//! Actions, resource references and access targets.

use leasehold_common_core::{ImageId, LeaseId, PropertyId, UnitId};
use serde::Serialize;
use std::fmt;

/// Actions that can be requested on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::List,
    ];

    /// Lowercase name used in audit events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource types subject to access control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Property,
    Unit,
    Lease,
    #[serde(rename = "property_image")]
    Image,
}

impl ResourceKind {
    /// Lowercase name used in error details.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Unit => "unit",
            Self::Lease => "lease",
            Self::Image => "property_image",
        }
    }

    /// Parent kind a new resource of this kind must be created under.
    pub fn parent_kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Property => None,
            Self::Unit | Self::Image => Some(Self::Property),
            Self::Lease => Some(Self::Unit),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an existing resource record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRef {
    Property(PropertyId),
    Unit(UnitId),
    Lease(LeaseId),
    Image(ImageId),
}

impl ResourceRef {
    /// Kind of the referenced record.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Property(_) => ResourceKind::Property,
            Self::Unit(_) => ResourceKind::Unit,
            Self::Lease(_) => ResourceKind::Lease,
            Self::Image(_) => ResourceKind::Image,
        }
    }

    /// Unprefixed id, as exposed over the API.
    pub fn raw_id(&self) -> String {
        match self {
            Self::Property(id) => id.to_raw(),
            Self::Unit(id) => id.to_raw(),
            Self::Lease(id) => id.to_raw(),
            Self::Image(id) => id.to_raw(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(id) => write!(f, "property {id}"),
            Self::Unit(id) => write!(f, "unit {id}"),
            Self::Lease(id) => write!(f, "lease {id}"),
            Self::Image(id) => write!(f, "property_image {id}"),
        }
    }
}

impl From<PropertyId> for ResourceRef {
    fn from(id: PropertyId) -> Self {
        Self::Property(id)
    }
}

impl From<UnitId> for ResourceRef {
    fn from(id: UnitId) -> Self {
        Self::Unit(id)
    }
}

impl From<LeaseId> for ResourceRef {
    fn from(id: LeaseId) -> Self {
        Self::Lease(id)
    }
}

impl From<ImageId> for ResourceRef {
    fn from(id: ImageId) -> Self {
        Self::Image(id)
    }
}

/// What an action is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// An existing record.
    Resource(ResourceRef),
    /// A property that does not exist yet.
    NewProperty,
    /// A child record that does not exist yet, under an existing parent.
    NewChild {
        kind: ResourceKind,
        parent: ResourceRef,
    },
    /// The caller's property listing.
    Properties,
    /// The public listing of vacant units.
    PublicUnits,
}

impl Target {
    /// A new unit under `property`.
    pub fn new_unit(property: PropertyId) -> Self {
        Self::NewChild {
            kind: ResourceKind::Unit,
            parent: ResourceRef::Property(property),
        }
    }

    /// A new image under `property`.
    pub fn new_image(property: PropertyId) -> Self {
        Self::NewChild {
            kind: ResourceKind::Image,
            parent: ResourceRef::Property(property),
        }
    }

    /// A new lease on `unit`.
    pub fn new_lease(unit: UnitId) -> Self {
        Self::NewChild {
            kind: ResourceKind::Lease,
            parent: ResourceRef::Unit(unit),
        }
    }

    /// The record whose existence must be established before deciding.
    pub fn anchor(&self) -> Option<ResourceRef> {
        match self {
            Self::Resource(resource) => Some(*resource),
            Self::NewChild { parent, .. } => Some(*parent),
            Self::NewProperty | Self::Properties | Self::PublicUnits => None,
        }
    }
}

impl From<ResourceRef> for Target {
    fn from(resource: ResourceRef) -> Self {
        Self::Resource(resource)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(resource) => write!(f, "{resource}"),
            Self::NewProperty => f.write_str("new property"),
            Self::NewChild { kind, parent } => write!(f, "new {kind} under {parent}"),
            Self::Properties => f.write_str("property listing"),
            Self::PublicUnits => f.write_str("public unit listing"),
        }
    }
}
