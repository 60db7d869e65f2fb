//! Ownership chains and root-owner resolution.
//!
//! Parent references only ever point one step towards the root property:
//! units and images sit directly under a property, leases sit under a unit.
//! Resolution is therefore bounded at two hops and cannot cycle.

use crate::error::AccessError;
use crate::resource::ResourceRef;
use leasehold_common_core::{ImageId, LeaseId, PropertyId, UnitId, UserId};
use std::collections::HashMap;

/// Read-only view of the parent references between resource records.
pub trait OwnershipGraph {
    /// Owner of a property.
    fn property_owner(&self, id: PropertyId) -> Option<UserId>;
    /// Property a unit belongs to.
    fn unit_property(&self, id: UnitId) -> Option<PropertyId>;
    /// Property an image belongs to.
    fn image_property(&self, id: ImageId) -> Option<PropertyId>;
    /// Unit a lease is held on.
    fn lease_unit(&self, id: LeaseId) -> Option<UnitId>;
}

/// In-memory arena of ownership records addressed by id.
#[derive(Debug, Clone, Default)]
pub struct OwnershipArena {
    properties: HashMap<PropertyId, UserId>,
    units: HashMap<UnitId, PropertyId>,
    images: HashMap<ImageId, PropertyId>,
    leases: HashMap<LeaseId, UnitId>,
}

impl OwnershipArena {
    /// Empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a property and its owner.
    pub fn insert_property(&mut self, id: PropertyId, owner: UserId) -> &mut Self {
        self.properties.insert(id, owner);
        self
    }

    /// Record a unit under its property.
    pub fn insert_unit(&mut self, id: UnitId, property: PropertyId) -> &mut Self {
        self.units.insert(id, property);
        self
    }

    /// Record an image under its property.
    pub fn insert_image(&mut self, id: ImageId, property: PropertyId) -> &mut Self {
        self.images.insert(id, property);
        self
    }

    /// Record a lease on its unit.
    pub fn insert_lease(&mut self, id: LeaseId, unit: UnitId) -> &mut Self {
        self.leases.insert(id, unit);
        self
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.properties.len() + self.units.len() + self.images.len() + self.leases.len()
    }

    /// No records held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OwnershipGraph for OwnershipArena {
    fn property_owner(&self, id: PropertyId) -> Option<UserId> {
        self.properties.get(&id).copied()
    }

    fn unit_property(&self, id: UnitId) -> Option<PropertyId> {
        self.units.get(&id).copied()
    }

    fn image_property(&self, id: ImageId) -> Option<PropertyId> {
        self.images.get(&id).copied()
    }

    fn lease_unit(&self, id: LeaseId) -> Option<UnitId> {
        self.leases.get(&id).copied()
    }
}

/// Walk parent references up to the root property.
pub fn root_property<G>(graph: &G, resource: ResourceRef) -> Result<PropertyId, AccessError>
where
    G: OwnershipGraph + ?Sized,
{
    let missing = || AccessError::NotFound(resource);
    match resource {
        ResourceRef::Property(id) => Ok(id),
        ResourceRef::Unit(id) => graph.unit_property(id).ok_or_else(missing),
        ResourceRef::Image(id) => graph.image_property(id).ok_or_else(missing),
        ResourceRef::Lease(id) => {
            let unit = graph.lease_unit(id).ok_or_else(missing)?;
            root_property(graph, ResourceRef::Unit(unit))
        }
    }
}

/// Owner of the property at the top of `resource`'s chain.
pub fn resolve_root_owner<G>(graph: &G, resource: ResourceRef) -> Result<UserId, AccessError>
where
    G: OwnershipGraph + ?Sized,
{
    let property = root_property(graph, resource)?;
    graph
        .property_owner(property)
        .ok_or(AccessError::NotFound(ResourceRef::Property(property)))
}
