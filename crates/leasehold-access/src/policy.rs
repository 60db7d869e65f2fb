//! Authorization rules.

use crate::error::AccessError;
use crate::ownership::{resolve_root_owner, OwnershipGraph};
use crate::principal::Principal;
use crate::resource::{Action, Target};
use leasehold_common_core::UserId;
use serde::Serialize;
use std::fmt;

/// Outcome of evaluating a request against the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allowed without restriction.
    Allow,
    /// Allowed, but only over the candidates the filter admits.
    AllowFiltered(ListFilter),
    /// Denied.
    Deny(DenyReason),
}

impl Decision {
    /// Whether the request may proceed.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Deny(_))
    }

    /// Filter to apply to the candidate set, if any.
    pub fn filter(&self) -> Option<&ListFilter> {
        match self {
            Self::AllowFiltered(filter) => Some(filter),
            _ => None,
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No principal and the target is not public.
    Anonymous,
    /// Creating a property without the landlord role.
    NotLandlord,
    /// Creating a child without being the landlord who owns the parent.
    NotOwningLandlord,
    /// Acting on a resource owned by someone else.
    NotOwner,
    /// The action does not apply to the target.
    Unsupported,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Anonymous => "authentication required",
            Self::NotLandlord => "only landlords can add properties",
            Self::NotOwningLandlord => "only the landlord who owns this property can add to it",
            Self::NotOwner => "permission denied",
            Self::Unsupported => "action is not permitted on this target",
        };
        f.write_str(message)
    }
}

/// Restriction applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    /// Only records whose root owner is the given user.
    OwnedBy(UserId),
    /// Only units that are public and not occupied.
    PublicVacant,
}

/// Visibility flags of a unit, as seen by the public listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitVisibility {
    pub is_occupied: bool,
    pub is_public: bool,
}

impl ListFilter {
    /// Whether a record owned by `owner` passes an ownership filter.
    ///
    /// Always false for filters that do not constrain ownership.
    pub fn admits_owner(&self, owner: UserId) -> bool {
        match self {
            Self::OwnedBy(user) => *user == owner,
            Self::PublicVacant => false,
        }
    }

    /// Whether a unit passes a visibility filter.
    ///
    /// Always false for filters that do not constrain visibility.
    pub fn admits_unit(&self, unit: UnitVisibility) -> bool {
        match self {
            Self::PublicVacant => unit.is_public && !unit.is_occupied,
            Self::OwnedBy(_) => false,
        }
    }
}

/// Evaluate a request. Errors only when the target does not resolve.
pub fn evaluate<G>(
    principal: Option<&Principal>,
    action: Action,
    target: &Target,
    graph: &G,
) -> Result<Decision, AccessError>
where
    G: OwnershipGraph + ?Sized,
{
    let root_owner = target
        .anchor()
        .map(|anchor| resolve_root_owner(graph, anchor))
        .transpose()?;

    // The public listing carries its filter for every caller, admins included.
    if action == Action::List && *target == Target::PublicUnits {
        return Ok(Decision::AllowFiltered(ListFilter::PublicVacant));
    }

    let Some(principal) = principal else {
        return Ok(Decision::Deny(DenyReason::Anonymous));
    };

    if principal.is_admin() {
        return Ok(Decision::Allow);
    }

    let owns_root = root_owner == Some(principal.id());

    let decision = match (action, target) {
        (Action::Create, Target::NewProperty) => {
            if principal.is_landlord() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotLandlord)
            }
        }
        (Action::Create, Target::NewChild { kind, parent })
            if kind.parent_kind() == Some(parent.kind()) =>
        {
            if principal.is_landlord() && owns_root {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotOwningLandlord)
            }
        }
        (Action::Read | Action::Update | Action::Delete, Target::Resource(_)) => {
            if owns_root {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotOwner)
            }
        }
        (Action::List, Target::Properties) => {
            Decision::AllowFiltered(ListFilter::OwnedBy(principal.id()))
        }
        _ => Decision::Deny(DenyReason::Unsupported),
    };

    Ok(decision)
}

/// Evaluate and turn a denial into [`AccessError::Forbidden`].
///
/// On success returns the filter to apply to the candidate set, if any.
pub fn authorize<G>(
    principal: Option<&Principal>,
    action: Action,
    target: &Target,
    graph: &G,
) -> Result<Option<ListFilter>, AccessError>
where
    G: OwnershipGraph + ?Sized,
{
    match evaluate(principal, action, target, graph)? {
        Decision::Allow => Ok(None),
        Decision::AllowFiltered(filter) => Ok(Some(filter)),
        Decision::Deny(reason) => Err(AccessError::Forbidden(reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::OwnershipArena;
    use crate::principal::{ADMIN_ROLE, LANDLORD_ROLE, TENANT_ROLE};
    use crate::resource::{ResourceKind, ResourceRef};
    use leasehold_common_core::{ImageId, LeaseId, PropertyId, UnitId};

    struct World {
        arena: OwnershipArena,
        alice: Principal,
        bob: Principal,
        p1: PropertyId,
        p2: PropertyId,
        unit: UnitId,
        lease: LeaseId,
        image: ImageId,
    }

    /// Alice owns P1 (with a unit, a lease and an image); Bob owns P2.
    fn world() -> World {
        let alice = Principal::new(UserId::new()).with_role(LANDLORD_ROLE);
        let bob = Principal::new(UserId::new()).with_role(LANDLORD_ROLE);
        let p1 = PropertyId::new();
        let p2 = PropertyId::new();
        let unit = UnitId::new();
        let lease = LeaseId::new();
        let image = ImageId::new();

        let mut arena = OwnershipArena::new();
        arena
            .insert_property(p1, alice.id())
            .insert_property(p2, bob.id())
            .insert_unit(unit, p1)
            .insert_lease(lease, unit)
            .insert_image(image, p1);

        World {
            arena,
            alice,
            bob,
            p1,
            p2,
            unit,
            lease,
            image,
        }
    }

    #[test]
    fn test_landlord_creates_unit_only_under_own_property() {
        let w = world();
        let own = authorize(Some(&w.alice), Action::Create, &Target::new_unit(w.p1), &w.arena);
        assert_eq!(own, Ok(None));

        let foreign = authorize(Some(&w.alice), Action::Create, &Target::new_unit(w.p2), &w.arena);
        assert_eq!(foreign, Err(AccessError::Forbidden(DenyReason::NotOwningLandlord)));
    }

    #[test]
    fn test_missing_parent_is_not_found_not_forbidden() {
        let w = world();
        let ghost = PropertyId::new();
        let result = authorize(Some(&w.alice), Action::Create, &Target::new_unit(ghost), &w.arena);
        assert_eq!(result, Err(AccessError::NotFound(ResourceRef::Property(ghost))));
    }

    #[test]
    fn test_only_landlords_create_properties() {
        let w = world();
        let tenant = Principal::new(UserId::new()).with_role(TENANT_ROLE);

        assert_eq!(
            evaluate(Some(&w.bob), Action::Create, &Target::NewProperty, &w.arena),
            Ok(Decision::Allow)
        );
        assert_eq!(
            evaluate(Some(&tenant), Action::Create, &Target::NewProperty, &w.arena),
            Ok(Decision::Deny(DenyReason::NotLandlord))
        );
    }

    #[test]
    fn test_owner_without_landlord_role_can_manage_but_not_extend() {
        let mut w = world();
        let former = Principal::new(UserId::new()).with_role(TENANT_ROLE);
        let property = PropertyId::new();
        w.arena.insert_property(property, former.id());

        let target = Target::Resource(ResourceRef::Property(property));
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert_eq!(evaluate(Some(&former), action, &target, &w.arena), Ok(Decision::Allow));
        }
        assert_eq!(
            evaluate(Some(&former), Action::Create, &Target::new_unit(property), &w.arena),
            Ok(Decision::Deny(DenyReason::NotOwningLandlord))
        );
    }

    #[test]
    fn test_ownership_follows_the_chain() {
        let w = world();
        for resource in [
            ResourceRef::Unit(w.unit),
            ResourceRef::Lease(w.lease),
            ResourceRef::Image(w.image),
        ] {
            let target = Target::Resource(resource);
            assert!(evaluate(Some(&w.alice), Action::Update, &target, &w.arena)
                .unwrap()
                .is_allowed());
            assert_eq!(
                evaluate(Some(&w.bob), Action::Delete, &target, &w.arena),
                Ok(Decision::Deny(DenyReason::NotOwner))
            );
        }
    }

    #[test]
    fn test_lease_creation_targets_a_unit() {
        let w = world();
        assert_eq!(
            authorize(Some(&w.alice), Action::Create, &Target::new_lease(w.unit), &w.arena),
            Ok(None)
        );
        assert_eq!(
            authorize(Some(&w.bob), Action::Create, &Target::new_lease(w.unit), &w.arena),
            Err(AccessError::Forbidden(DenyReason::NotOwningLandlord))
        );
    }

    #[test]
    fn test_mismatched_child_kind_is_unsupported() {
        let w = world();
        let target = Target::NewChild {
            kind: ResourceKind::Lease,
            parent: ResourceRef::Property(w.p1),
        };
        assert_eq!(
            evaluate(Some(&w.alice), Action::Create, &target, &w.arena),
            Ok(Decision::Deny(DenyReason::Unsupported))
        );
    }

    #[test]
    fn test_admin_role_and_staff_flag_bypass_ownership() {
        let w = world();
        let admin = Principal::new(UserId::new()).with_role(ADMIN_ROLE);
        let staff = Principal::new(UserId::new()).with_staff(true);
        let target = Target::Resource(ResourceRef::Lease(w.lease));

        for principal in [&admin, &staff] {
            assert_eq!(evaluate(Some(principal), Action::Delete, &target, &w.arena), Ok(Decision::Allow));
            assert_eq!(
                evaluate(Some(principal), Action::Create, &Target::new_unit(w.p2), &w.arena),
                Ok(Decision::Allow)
            );
            assert_eq!(
                evaluate(Some(principal), Action::List, &Target::Properties, &w.arena),
                Ok(Decision::Allow)
            );
        }
    }

    #[test]
    fn test_property_listing_is_scoped_to_owner() {
        let w = world();
        let decision = evaluate(Some(&w.bob), Action::List, &Target::Properties, &w.arena).unwrap();
        let filter = decision.filter().copied().unwrap();
        assert!(filter.admits_owner(w.bob.id()));
        assert!(!filter.admits_owner(w.alice.id()));
    }

    #[test]
    fn test_public_units_open_to_anonymous_with_filter() {
        let w = world();
        assert_eq!(
            authorize(None, Action::List, &Target::PublicUnits, &w.arena),
            Ok(Some(ListFilter::PublicVacant))
        );
    }

    #[test]
    fn test_anonymous_denied_everything_else() {
        let w = world();
        let target = Target::Resource(ResourceRef::Unit(w.unit));
        assert_eq!(
            evaluate(None, Action::Read, &target, &w.arena),
            Ok(Decision::Deny(DenyReason::Anonymous))
        );
        assert_eq!(
            evaluate(None, Action::List, &Target::Properties, &w.arena),
            Ok(Decision::Deny(DenyReason::Anonymous))
        );
    }

    #[test]
    fn test_public_vacant_filter() {
        let filter = ListFilter::PublicVacant;
        let unit = |is_public, is_occupied| UnitVisibility { is_public, is_occupied };
        assert!(filter.admits_unit(unit(true, false)));
        assert!(!filter.admits_unit(unit(true, true)));
        assert!(!filter.admits_unit(unit(false, false)));
        assert!(!filter.admits_unit(unit(false, true)));
    }
}
