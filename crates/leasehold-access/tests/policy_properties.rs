//! Property tests for the authorization rules.

use leasehold_access::{
    evaluate, Action, Decision, ListFilter, OwnershipArena, Principal, ResourceRef, Target,
    UnitVisibility, ADMIN_ROLE, LANDLORD_ROLE, TENANT_ROLE,
};
use leasehold_common_core::{ImageId, LeaseId, PropertyId, UnitId, UserId};
use proptest::prelude::*;
use uuid::Uuid;

fn user_id() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

fn role() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(LANDLORD_ROLE.to_string())),
        Just(Some(TENANT_ROLE.to_string())),
        Just(Some("Landlord".to_string())),
        "[a-z]{1,10}".prop_map(Some),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

/// A single property owned by `owner`, with one unit, lease and image.
struct Estate {
    arena: OwnershipArena,
    targets: Vec<Target>,
}

fn estate(owner: UserId) -> Estate {
    let property = PropertyId::new();
    let unit = UnitId::new();
    let lease = LeaseId::new();
    let image = ImageId::new();

    let mut arena = OwnershipArena::new();
    arena
        .insert_property(property, owner)
        .insert_unit(unit, property)
        .insert_lease(lease, unit)
        .insert_image(image, property);

    let targets = vec![
        Target::Resource(ResourceRef::Property(property)),
        Target::Resource(ResourceRef::Unit(unit)),
        Target::Resource(ResourceRef::Lease(lease)),
        Target::Resource(ResourceRef::Image(image)),
        Target::NewProperty,
        Target::new_unit(property),
        Target::new_image(property),
        Target::new_lease(unit),
        Target::Properties,
        Target::PublicUnits,
    ];

    Estate { arena, targets }
}

proptest! {
    #[test]
    fn staff_is_allowed_everything(
        id in user_id(),
        owner in user_id(),
        role in role(),
        action in action(),
    ) {
        let staff = Principal::new(id).with_staff(true).with_optional_role(role);
        let estate = estate(owner);
        for target in &estate.targets {
            let decision = evaluate(Some(&staff), action, target, &estate.arena).unwrap();
            prop_assert!(decision.is_allowed(), "{action} on {target} denied");
        }
    }

    #[test]
    fn non_owners_cannot_update_or_delete(
        id in user_id(),
        owner in user_id(),
        role in role(),
    ) {
        prop_assume!(id != owner);
        prop_assume!(role.as_deref() != Some(ADMIN_ROLE));

        let principal = Principal::new(id).with_optional_role(role);
        let estate = estate(owner);
        for target in estate.targets.iter().filter(|t| matches!(t, Target::Resource(_))) {
            for action in [Action::Update, Action::Delete] {
                let decision = evaluate(Some(&principal), action, target, &estate.arena).unwrap();
                prop_assert!(matches!(decision, Decision::Deny(_)));
            }
        }
    }

    #[test]
    fn public_filter_admits_exactly_vacant_public_units(
        is_public in any::<bool>(),
        is_occupied in any::<bool>(),
    ) {
        let admitted = ListFilter::PublicVacant.admits_unit(UnitVisibility { is_public, is_occupied });
        prop_assert_eq!(admitted, is_public && !is_occupied);
    }

    #[test]
    fn unknown_ids_never_reach_the_rules(
        id in user_id(),
        staff in any::<bool>(),
        action in action(),
    ) {
        let principal = Principal::new(id).with_staff(staff);
        let empty = OwnershipArena::new();
        let target = Target::Resource(ResourceRef::Unit(UnitId::new()));
        prop_assert!(evaluate(Some(&principal), action, &target, &empty).is_err());
    }
}
