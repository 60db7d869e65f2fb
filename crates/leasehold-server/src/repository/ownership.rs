use crate::error::ApiResult;
use crate::models::stored_id;
use leasehold_access::{OwnershipArena, ResourceRef};
use leasehold_common_core::{PropertyId, UnitId, UserId};
use sqlx::SqlitePool;

/// Load the parent references from `resource` up to its property's owner.
///
/// The walk stops at the first missing record, leaving the arena short so
/// that resolution reports exactly which link is absent.
pub async fn load_ownership_chain(
    pool: &SqlitePool,
    resource: ResourceRef,
) -> ApiResult<OwnershipArena> {
    let mut arena = OwnershipArena::new();

    let unit = match resource {
        ResourceRef::Lease(id) => {
            let Some(unit) = parent(pool, "SELECT unit_id FROM leases WHERE id = ?", id.to_raw()).await? else {
                return Ok(arena);
            };
            let unit: UnitId = stored_id("leases.unit_id", &unit)?;
            arena.insert_lease(id, unit);
            Some(unit)
        }
        ResourceRef::Unit(id) => Some(id),
        ResourceRef::Property(_) | ResourceRef::Image(_) => None,
    };

    let property = match (resource, unit) {
        (ResourceRef::Property(id), _) => id,
        (ResourceRef::Image(id), _) => {
            let sql = "SELECT property_id FROM property_images WHERE id = ?";
            let Some(property) = parent(pool, sql, id.to_raw()).await? else {
                return Ok(arena);
            };
            let property: PropertyId = stored_id("property_images.property_id", &property)?;
            arena.insert_image(id, property);
            property
        }
        (_, Some(unit)) => {
            let sql = "SELECT property_id FROM units WHERE id = ?";
            let Some(property) = parent(pool, sql, unit.to_raw()).await? else {
                return Ok(arena);
            };
            let property: PropertyId = stored_id("units.property_id", &property)?;
            arena.insert_unit(unit, property);
            property
        }
        (_, None) => return Ok(arena),
    };

    let sql = "SELECT owner_id FROM properties WHERE id = ?";
    if let Some(owner) = parent(pool, sql, property.to_raw()).await? {
        let owner: UserId = stored_id("properties.owner_id", &owner)?;
        arena.insert_property(property, owner);
    }

    Ok(arena)
}

async fn parent(pool: &SqlitePool, sql: &str, id: String) -> ApiResult<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as(sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(|(parent,)| parent))
}
