//! Request data transfer objects.

mod extract;

pub use extract::{ValidatedJson, ValidatedQuery};

use crate::error::ApiError;
use crate::models::PropertyType;
use chrono::NaiveDate;
use std::collections::HashMap;
use leasehold_common_core::UserId;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Money columns hold at most 10 digits, 2 of them after the point.
fn is_money(value: &Decimal) -> bool {
    !value.is_sign_negative()
        && value.scale() <= 2
        && *value < Decimal::new(100_000_000, 0)
}

fn money_error(field: &'static str) -> ValidationError {
    let mut error = ValidationError::new("money");
    error.message = Some(
        format!("{field} must be non-negative with at most 8 integer and 2 decimal digits").into(),
    );
    error
}

fn check_money(field: &'static str, value: Option<&Decimal>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !is_money(v) => Err(money_error(field)),
        _ => Ok(()),
    }
}

/// Role creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Role update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Property creation request. Owner and audit fields come from the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    pub property_type: PropertyType,
}

/// Partial property update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    pub property_type: Option<PropertyType>,
}

/// Unit creation request. The property comes from the path.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_create_unit"))]
pub struct CreateUnitRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub floor: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_occupied: bool,
    #[serde(default)]
    pub amenities: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub parking_space: bool,
    #[serde(default)]
    pub parking_slots: u32,
    #[serde(default)]
    pub is_public: bool,
    pub price: Option<Decimal>,
    pub service_charge: Option<Decimal>,
    pub security_deposit: Option<Decimal>,
}

fn validate_create_unit(req: &CreateUnitRequest) -> Result<(), ValidationError> {
    check_money("price", req.price.as_ref())?;
    check_money("service_charge", req.service_charge.as_ref())?;
    check_money("security_deposit", req.security_deposit.as_ref())
}

/// Partial unit update.
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_unit"))]
pub struct UpdateUnitRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub floor: Option<String>,
    pub description: Option<String>,
    pub is_occupied: Option<bool>,
    pub amenities: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking_space: Option<bool>,
    pub parking_slots: Option<u32>,
    pub is_public: Option<bool>,
    pub price: Option<Decimal>,
    pub service_charge: Option<Decimal>,
    pub security_deposit: Option<Decimal>,
}

fn validate_update_unit(req: &UpdateUnitRequest) -> Result<(), ValidationError> {
    check_money("price", req.price.as_ref())?;
    check_money("service_charge", req.service_charge.as_ref())?;
    check_money("security_deposit", req.security_deposit.as_ref())
}

/// Lease creation request. The unit comes from the path.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_create_lease"))]
pub struct CreateLeaseRequest {
    pub tenant_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rent_amount: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn validate_create_lease(req: &CreateLeaseRequest) -> Result<(), ValidationError> {
    check_money("rent_amount", Some(&req.rent_amount))?;
    check_dates(req.start_date, req.end_date)
}

/// Check a lease's effective dates after a partial update has been merged
/// with the stored row.
pub(crate) fn check_lease_dates(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ApiError> {
    check_dates(start, end).map_err(|error| {
        let message = error
            .message
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| error.code.to_string());
        ApiError::ValidationError(HashMap::from([("end_date".to_string(), vec![message])]))
    })
}

fn check_dates(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => {
            let mut error = ValidationError::new("date_order");
            error.message = Some("end_date must not precede start_date".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

/// Partial lease update. The unit and tenant are fixed.
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_lease"))]
pub struct UpdateLeaseRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rent_amount: Option<Decimal>,
    pub is_active: Option<bool>,
}

fn validate_update_lease(req: &UpdateLeaseRequest) -> Result<(), ValidationError> {
    check_money("rent_amount", req.rent_amount.as_ref())?;
    match req.start_date {
        Some(start) => check_dates(start, req.end_date),
        None => Ok(()),
    }
}

/// Image registration request. `image` is a path or URL to stored bytes.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateImageRequest {
    #[validate(length(min = 1, max = 100))]
    pub image: String,
}
