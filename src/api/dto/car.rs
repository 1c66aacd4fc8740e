//! Car-related DTOs for API requests and responses.

use std::num::IntErrorKind;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Car, CarStatus};

pub const STATUS_UPDATED: &str = "Status updated successfully";
pub const CAR_DELETED: &str = "Car deleted successfully";

// ============================================================================
// Request DTOs
// ============================================================================

/// Parameters for adding a car to the garage.
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AddCarRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "registrationNumber must be between 1 and 255 characters"
    ))]
    #[schema(min_length = 1, max_length = 255, example = "MP08AB1234")]
    pub registration_number: String,
    /// ENTRY, IN_SERVICE or COMPLETED
    #[schema(example = "ENTRY")]
    pub status: String,
}

/// Parameters for changing the status of a car.
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct UpdateStatusRequest {
    /// Car id; echoed back exactly as sent
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "id is required"))]
    #[schema(example = "1")]
    pub id: String,
    /// IN_SERVICE or COMPLETED
    #[schema(example = "IN_SERVICE")]
    pub status: String,
}

/// Parameters for deleting a car by id.
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct DeleteByIdRequest {
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "id is required"))]
    #[schema(example = "1")]
    pub id: String,
}

/// Parameters for deleting a car by registration number.
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeleteByRegistrationRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "registrationNumber must be between 1 and 255 characters"
    ))]
    #[schema(example = "MP08AB1234")]
    pub registration_number: String,
}

/// Parses the `id` parameter into a car id.
///
/// An integer too large for any stored id is a missing car, not a bad request.
pub fn parse_car_id(raw: &str) -> AppResult<i32> {
    let trimmed = raw.trim();
    trimmed.parse::<i32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            AppError::not_found("Car", "id", trimmed)
        }
        _ => AppError::Validation {
            field: "id".to_string(),
            reason: format!("id must be an integer, got '{}'", raw),
        },
    })
}

/// Accepts `"id": 1` as well as `"id": "1"` in JSON bodies.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

// ============================================================================
// Response DTOs
// ============================================================================

/// A car as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"id": 1, "registrationNumber": "MP08AB1234", "status": "ENTRY"}))]
pub struct CarResponse {
    pub id: i32,
    pub registration_number: String,
    pub status: CarStatus,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            registration_number: car.registration_number,
            status: car.status,
        }
    }
}

/// Response body for a status change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"id": "1", "message": "Status updated successfully", "status": "IN_SERVICE"}))]
pub struct StatusUpdatedResponse {
    pub id: String,
    pub message: String,
    pub status: CarStatus,
}

/// Response body for a delete by id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"message": "Car deleted successfully", "id": "1"}))]
pub struct DeletedByIdResponse {
    pub message: String,
    pub id: String,
}

/// Response body for a delete by registration number.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"message": "Car deleted successfully", "registration": "MP08AB1234"}))]
pub struct DeletedByRegistrationResponse {
    pub message: String,
    pub registration: String,
}
