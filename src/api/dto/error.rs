//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "Car not found",
    "details": {"field": "id", "value": "42"},
    "request_id": "6f1c2a4e-3d51-4c1e-9a57-1b0f8f0b2d11"
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }

    /// `"<Entity> not found"` with the lookup key in the details.
    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new("NOT_FOUND", &format!("{} not found", entity))
            .with_details(json!({"field": field, "value": value}))
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE_ENTRY",
            &format!("{} with {} '{}' already exists", entity, field, value),
        )
        .with_details(json!({"field": field, "value": value}))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", reason).with_details(json!({"field": field}))
    }

    pub fn validation_errors(errors: &[ValidationFieldError]) -> Self {
        Self::new("VALIDATION_ERROR", "Request validation failed")
            .with_details(json!({"errors": errors}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = serde_json::to_value(ErrorResponse::new("CONFLICT", "Car already in garage"))
            .unwrap();
        assert_eq!(value, json!({"code": "CONFLICT", "message": "Car already in garage"}));
    }

    #[test]
    fn test_not_found_error() {
        let response = ErrorResponse::not_found_error("Car", "id", "42").with_request_id("req-1");
        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Car not found");
        assert_eq!(response.details, Some(json!({"field": "id", "value": "42"})));
        assert_eq!(response.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_validation_errors_lists_fields() {
        let response = ErrorResponse::validation_errors(&[ValidationFieldError {
            field: "registrationNumber".to_string(),
            message: "must not be empty".to_string(),
        }]);
        assert_eq!(
            response.details,
            Some(json!({"errors": [{"field": "registrationNumber", "message": "must not be empty"}]}))
        );
    }
}
