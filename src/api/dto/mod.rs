//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `car` - Car request parameters and response bodies
//! - `error` - Common error response DTOs
//! - `health` - Health check reports

mod car;
mod error;
mod health;

pub use car::{
    AddCarRequest, CAR_DELETED, CarResponse, DeleteByIdRequest, DeleteByRegistrationRequest,
    DeletedByIdResponse, DeletedByRegistrationResponse, STATUS_UPDATED, StatusUpdatedResponse,
    UpdateStatusRequest, parse_car_id,
};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
