//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod car_service;

pub use car_service::CarService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
#[derive(Clone)]
pub struct Services {
    pub cars: CarService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            cars: CarService::new(repos.cars),
        }
    }
}
