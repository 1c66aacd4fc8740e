//! Repository layer for data access operations.
//!
//! Services talk to storage only through the `CarStore` trait; the diesel
//! backed `CarRepository` is the production implementation.

mod car_repo;
mod car_store;
#[cfg(test)]
mod memory_store;

pub use car_repo::CarRepository;
pub use car_store::CarStore;
#[cfg(test)]
pub use memory_store::MemoryCarStore;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps the reference count of the shared store.
#[derive(Clone)]
pub struct Repositories {
    pub cars: Arc<dyn CarStore>,
}

impl Repositories {
    /// Creates the database-backed repositories.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self::from_store(Arc::new(CarRepository::new(pool)))
    }

    /// Wraps an existing store.
    pub fn from_store(cars: Arc<dyn CarStore>) -> Self {
        Self { cars }
    }
}
