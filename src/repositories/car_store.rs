//! Storage abstraction for car records.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Car, CarStatus, NewCar};

/// Persistence operations the garage service needs.
///
/// Mutations are single statements so that concurrent requests cannot
/// interleave between a check and the write it guards.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// All cars ordered by id.
    async fn list_all(&self) -> AppResult<Vec<Car>>;

    async fn exists_by_registration(&self, registration_number: &str) -> AppResult<bool>;

    async fn exists_by_id(&self, car_id: i32) -> AppResult<bool>;

    /// Inserts a car; the store assigns the id.
    ///
    /// A registration number that is already present is reported as
    /// `AppError::Duplicate`.
    async fn create(&self, new_car: NewCar) -> AppResult<Car>;

    /// Sets the status of a car, returning `None` when no row has `car_id`.
    async fn update_status(&self, car_id: i32, status: CarStatus) -> AppResult<Option<Car>>;

    /// Number of rows removed (0 or 1).
    async fn delete_by_id(&self, car_id: i32) -> AppResult<usize>;

    /// Number of rows removed (0 or 1).
    async fn delete_by_registration(&self, registration_number: &str) -> AppResult<usize>;

    /// Round-trip to the backing store for health checks.
    async fn ping(&self) -> AppResult<()>;
}
