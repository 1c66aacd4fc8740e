//! Car service for garage business rules.
//!
//! Decides what "already in garage", "not found" and "invalid status" mean
//! and turns them into `AppError` variants; storage goes through `CarStore`.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Car, CarStatus, NewCar};
use crate::repositories::CarStore;

const CAR_ENTITY: &str = "Car";
const ALREADY_IN_GARAGE: &str = "Car already in garage";
const INVALID_STATUS: &str = "Invalid status";

/// Garage record service.
///
/// Cloning shares the underlying store.
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn CarStore>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    /// Lists every car in store order.
    pub async fn list_cars(&self) -> AppResult<Vec<Car>> {
        self.store.list_all().await
    }

    /// Registers a car arriving at the garage.
    ///
    /// The registration check runs before status parsing, so a duplicate
    /// registration is reported as a conflict even when the status is bad.
    ///
    /// # Errors
    /// - `Conflict` if the registration number is already present
    /// - `Validation` if `status` is not ENTRY, IN_SERVICE or COMPLETED
    pub async fn add_car(&self, registration_number: &str, status: &str) -> AppResult<Car> {
        if self.store.exists_by_registration(registration_number).await? {
            tracing::info!(registration_number, "Car already in garage");
            return Err(already_in_garage());
        }

        let status = parse_status(status)?;

        let car = self
            .store
            .create(NewCar {
                registration_number: registration_number.to_string(),
                status,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent add of the same registration
                AppError::Duplicate { .. } => already_in_garage(),
                other => other,
            })?;

        tracing::info!(car_id = car.id, registration_number, %status, "Car added");
        Ok(car)
    }

    /// Moves an existing car to IN_SERVICE or COMPLETED.
    ///
    /// # Errors
    /// - `NotFound` if no car has `id`
    /// - `Validation` if `status` is ENTRY or not a status at all
    pub async fn update_status(&self, id: i32, status: &str) -> AppResult<Car> {
        if !self.store.exists_by_id(id).await? {
            return Err(car_not_found("id", id));
        }

        let status = parse_status(status)?;
        if !status.is_update_target() {
            return Err(invalid_status());
        }

        let car = self
            .store
            .update_status(id, status)
            .await?
            .ok_or_else(|| car_not_found("id", id))?;

        tracing::info!(car_id = id, %status, "Car status updated");
        Ok(car)
    }

    /// Removes the car with `id`.
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        if self.store.delete_by_id(id).await? == 0 {
            return Err(car_not_found("id", id));
        }

        tracing::info!(car_id = id, "Car deleted");
        Ok(())
    }

    /// Removes the car with `registration_number`.
    pub async fn delete_by_registration(&self, registration_number: &str) -> AppResult<()> {
        if self
            .store
            .delete_by_registration(registration_number)
            .await?
            == 0
        {
            return Err(car_not_found("registration_number", registration_number));
        }

        tracing::info!(registration_number, "Car deleted");
        Ok(())
    }

    /// Checks that the store answers.
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

fn parse_status(raw: &str) -> AppResult<CarStatus> {
    raw.parse::<CarStatus>().map_err(|e| {
        tracing::debug!(error = %e, "Rejected status");
        invalid_status()
    })
}

fn invalid_status() -> AppError {
    AppError::Validation {
        field: "status".to_string(),
        reason: INVALID_STATUS.to_string(),
    }
}

fn already_in_garage() -> AppError {
    AppError::Conflict {
        message: ALREADY_IN_GARAGE.to_string(),
    }
}

fn car_not_found(field: &str, value: impl ToString) -> AppError {
    AppError::not_found(CAR_ENTITY, field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryCarStore;
    use async_trait::async_trait;

    fn service() -> (CarService, Arc<MemoryCarStore>) {
        let store = Arc::new(MemoryCarStore::new());
        (CarService::new(store.clone()), store)
    }

    fn assert_invalid_status(result: AppResult<Car>) {
        match result {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "status");
                assert_eq!(reason, "Invalid status");
            }
            other => panic!("Expected invalid status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_car_assigns_id() {
        let (service, _) = service();

        let car = service.add_car("MP08AB1234", "ENTRY").await.unwrap();
        assert!(car.id > 0);
        assert_eq!(car.registration_number, "MP08AB1234");
        assert_eq!(car.status, CarStatus::Entry);

        assert_eq!(service.list_cars().await.unwrap(), vec![car]);
    }

    #[tokio::test]
    async fn test_add_car_accepts_every_status() {
        let (service, _) = service();

        for (i, status) in ["ENTRY", "IN_SERVICE", "COMPLETED"].iter().enumerate() {
            let car = service.add_car(&format!("REG{}", i), status).await.unwrap();
            assert_eq!(car.status.as_str(), *status);
        }
    }

    #[tokio::test]
    async fn test_add_duplicate_registration_conflicts() {
        let (service, store) = service();
        service.add_car("ABC123", "ENTRY").await.unwrap();

        match service.add_car("ABC123", "COMPLETED").await {
            Err(AppError::Conflict { message }) => assert_eq!(message, "Car already in garage"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_check_runs_before_status_parsing() {
        let (service, _) = service();
        service.add_car("ABC123", "ENTRY").await.unwrap();

        let result = service.add_car("ABC123", "PARKED").await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_add_with_unknown_status_inserts_nothing() {
        let (service, store) = service();

        assert_invalid_status(service.add_car("ABC123", "PARKED").await);
        assert_invalid_status(service.add_car("ABC123", "entry").await);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_update_status_changes_only_status() {
        let (service, _) = service();
        let car = service.add_car("ABC123", "ENTRY").await.unwrap();

        let updated = service.update_status(car.id, "IN_SERVICE").await.unwrap();
        assert_eq!(updated.id, car.id);
        assert_eq!(updated.registration_number, "ABC123");
        assert_eq!(updated.status, CarStatus::InService);

        let completed = service.update_status(car.id, "COMPLETED").await.unwrap();
        assert_eq!(completed.status, CarStatus::Completed);
    }

    #[tokio::test]
    async fn test_update_missing_car_is_not_found() {
        let (service, _) = service();

        match service.update_status(42, "COMPLETED").await {
            Err(AppError::NotFound { entity, field, value }) => {
                assert_eq!(entity, "Car");
                assert_eq!(field, "id");
                assert_eq!(value, "42");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_car_with_bad_status_is_not_found() {
        let (service, _) = service();
        let result = service.update_status(42, "ENTRY").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_to_entry_is_rejected() {
        let (service, _) = service();
        let car = service.add_car("ABC123", "IN_SERVICE").await.unwrap();

        assert_invalid_status(service.update_status(car.id, "ENTRY").await);
        assert_invalid_status(service.update_status(car.id, "WASHED").await);

        let cars = service.list_cars().await.unwrap();
        assert_eq!(cars[0].status, CarStatus::InService);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let (service, store) = service();
        let car = service.add_car("ABC123", "ENTRY").await.unwrap();

        service.delete_by_id(car.id).await.unwrap();
        assert_eq!(store.len(), 0);

        let again = service.delete_by_id(car.id).await;
        assert!(matches!(again, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_registration() {
        let (service, store) = service();
        service.add_car("ABC123", "ENTRY").await.unwrap();
        service.add_car("XYZ789", "ENTRY").await.unwrap();

        service.delete_by_registration("ABC123").await.unwrap();
        assert_eq!(store.len(), 1);

        match service.delete_by_registration("ABC123").await {
            Err(AppError::NotFound { field, value, .. }) => {
                assert_eq!(field, "registration_number");
                assert_eq!(value, "ABC123");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let service = CarService::new(Arc::new(MemoryCarStore::unavailable()));

        assert!(matches!(
            service.list_cars().await,
            Err(AppError::ConnectionPool { .. })
        ));
        assert!(service.ping().await.is_err());
    }

    /// A store that loses every race: the pre-checks pass, then another
    /// request gets to the row first.
    struct RacingCarStore;

    #[async_trait]
    impl CarStore for RacingCarStore {
        async fn list_all(&self) -> AppResult<Vec<Car>> {
            Ok(Vec::new())
        }

        async fn exists_by_registration(&self, _registration_number: &str) -> AppResult<bool> {
            Ok(false)
        }

        async fn exists_by_id(&self, _car_id: i32) -> AppResult<bool> {
            Ok(true)
        }

        async fn create(&self, new_car: NewCar) -> AppResult<Car> {
            Err(AppError::Duplicate {
                entity: "cars".to_string(),
                field: "registration_number".to_string(),
                value: new_car.registration_number,
            })
        }

        async fn update_status(&self, _car_id: i32, _status: CarStatus) -> AppResult<Option<Car>> {
            Ok(None)
        }

        async fn delete_by_id(&self, _car_id: i32) -> AppResult<usize> {
            Ok(0)
        }

        async fn delete_by_registration(&self, _registration_number: &str) -> AppResult<usize> {
            Ok(0)
        }

        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_insert_is_conflict() {
        let service = CarService::new(Arc::new(RacingCarStore));

        match service.add_car("ABC123", "ENTRY").await {
            Err(AppError::Conflict { message }) => assert_eq!(message, "Car already in garage"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_car_removed_before_update_is_not_found() {
        let service = CarService::new(Arc::new(RacingCarStore));

        match service.update_status(7, "COMPLETED").await {
            Err(AppError::NotFound { entity, field, value }) => {
                assert_eq!(entity, "Car");
                assert_eq!(field, "id");
                assert_eq!(value, "7");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
