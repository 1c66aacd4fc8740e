//! In-memory `CarStore` used by service and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{Car, CarStatus, NewCar};
use crate::repositories::CarStore;

#[derive(Default)]
struct Inner {
    next_id: i32,
    cars: Vec<Car>,
}

/// Vector-backed store that mirrors the table constraints: ids start at 1
/// and registration numbers are unique.
#[derive(Default)]
pub struct MemoryCarStore {
    inner: Mutex<Inner>,
    unavailable: bool,
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like a lost database connection.
    pub fn unavailable() -> Self {
        Self {
            inner: Mutex::default(),
            unavailable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().cars.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable {
            return Err(AppError::ConnectionPool {
                source: anyhow::anyhow!("connection refused"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn list_all(&self) -> AppResult<Vec<Car>> {
        self.check_available()?;
        Ok(self.lock().cars.clone())
    }

    async fn exists_by_registration(&self, registration_number: &str) -> AppResult<bool> {
        self.check_available()?;
        Ok(self
            .lock()
            .cars
            .iter()
            .any(|car| car.registration_number == registration_number))
    }

    async fn exists_by_id(&self, car_id: i32) -> AppResult<bool> {
        self.check_available()?;
        Ok(self.lock().cars.iter().any(|car| car.id == car_id))
    }

    async fn create(&self, new_car: NewCar) -> AppResult<Car> {
        self.check_available()?;
        let mut inner = self.lock();

        if inner
            .cars
            .iter()
            .any(|car| car.registration_number == new_car.registration_number)
        {
            return Err(AppError::Duplicate {
                entity: "cars".to_string(),
                field: "registration_number".to_string(),
                value: new_car.registration_number,
            });
        }

        inner.next_id += 1;
        let car = Car {
            id: inner.next_id,
            registration_number: new_car.registration_number,
            status: new_car.status,
        };
        inner.cars.push(car.clone());
        Ok(car)
    }

    async fn update_status(&self, car_id: i32, status: CarStatus) -> AppResult<Option<Car>> {
        self.check_available()?;
        let mut inner = self.lock();

        Ok(inner.cars.iter_mut().find(|car| car.id == car_id).map(|car| {
            car.status = status;
            car.clone()
        }))
    }

    async fn delete_by_id(&self, car_id: i32) -> AppResult<usize> {
        self.check_available()?;
        let mut inner = self.lock();
        let before = inner.cars.len();
        inner.cars.retain(|car| car.id != car_id);
        Ok(before - inner.cars.len())
    }

    async fn delete_by_registration(&self, registration_number: &str) -> AppResult<usize> {
        self.check_available()?;
        let mut inner = self.lock();
        let before = inner.cars.len();
        inner
            .cars
            .retain(|car| car.registration_number != registration_number);
        Ok(before - inner.cars.len())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_available()
    }
}
