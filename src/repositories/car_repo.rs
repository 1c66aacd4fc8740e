//! Car repository for async database operations.
//!
//! Implements `CarStore` for the cars table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Car, CarStatus, NewCar};
use crate::repositories::CarStore;

/// Car repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct CarRepository {
    pool: AsyncDbPool,
}

impl CarRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for CarRepository {
    async fn list_all(&self) -> AppResult<Vec<Car>> {
        use crate::schema::cars::dsl::*;
        let mut conn = self.pool.get().await?;

        cars.select(Car::as_select())
            .order(id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn exists_by_registration(&self, registration: &str) -> AppResult<bool> {
        use crate::schema::cars::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(
            cars.filter(registration_number.eq(registration)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(AppError::from)
    }

    async fn exists_by_id(&self, car_id: i32) -> AppResult<bool> {
        use crate::schema::cars::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(cars.filter(id.eq(car_id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, new_car: NewCar) -> AppResult<Car> {
        use crate::schema::cars::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(cars)
            .values(&new_car)
            .returning(Car::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| AppError::from_diesel(e, "insert car"))
    }

    async fn update_status(&self, car_id: i32, new_status: CarStatus) -> AppResult<Option<Car>> {
        use crate::schema::cars::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(cars.filter(id.eq(car_id)))
            .set(status.eq(new_status))
            .returning(Car::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| AppError::from_diesel(e, "update car status"))
    }

    async fn delete_by_id(&self, car_id: i32) -> AppResult<usize> {
        use crate::schema::cars::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(cars.filter(id.eq(car_id)))
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::from_diesel(e, "delete car by id"))
    }

    async fn delete_by_registration(&self, registration: &str) -> AppResult<usize> {
        use crate::schema::cars::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(cars.filter(registration_number.eq(registration)))
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::from_diesel(e, "delete car by registration"))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| AppError::from_diesel(e, "ping database"))
    }
}
