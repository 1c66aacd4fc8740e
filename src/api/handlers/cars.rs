//! Garage car request handlers.
//!
//! Parameters may arrive as a query string, a form body or a JSON body;
//! see `ValidatedParams`.

use crate::api::doc::CAR_TAG;
use crate::api::dto::{
    AddCarRequest, CAR_DELETED, CarResponse, DeleteByIdRequest, DeleteByRegistrationRequest,
    DeletedByIdResponse, DeletedByRegistrationResponse, ErrorResponse, STATUS_UPDATED,
    StatusUpdatedResponse, UpdateStatusRequest, parse_car_id,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedParams;
use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates car-related routes.
pub fn car_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_cars))
        .routes(routes!(add_car))
        .routes(routes!(update_status))
        .routes(routes!(delete_by_id))
        .routes(routes!(delete_by_registration))
}

/// GET /cars - List every car in the garage
#[utoipa::path(
    get,
    path = "/cars",
    tag = CAR_TAG,
    responses(
        (status = 200, description = "All cars", body = Vec<CarResponse>),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
async fn list_cars(State(state): State<AppState>) -> AppResult<Json<Vec<CarResponse>>> {
    tracing::info!("Getting all cars in the garage");
    let cars = state.services.cars.list_cars().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// POST /cars/add - Register a car arriving at the garage
#[utoipa::path(
    post,
    path = "/cars/add",
    tag = CAR_TAG,
    params(AddCarRequest),
    responses(
        (status = 201, description = "Car added", body = CarResponse),
        (status = 400, description = "Invalid status or parameters", body = ErrorResponse),
        (status = 409, description = "Car already in garage", body = ErrorResponse)
    )
)]
async fn add_car(
    State(state): State<AppState>,
    ValidatedParams(req): ValidatedParams<AddCarRequest>,
) -> AppResult<(StatusCode, Json<CarResponse>)> {
    tracing::info!(
        registration_number = %req.registration_number,
        status = %req.status,
        "Adding a new car to the garage"
    );
    let car = state
        .services
        .cars
        .add_car(&req.registration_number, &req.status)
        .await?;
    Ok((StatusCode::CREATED, Json(CarResponse::from(car))))
}

/// PUT /cars/update - Move a car to IN_SERVICE or COMPLETED
#[utoipa::path(
    put,
    path = "/cars/update",
    tag = CAR_TAG,
    params(UpdateStatusRequest),
    responses(
        (status = 200, description = "Status updated", body = StatusUpdatedResponse),
        (status = 400, description = "Invalid status or id", body = ErrorResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    )
)]
async fn update_status(
    State(state): State<AppState>,
    ValidatedParams(req): ValidatedParams<UpdateStatusRequest>,
) -> AppResult<Json<StatusUpdatedResponse>> {
    tracing::info!(id = %req.id, status = %req.status, "Updating the status of a car");
    let car_id = parse_car_id(&req.id)?;
    let car = state
        .services
        .cars
        .update_status(car_id, &req.status)
        .await?;

    Ok(Json(StatusUpdatedResponse {
        id: req.id,
        message: STATUS_UPDATED.to_string(),
        status: car.status,
    }))
}

/// DELETE /cars/delete/id - Remove a car by id
#[utoipa::path(
    delete,
    path = "/cars/delete/id",
    tag = CAR_TAG,
    params(DeleteByIdRequest),
    responses(
        (status = 200, description = "Car deleted", body = DeletedByIdResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    )
)]
async fn delete_by_id(
    State(state): State<AppState>,
    ValidatedParams(req): ValidatedParams<DeleteByIdRequest>,
) -> AppResult<Json<DeletedByIdResponse>> {
    tracing::info!(id = %req.id, "Deleting a car from the garage by id");
    let car_id = parse_car_id(&req.id)?;
    state.services.cars.delete_by_id(car_id).await?;

    Ok(Json(DeletedByIdResponse {
        message: CAR_DELETED.to_string(),
        id: req.id,
    }))
}

/// DELETE /cars/delete/registration - Remove a car by registration number
#[utoipa::path(
    delete,
    path = "/cars/delete/registration",
    tag = CAR_TAG,
    params(DeleteByRegistrationRequest),
    responses(
        (status = 200, description = "Car deleted", body = DeletedByRegistrationResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    )
)]
async fn delete_by_registration(
    State(state): State<AppState>,
    ValidatedParams(req): ValidatedParams<DeleteByRegistrationRequest>,
) -> AppResult<Json<DeletedByRegistrationResponse>> {
    tracing::info!(
        registration_number = %req.registration_number,
        "Deleting a car from the garage by registration number"
    );
    state
        .services
        .cars
        .delete_by_registration(&req.registration_number)
        .await?;

    Ok(Json(DeletedByRegistrationResponse {
        message: CAR_DELETED.to_string(),
        registration: req.registration_number,
    }))
}
