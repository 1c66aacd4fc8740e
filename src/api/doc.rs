use utoipa::OpenApi;

pub const CAR_TAG: &str = "Cars";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garage",
        description = "Tracks cars through a service garage: ENTRY, IN_SERVICE and COMPLETED",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::CarStatus,
        )
    ),
    tags(
        (name = CAR_TAG, description = "Car registration and status endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
