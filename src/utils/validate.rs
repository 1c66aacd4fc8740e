use crate::error::{AppError, AppResult};
use axum::extract::{Form, FromRequest, Json, Query, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Request parameters read from wherever the client put them, then validated.
///
/// - `application/json` body
/// - `application/x-www-form-urlencoded` body
/// - the query string, for any other request
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedParams<T>(pub T);

enum ParamSource {
    Json,
    Form,
    Query,
}

fn param_source(req: &Request) -> ParamSource {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.starts_with("application/json") {
        ParamSource::Json
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        ParamSource::Form
    } else {
        ParamSource::Query
    }
}

impl<T, S> FromRequest<S> for ValidatedParams<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let value = match param_source(&req) {
            ParamSource::Json => {
                let Json(value) = Json::<T>::from_request(req, state).await?;
                value
            }
            ParamSource::Form => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                value
            }
            ParamSource::Query => {
                let Query(value) = Query::<T>::try_from_uri(req.uri())?;
                value
            }
        };

        value.validate()?;
        Ok(ValidatedParams(value))
    }
}
