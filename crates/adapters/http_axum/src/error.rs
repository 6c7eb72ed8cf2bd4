//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use scenecast_domain::error::SceneCastError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SceneCastError`] to an HTTP response with appropriate status code.
pub struct ApiError(SceneCastError);

impl From<SceneCastError> for ApiError {
    fn from(err: SceneCastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SceneCastError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SceneCastError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
