//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hound_domain::error::HoundError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HoundError`] to an HTTP response with appropriate status code.
pub struct ApiError(HoundError);

impl From<HoundError> for ApiError {
    fn from(err: HoundError) -> Self {
        Self(err)
    }
}

/// Status code and client-facing message for a [`HoundError`].
pub(crate) fn status_and_message(err: &HoundError) -> (StatusCode, String) {
    match err {
        HoundError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        HoundError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
        HoundError::Forbidden(err) => {
            tracing::warn!(error = %err, "rejected action request");
            (StatusCode::FORBIDDEN, err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = status_and_message(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
