use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use melolo_core::error::{ApiError, ErrorBody};
use melolo_scraper::ScrapeError;
use tracing::error;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "request failed");
        }
        (status, Json(ErrorBody::from(&self.0))).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<ScrapeError> for AppError {
    fn from(e: ScrapeError) -> Self {
        Self(ApiError::Internal(e.to_string()))
    }
}
