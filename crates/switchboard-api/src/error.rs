//! Maps domain `AppError` to the failure envelope.

use axum::Json;
use axum::response::{IntoResponse, Response};

use switchboard_core::error::{AppError, ErrorKind};
use switchboard_core::types::Envelope;

/// Wrapper that turns an [`AppError`] into the failure envelope.
///
/// Every failure is emitted with status 200: the `success` flag inside the
/// envelope, not the HTTP status code, is the wire contract.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.kind {
            ErrorKind::Internal | ErrorKind::Store | ErrorKind::Engine => {
                tracing::error!(kind = %self.0.kind, error = %self.0.message, "request failed");
            }
            _ => {
                tracing::debug!(kind = %self.0.kind, error = %self.0.message, "request failed");
            }
        }
        Json(Envelope::fail(self.0.message)).into_response()
    }
}
