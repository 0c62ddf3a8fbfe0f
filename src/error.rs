use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use compute::error::{PortalError, StoreError};
use thiserror::Error;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Error returned by every agent handler.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Portal(#[from] PortalError),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Not allowed to act as agent {0}")]
    Forbidden(i32),

    #[error("Session lookup unavailable")]
    GuardUnavailable(#[source] StoreError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Portal(PortalError::Validation(_)) | ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            ApiError::Portal(PortalError::NotFoundOrUnauthorized { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            ApiError::Portal(PortalError::DataUnavailable { .. }) | ApiError::GuardUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE")
            }
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::GuardUnavailable(source) = &self {
            error!(error = %source, "Access guard failed");
        }

        let (status, code) = self.status_and_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
