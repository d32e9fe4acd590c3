use crate::api::types::ErrorBody;
use crate::error::{HoopcastError, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

/// Error returned by handlers; rendered as `{"error": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::NotFound(m)
            | ApiError::Unavailable(m)
            | ApiError::Internal(m) => m,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<HoopcastError> for ApiError {
    fn from(err: HoopcastError) -> Self {
        if let HoopcastError::ModelOutput(raw) = &err {
            warn!("Unparseable model output: {}", raw);
            return ApiError::Internal(err.to_string());
        }

        match err {
            HoopcastError::Validation(msg) => ApiError::BadRequest(msg),
            HoopcastError::NotFound(msg) => ApiError::NotFound(msg),
            HoopcastError::Unavailable(msg) => ApiError::Unavailable(msg),
            // raw stderr / model message goes back to the caller
            HoopcastError::ModelProcess(msg) | HoopcastError::ModelReported(msg) => {
                ApiError::Internal(msg)
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, "Request failed: {}", self.message());
        }
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
