use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    Forbidden,
    Conflict,
    BadRequest,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Forbidden => "Forbidden",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl HandlerError {
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: message.into(),
            details: None,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            // Invalid state transitions (double-cancel, quoting a cancelled
            // job) are part of the 400 wire contract, not 409.
            HandlerErrorKind::Validation
            | HandlerErrorKind::BadRequest
            | HandlerErrorKind::Conflict => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

#[derive(Debug, Clone)]
pub enum ServiceError {
    NotFound(String),
    InvalidInput(String),
    Forbidden(String),
    InternalError(String),
    Conflict(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            ServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

// Allow conversion from RepositoryError to ServiceError
impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::ValidationError(msg) => ServiceError::InvalidInput(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::InternalError(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::InternalError(msg),
            RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
            RepositoryError::Generic(e) => ServiceError::InternalError(e.to_string()),
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HandlerError {
                error: HandlerErrorKind::NotFound,
                message: msg,
                details: None,
            },
            ServiceError::InvalidInput(msg) => HandlerError {
                error: HandlerErrorKind::Validation,
                message: msg,
                details: None,
            },
            ServiceError::Forbidden(msg) => HandlerError {
                error: HandlerErrorKind::Forbidden,
                message: msg,
                details: None,
            },
            ServiceError::Conflict(msg) => HandlerError {
                error: HandlerErrorKind::Conflict,
                message: msg,
                details: None,
            },
            ServiceError::InternalError(msg) => {
                // Details stay server-side; the caller gets a generic message.
                tracing::error!("Internal error: {}", msg);
                HandlerError {
                    error: HandlerErrorKind::Internal,
                    message: "Internal server error".to_string(),
                    details: None,
                }
            }
        }
    }
}
