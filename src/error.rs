use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Every way a request can fail, and how each one is rendered to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Maximum number of students per course is {max}, attempted to enroll {attempted}.")]
    EnrollmentLimitExceeded { attempted: usize, max: usize },

    #[error("{field}: {}", .messages.join(" "))]
    InvalidField {
        field: &'static str,
        messages: Vec<String>,
    },

    #[error("{0}")]
    MalformedBody(String),

    #[error("Not found.")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::InvalidField {
            field,
            messages: vec![message.into()],
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EnrollmentLimitExceeded { .. }
            | ApiError::InvalidField { .. }
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::EnrollmentLimitExceeded { .. } => {
                json!({ "non_field_errors": [self.to_string()] })
            }
            ApiError::InvalidField { field, messages } => {
                let mut errors = Map::new();
                errors.insert(field.to_string(), json!(messages));
                Value::Object(errors)
            }
            ApiError::MalformedBody(_) | ApiError::NotFound => {
                json!({ "detail": self.to_string() })
            }
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "internal error while handling request");
                json!({ "detail": "Internal server error." })
            }
        };

        (status, Json(body)).into_response()
    }
}
