use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum GarageError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Invalid form field `{field}`: {reason}")]
    InvalidForm { field: &'static str, reason: String },
}

impl From<figment::Error> for GarageError {
    fn from(e: figment::Error) -> Self {
        GarageError::Config(Box::new(e))
    }
}

impl GarageError {
    /// True when the database rejected a write because of a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            GarageError::DatabaseError(SqlxError::Database(db_err)) => {
                db_err.is_unique_violation()
            }
            _ => false,
        }
    }
}

impl IntoResponse for GarageError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            GarageError::DatabaseError(_)
            | GarageError::Json(_)
            | GarageError::Config(_) => {
                tracing::error!(error = %self, "request failed");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (status, body)
            }
            GarageError::InvalidForm { field, reason } => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorBody {
                    code: "INVALID_FORM".to_string(),
                    message: format!("{field}: {reason}"),
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
