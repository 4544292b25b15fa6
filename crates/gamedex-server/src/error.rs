use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use gamedex_core::validation::ValidationError;

use crate::database::DatabaseError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Conflict(m) | Self::Internal(m) => {
                write!(f, "{m}")
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m),
            Self::Conflict(m) => (StatusCode::CONFLICT, m),
            Self::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<DatabaseError> for AppError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::Validation(v) => v.into(),
            DatabaseError::NotFound => Self::NotFound(e.to_string()),
            DatabaseError::Conflict(_) => Self::Conflict(e.to_string()),
            DatabaseError::Load(ref source) => {
                tracing::error!("Error reading games database: {source}");
                Self::Internal("Failed to load games".to_string())
            },
            DatabaseError::Save(ref source) => {
                tracing::error!("Error writing games database: {source}");
                Self::Internal("Failed to save games".to_string())
            },
        }
    }
}
