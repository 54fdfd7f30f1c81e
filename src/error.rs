use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use crate::generator::GeneratorError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Redis(e) => {
                tracing::error!("Redis error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal database error occurred".to_string())
            }
            AppError::Generator(e @ GeneratorError::InvalidRange { .. }) => {
                tracing::warn!("Rejected range: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Generator(e @ GeneratorError::Entropy(_)) => {
                tracing::error!("Entropy failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Random source unavailable".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
