use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// anyhow has no `From` for boxed errors, only `Error::from_boxed`, so the
// repository error type gets its own conversion here.
impl From<Box<dyn std::error::Error + Send + Sync>> for AppError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Anyhow(anyhow::Error::from_boxed(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_store_call() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err("connection closed before response".into())
    }

    #[test]
    fn test_boxed_store_error_maps_to_internal_server_error() {
        fn handler() -> Result<(), AppError> {
            failing_store_call()?;
            Ok(())
        }

        let err = handler().unwrap_err();
        assert!(matches!(err, AppError::Anyhow(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_error_variants_map_to_their_statuses() {
        let err = AppError::ValidationError("Invalid date input: 03.03.2025".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::ConflictError("Lesson already cancelled".to_string());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
