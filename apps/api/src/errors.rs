use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::RenderError;

/// Failures raised while turning a contract record into a laid-out document.
///
/// Oversized units are not errors: the layout engine places them alone on a
/// page and reports an `OverflowNotice` instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error("Contract record is missing required field '{field}'")]
    InvalidRecord { field: &'static str },

    #[error("Template references unknown placeholder '{{{name}}}'")]
    UnknownPlaceholder { name: String },

    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Composition error: {0}")]
    Compose(#[from] ComposeError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Compose(e @ ComposeError::InvalidRecord { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_RECORD",
                e.to_string(),
            ),
            AppError::Compose(e) => {
                tracing::error!("Composition error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMPOSITION_ERROR",
                    "The contract template could not be composed".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The document could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_maps_to_422() {
        let err = AppError::from(ComposeError::InvalidRecord { field: "price" });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_template_error_maps_to_500() {
        let err = AppError::from(ComposeError::UnknownPlaceholder {
            name: "nip".to_string(),
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation("text cannot be empty".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_placeholder_message_shows_braces() {
        let err = ComposeError::UnknownPlaceholder {
            name: "nip".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Template references unknown placeholder '{nip}'"
        );
    }
}
