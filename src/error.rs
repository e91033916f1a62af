/// Error types for the ninja service
///
/// This module defines the closed set of failures a request can surface.
/// Each variant carries a human-readable message and is converted to an
/// HTTP response at the actix boundary; the variant decides the status
/// code and whether the occurrence is written to the server log.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for ninja-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing required input
    #[error("{0}")]
    BadRequest(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// MongoDB was unreachable or an operation against it failed
    #[error("Database error: {0}")]
    Database(String),

    /// Anything that escapes the taxonomy above
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this occurrence is written to the server log.
    ///
    /// Validation failures stay quiet; persistence and unknown failures
    /// are logged.
    pub fn should_log(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Unexpected(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Unknown errors are logged in full and answered with an opaque
            // body that leaks no internal detail.
            AppError::Unexpected(err) => {
                tracing::error!("Unhandled error: {:?}", err);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "errors": [{ "message": "Something went wrong" }]
                }))
            }
            other => {
                if other.should_log() {
                    tracing::error!("{}", other);
                }
                HttpResponse::build(other.status_code()).json(serde_json::json!({
                    "message": other.to_string(),
                }))
            }
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("x")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn only_server_side_failures_are_logged() {
        assert!(!AppError::BadRequest("x".into()).should_log());
        assert!(!AppError::NotFound("x".into()).should_log());
        assert!(AppError::Database("x".into()).should_log());
        assert!(AppError::from(anyhow::anyhow!("x")).should_log());
    }

    #[actix_web::test]
    async fn known_errors_render_a_message_body() {
        let resp = AppError::NotFound("Ninja not found".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Ninja not found");
    }

    #[actix_web::test]
    async fn unknown_errors_are_opaque() {
        let resp = AppError::from(anyhow::anyhow!("secret driver detail")).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["message"], "Something went wrong");
        assert!(!String::from_utf8_lossy(&body).contains("secret driver detail"));
    }
}
