use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] foodgram_shared::Error),

    /// Request that could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.to_string())
    }
}

/// Ids that do not parse cannot match a resource.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "path rejected");

        AppError::NotFound("page")
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use foodgram_shared::Error;

        match self {
            AppError::Domain(Error::Validate(errors)) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "validation failed", "errors": errors })),
            )
                .into_response(),
            AppError::Domain(Error::Rejected(message)) | AppError::BadRequest(message) => {
                detail(StatusCode::BAD_REQUEST, message)
            }
            AppError::Domain(Error::Forbidden) => detail(
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action.",
            ),
            AppError::Domain(Error::NotFound(name)) | AppError::NotFound(name) => {
                detail(StatusCode::NOT_FOUND, format!("{name} not found"))
            }
            AppError::Unauthorized(message) => detail(StatusCode::UNAUTHORIZED, message),
            AppError::Domain(Error::Unknown(err)) | AppError::Internal(err) => {
                tracing::error!(err = %err, "request failed");

                detail(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Domain(foodgram_shared::Error::Rejected("nope".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Domain(foodgram_shared::Error::Forbidden),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::Domain(foodgram_shared::Error::NotFound("recipe")),
                StatusCode::NOT_FOUND,
            ),
            (AppError::NotFound("tag"), StatusCode::NOT_FOUND),
            (
                AppError::BadRequest("expected u32".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized("missing token"),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Internal(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
