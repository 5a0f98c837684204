//! HTTP mapping for user API failures.
//!
//! Every failure renders as a JSON body, whatever the request's `Accept`
//! header asks for:
//!
//! ```json
//! { "code": "duplicate_name", "message": "...", "errors": { "UserError": ["..."] } }
//! ```
//!
//! `errors` only appears for validation and duplicate-name failures.
//! Internal failures are logged and redacted.

use crate::model::ValidationErrors;
use crate::store::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Key under which a duplicate-name failure is reported.
pub const DUPLICATE_NAME_KEY: &str = "UserError";
pub const DUPLICATE_NAME_MESSAGE: &str = "Name already exists!";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The id 0 is reserved and does not identify a user.")]
    InvalidIdentifier,

    #[error("User {0} was not found.")]
    NotFound(i64),

    #[error("A user named '{0}' already exists.")]
    DuplicateName(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("The id is assigned by the server and must not be supplied.")]
    UnexpectedIdOnCreate,

    #[error("One or more validation errors occurred.")]
    Validation(ValidationErrors),

    #[error("Internal server error")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl ApiError {
    /// Stable machine-readable code for the error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier => "invalid_identifier",
            Self::NotFound(_) => "not_found",
            Self::DuplicateName(_) => "duplicate_name",
            Self::MalformedRequest(_) => "malformed_request",
            Self::UnexpectedIdOnCreate => "unexpected_id",
            Self::Validation(_) => "validation_failed",
            Self::Internal(_) => "internal_error",
        }
    }

    fn errors(&self) -> Option<ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::DuplicateName(_) => Some(ValidationErrors::single(
                DUPLICATE_NAME_KEY,
                DUPLICATE_NAME_MESSAGE,
            )),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier
            | Self::DuplicateName(_)
            | Self::MalformedRequest(_)
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnexpectedIdOnCreate | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Display of Internal never includes the wrapped detail.
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code(),
            message: self.to_string(),
            errors: self.errors(),
        })
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => match id.parse() {
                Ok(id) => Self::NotFound(id),
                Err(_) => Self::Internal(format!("unparseable id in store error: {id}")),
            },
            StoreError::DuplicateName(name) => Self::DuplicateName(name),
            StoreError::Invalid(errors) => Self::Validation(errors),
            err @ (StoreError::Database(_) | StoreError::Unavailable(_)) => {
                warn!(error = %err, "user store failure");
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<actix_web::error::UrlGenerationError> for ApiError {
    fn from(err: actix_web::error::UrlGenerationError) -> Self {
        warn!(error = %err, "failed to build resource URL");
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{json, Value};

    async fn body_of(error: ApiError) -> Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(ApiError::InvalidIdentifier, StatusCode::BAD_REQUEST)]
    #[case(ApiError::NotFound(3), StatusCode::NOT_FOUND)]
    #[case(ApiError::DuplicateName("a".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::MalformedRequest("x".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::UnexpectedIdOnCreate, StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(ApiError::Validation(ValidationErrors::new()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_variant(#[case] error: ApiError, #[case] status: StatusCode) {
        assert_eq!(error.status_code(), status);
    }

    #[actix_web::test]
    async fn duplicate_name_reports_user_error_key() {
        let body = body_of(ApiError::DuplicateName("Alice".into())).await;
        assert_eq!(body["code"], "duplicate_name");
        assert_eq!(body["errors"], json!({ "UserError": ["Name already exists!"] }));
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let body = body_of(ApiError::Internal("disk on fire".into())).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn store_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(StoreError::NotFound("7".into())),
            ApiError::NotFound(7)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Unavailable("actor gone".into())),
            ApiError::Internal(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Invalid(ValidationErrors::single("name", "required"))),
            ApiError::Validation(_)
        ));
    }
}
