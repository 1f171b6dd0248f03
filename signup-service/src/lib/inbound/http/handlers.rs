use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::signup::errors::SignUpError;
use crate::signup::errors::SignUpValidationError;

pub mod sign_up;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure returned by a handler.
///
/// `InternalServerError` carries detail for the server log only; callers see
/// a fixed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<SignUpValidationError> for ApiError {
    fn from(err: SignUpValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<SignUpError> for ApiError {
    fn from(err: SignUpError) -> Self {
        match err {
            SignUpError::Validation(e) => e.into(),
            SignUpError::AlreadyExists => ApiError::Conflict(err.to_string()),
            SignUpError::Password(_)
            | SignUpError::HashingTimedOut(_)
            | SignUpError::Store(_)
            | SignUpError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;

    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ApiError::from(SignUpError::from(SignUpValidationError::PasswordTooShort)),
            ApiError::BadRequest("Password must be at least 6 characters".to_string())
        );
        assert_eq!(
            ApiError::from(SignUpError::AlreadyExists),
            ApiError::Conflict("User already exists".to_string())
        );
        assert!(matches!(
            ApiError::from(SignUpError::Password(PasswordError::HashingFailed(
                "boom".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response =
            ApiError::InternalServerError("db password=secret leaked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Internal server error" }));
    }
}
