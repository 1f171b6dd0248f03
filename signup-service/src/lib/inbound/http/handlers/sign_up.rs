use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::signup::models::SignUpRequest;
use crate::domain::signup::models::User;
use crate::domain::signup::ports::SignUpServicePort;
use crate::inbound::http::router::AppState;

pub const CREATED_MESSAGE: &str = "User created successfully";

/// `POST /api/auth/signup`
///
/// The body is parsed by hand so that a malformed payload gets the same
/// `{ "message": ... }` shape as every other failure.
pub async fn sign_up(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiSuccess<SignUpResponseData>, ApiError> {
    let request: SignUpRequest = serde_json::from_slice(&body).map_err(|e| {
        // Position only: the error text can echo field values
        tracing::debug!(
            category = ?e.classify(),
            line = e.line(),
            column = e.column(),
            "Rejected malformed sign-up body"
        );
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    let command = request.try_into_command(&state.validation_policy)?;

    state
        .signup_service
        .sign_up(command)
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::CREATED, SignUpResponseData::created(&user)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpResponseData {
    pub message: String,
    pub user: UserSummary,
}

impl SignUpResponseData {
    fn created(user: &User) -> Self {
        Self {
            message: CREATED_MESSAGE.to_string(),
            user: user.into(),
        }
    }
}

/// Public view of a user. Carries neither the password nor its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}
