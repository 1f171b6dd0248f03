use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::state::UserSummary;

pub const SIGN_UP_PATH: &str = "/api/auth/signup";

/// Shown when the server rejects a request without saying why.
pub const REJECTED_FALLBACK_MESSAGE: &str = "Registration failed";

/// Shown when the server could not be reached or answered unintelligibly.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Body sent to the sign-up endpoint. The confirmation never leaves the client.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignUpPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpPayload")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful (2xx) answer from the sign-up endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Error type for sign-up calls.
///
/// Status codes are kept for logging; the controller treats every rejection
/// the same way.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignUpApiError {
    #[error("Sign-up rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Sign-up request failed: {0}")]
    Network(String),
}

impl SignUpApiError {
    /// Message suitable for the error banner.
    pub fn user_message(&self) -> &str {
        match self {
            SignUpApiError::Rejected { message, .. } => message,
            SignUpApiError::Network(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

/// Transport to the sign-up endpoint.
#[async_trait]
pub trait SignUpApi: Send + Sync + 'static {
    /// Submit a sign-up request.
    ///
    /// # Arguments
    /// * `payload` - Username, email and password
    ///
    /// # Returns
    /// Server acknowledgement with the created user
    ///
    /// # Errors
    /// * `Rejected` - Server answered with a non-2xx status
    /// * `Network` - Server unreachable or response undecodable
    async fn sign_up(&self, payload: SignUpPayload) -> Result<SignUpResponse, SignUpApiError>;
}

/// `SignUpApi` over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpSignUpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSignUpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client, e.g. one with a request timeout.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SIGN_UP_PATH)
    }
}

#[async_trait]
impl SignUpApi for HttpSignUpApi {
    async fn sign_up(&self, payload: SignUpPayload) -> Result<SignUpResponse, SignUpApiError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| SignUpApiError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string());

            tracing::debug!(status = status.as_u16(), %message, "Sign-up rejected");

            return Err(SignUpApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SignUpResponse>()
            .await
            .map_err(|e| SignUpApiError::Network(format!("Invalid response body: {}", e)))
    }
}

/// Third-party sign-in providers. Only the redirect target exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn redirect_path(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "/api/auth/google",
            OAuthProvider::Github => "/api/auth/github",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let rejected = SignUpApiError::Rejected {
            status: 409,
            message: "User already exists".to_string(),
        };
        assert_eq!(rejected.user_message(), "User already exists");

        let network = SignUpApiError::Network("connection refused".to_string());
        assert_eq!(network.user_message(), "Network error");
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = SignUpPayload {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret123".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "secret123"
            })
        );
        assert!(!format!("{:?}", payload).contains("secret123"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let api = HttpSignUpApi::new("http://localhost:3000/");
        assert_eq!(api.endpoint(), "http://localhost:3000/api/auth/signup");
    }

    #[test]
    fn test_oauth_redirects() {
        assert_eq!(OAuthProvider::Google.redirect_path(), "/api/auth/google");
        assert_eq!(OAuthProvider::Github.redirect_path(), "/api/auth/github");
    }
}
