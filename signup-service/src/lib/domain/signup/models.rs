use std::fmt;

use auth::credentials;
use chrono::DateTime;
use chrono::Utc;
use secrecy::ExposeSecret;
use secrecy::SecretString;
use serde::Deserialize;
use uuid::Uuid;

use crate::signup::errors::SignUpValidationError;

/// Registered user as handed to the user store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user record from a prepared credential.
    ///
    /// # Arguments
    /// * `credential` - Username, email and password hash
    ///
    /// # Returns
    /// User with a fresh identifier and the current time as creation date
    pub fn register(credential: PreparedCredential) -> Self {
        Self {
            id: UserId::new(),
            username: credential.username,
            email: credential.email,
            password_hash: credential.password_hash,
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw sign-up body as received over the wire.
///
/// Every field is optional so that absent, `null` and empty values all
/// surface as the same "required" error instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl SignUpRequest {
    /// Validate the raw request into a command.
    ///
    /// Username and email are trimmed first, matching the client rules; the
    /// password is taken as typed. Checks run in order and stop at the first
    /// failure: presence of all three fields, password length, then (strict
    /// mode only) username length and email format.
    ///
    /// # Arguments
    /// * `policy` - Which server-side rules apply
    ///
    /// # Returns
    /// SignUpCommand with non-empty, trimmed username and email
    ///
    /// # Errors
    /// * `MissingFields` - Username, email or password absent or empty
    /// * `PasswordTooShort` - Password shorter than 6 characters
    /// * `InvalidUsername` / `InvalidEmail` - Strict rules failed
    pub fn try_into_command(
        self,
        policy: &ValidationPolicy,
    ) -> Result<SignUpCommand, SignUpValidationError> {
        let username = self.username.map(|username| username.trim().to_string());
        let email = self.email.map(|email| email.trim().to_string());

        let (username, email, password) = match (username, email, self.password) {
            (Some(username), Some(email), Some(password))
                if !username.is_empty()
                    && !email.is_empty()
                    && !password.expose_secret().is_empty() =>
            {
                (username, email, password)
            }
            _ => return Err(SignUpValidationError::MissingFields),
        };

        if password.expose_secret().chars().count() < credentials::PASSWORD_MIN_LENGTH {
            return Err(SignUpValidationError::PasswordTooShort);
        }

        if policy.strict {
            credentials::check_username(&username).map_err(SignUpValidationError::InvalidUsername)?;
            credentials::check_email(&email).map_err(SignUpValidationError::InvalidEmail)?;
        }

        Ok(SignUpCommand::new(username, email, password))
    }
}

/// Server-side validation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub strict: bool,
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Command to sign up a new user with validated fields
pub struct SignUpCommand {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl SignUpCommand {
    /// Construct a new sign-up command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    ///
    /// # Returns
    /// SignUpCommand with validated fields
    pub fn new(username: String, email: String, password: SecretString) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

impl fmt::Debug for SignUpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Credential ready for storage. Holds the hash, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCredential {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: Option<&str>, email: Option<&str>, password: Option<&str>) -> SignUpRequest {
        SignUpRequest {
            username: username.map(str::to_string),
            email: email.map(str::to_string),
            password: password.map(|p| SecretString::from(p.to_string())),
        }
    }

    #[test]
    fn test_missing_fields() {
        let policy = ValidationPolicy::default();
        let cases = [
            request(None, Some("a@b.com"), Some("123456")),
            request(Some("alice"), None, Some("123456")),
            request(Some("alice"), Some("a@b.com"), None),
            request(Some(""), Some("a@b.com"), Some("123456")),
            request(Some("alice"), Some(""), Some("123456")),
            request(Some("alice"), Some("a@b.com"), Some("")),
        ];

        for case in cases {
            let err = case.try_into_command(&policy).unwrap_err();
            assert_eq!(err, SignUpValidationError::MissingFields);
            assert_eq!(err.to_string(), "All fields are required");
        }
    }

    #[test]
    fn test_missing_fields_checked_before_length() {
        let err = request(None, Some("a@b.com"), Some("1"))
            .try_into_command(&ValidationPolicy::default())
            .unwrap_err();
        assert_eq!(err, SignUpValidationError::MissingFields);
    }

    #[test]
    fn test_short_password() {
        let err = request(Some("alice"), Some("a@b.com"), Some("12345"))
            .try_into_command(&ValidationPolicy::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_lenient_policy_skips_format_rules() {
        let command = request(Some("ab"), Some("not-an-email"), Some("123456"))
            .try_into_command(&ValidationPolicy::default())
            .unwrap();
        assert_eq!(command.username, "ab");
        assert_eq!(command.email, "not-an-email");
    }

    #[test]
    fn test_strict_policy_applies_format_rules() {
        let policy = ValidationPolicy::strict();

        let err = request(Some("ab"), Some("a@b.com"), Some("123456"))
            .try_into_command(&policy)
            .unwrap_err();
        assert_eq!(err.to_string(), "Username must be at least 3 characters");

        let err = request(Some("alice"), Some("bad"), Some("123456"))
            .try_into_command(&policy)
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email");
    }

    #[test]
    fn test_username_and_email_are_trimmed() {
        let command = request(Some("  alice "), Some(" a@b.com\t"), Some(" 123456 "))
            .try_into_command(&ValidationPolicy::default())
            .unwrap();

        assert_eq!(command.username, "alice");
        assert_eq!(command.email, "a@b.com");
        assert_eq!(command.password.expose_secret(), " 123456 ");
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        let err = request(Some("   "), Some("a@b.com"), Some("123456"))
            .try_into_command(&ValidationPolicy::default())
            .unwrap_err();
        assert_eq!(err, SignUpValidationError::MissingFields);
    }

    #[test]
    fn test_deserialize_null_and_absent() {
        let parsed: SignUpRequest =
            serde_json::from_str(r#"{"username": null, "password": "123456"}"#).unwrap();
        assert!(parsed.username.is_none());
        assert!(parsed.email.is_none());
        assert!(parsed.password.is_some());
    }

    #[test]
    fn test_command_debug_redacts_password() {
        let command = request(Some("alice"), Some("a@b.com"), Some("hunter22"))
            .try_into_command(&ValidationPolicy::default())
            .unwrap();
        assert!(!format!("{:?}", command).contains("hunter22"));
    }
}
