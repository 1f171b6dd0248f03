use auth::PasswordError;
use thiserror::Error;

/// Rejection of a sign-up request before any processing happens.
///
/// The display text is the exact message returned to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignUpValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("{0}")]
    InvalidUsername(&'static str),

    #[error("{0}")]
    InvalidEmail(&'static str),
}

/// Top-level error for sign-up operations
#[derive(Debug, Clone, Error)]
pub enum SignUpError {
    #[error(transparent)]
    Validation(#[from] SignUpValidationError),

    // Never names which of username or email collided
    #[error("User already exists")]
    AlreadyExists,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Password hashing timed out after {0} ms")]
    HashingTimedOut(u128),

    #[error("User store error: {0}")]
    Store(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

