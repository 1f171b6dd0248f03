use thiserror::Error;

/// Error type for password operations.
///
/// Every variant is a configuration-level failure from the caller's point of
/// view, never a user-facing validation error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Work factor out of range: expected {min}..={max}, got {actual}")]
    InvalidWorkFactor { min: u32, max: u32, actual: u32 },

    #[error("Password input too long: maximum {max} bytes, got {actual}")]
    InputTooLong { max: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
