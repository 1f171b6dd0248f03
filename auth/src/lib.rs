//! Credential utilities shared by the sign-up service and its client.
//!
//! Provides:
//! - Credential validation rules (username, email, password, confirmation)
//! - Password hashing (Argon2id with a tunable work factor)
//!
//! The server and the client apply these rules independently: the server is
//! authoritative, the client uses them for immediate feedback.
//!
//! # Examples
//!
//! ## Validating a sign-up form
//! ```
//! use auth::credentials::{validate, Field, SignUpForm};
//!
//! let form = SignUpForm::new("ab", "a@b.com", "123456", "123456");
//! let errors = validate(&form);
//! assert_eq!(
//!     errors.get(Field::Username),
//!     Some("Username must be at least 3 characters")
//! );
//! assert_eq!(errors.len(), 1);
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_work_factor(1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```

pub mod credentials;
pub mod password;

// Re-export commonly used items
pub use credentials::Field;
pub use credentials::SignUpForm;
pub use credentials::ValidationErrors;
pub use password::PasswordError;
pub use password::PasswordHasher;
