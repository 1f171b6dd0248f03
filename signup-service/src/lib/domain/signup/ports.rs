use async_trait::async_trait;

use crate::domain::signup::models::SignUpCommand;
use crate::domain::signup::models::User;
use crate::signup::errors::SignUpError;

/// Port for sign-up domain service operations.
#[async_trait]
pub trait SignUpServicePort: Send + Sync + 'static {
    /// Register a new user from a validated command.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `AlreadyExists` - Username or email is already registered
    /// * `Password` - Password hashing failed (configuration error)
    /// * `HashingTimedOut` - Hashing exceeded its time bound
    /// * `Store` - User store operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, SignUpError>;
}

/// Persistence operations for registered users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve a user matching either the email or the username.
    ///
    /// # Arguments
    /// * `email` - Email address to match
    /// * `username` - Username to match
    ///
    /// # Returns
    /// Optional user entity (None if neither matches)
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, SignUpError>;

    /// Persist a new user if no user with the same email or username exists.
    ///
    /// The existence check and the insert are a single atomic step.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `AlreadyExists` - Username or email is already registered
    /// * `Store` - Store operation failed
    async fn create(&self, user: User) -> Result<User, SignUpError>;
}
