use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use secrecy::ExposeSecret;

use crate::domain::signup::models::PreparedCredential;
use crate::domain::signup::models::SignUpCommand;
use crate::domain::signup::models::User;
use crate::signup::errors::SignUpError;
use crate::signup::ports::SignUpServicePort;
use crate::signup::ports::UserStore;

/// Domain service implementation for sign-up.
///
/// Concrete implementation of SignUpServicePort with dependency injection.
pub struct SignUpService<US>
where
    US: UserStore,
{
    store: Arc<US>,
    password_hasher: Arc<PasswordHasher>,
    hash_timeout: Duration,
}

impl<US> SignUpService<US>
where
    US: UserStore,
{
    /// Create a new sign-up service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `password_hasher` - Configured password hasher
    /// * `hash_timeout` - Upper bound for a single hashing operation
    ///
    /// # Returns
    /// Configured sign-up service instance
    pub fn new(store: Arc<US>, password_hasher: PasswordHasher, hash_timeout: Duration) -> Self {
        Self {
            store,
            password_hasher: Arc::new(password_hasher),
            hash_timeout,
        }
    }

    /// Hash the password off the async workers and drop the plaintext.
    async fn prepare(&self, command: SignUpCommand) -> Result<PreparedCredential, SignUpError> {
        let SignUpCommand {
            username,
            email,
            password,
        } = command;

        let hasher = Arc::clone(&self.password_hasher);
        let hashing = tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()));

        let password_hash = tokio::time::timeout(self.hash_timeout, hashing)
            .await
            .map_err(|_| SignUpError::HashingTimedOut(self.hash_timeout.as_millis()))?
            .map_err(|e| SignUpError::Unknown(format!("Hashing task failed: {}", e)))??;

        Ok(PreparedCredential {
            username,
            email,
            password_hash,
        })
    }
}

#[async_trait]
impl<US> SignUpServicePort for SignUpService<US>
where
    US: UserStore,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, SignUpError> {
        let existing = self
            .store
            .find_by_email_or_username(&command.email, &command.username)
            .await?;

        if existing.is_some() {
            tracing::info!(
                username = %command.username,
                "Sign-up rejected: user already exists"
            );
            return Err(SignUpError::AlreadyExists);
        }

        let credential = self.prepare(command).await?;

        // The store re-checks atomically; a racing duplicate surfaces here
        let user = self.store.create(User::register(credential)).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User signed up"
        );

        Ok(user)
    }
}
