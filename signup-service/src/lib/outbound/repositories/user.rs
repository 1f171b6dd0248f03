use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::signup::models::User;
use crate::domain::signup::models::UserId;
use crate::domain::signup::ports::UserStore;
use crate::signup::errors::SignUpError;

/// Process-local user store.
///
/// Emails compare case-insensitively, usernames exactly. Values arrive
/// trimmed from `SignUpRequest::try_into_command`. Contents are lost on
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    fn collides(user: &User, email: &str, username: &str) -> bool {
        user.email.eq_ignore_ascii_case(email) || user.username == username
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, SignUpError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| Self::collides(user, email, username))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, SignUpError> {
        // Check and insert under one write guard
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|existing| Self::collides(existing, &user.email, &user.username))
        {
            return Err(SignUpError::AlreadyExists);
        }

        users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, total = users.len(), "User stored");

        Ok(user)
    }
}
