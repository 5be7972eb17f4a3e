use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Users are created once at registration and read back at login; nothing
/// in this core mutates them afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user; `UsernameTaken` when the username already exists
    async fn create(&self, user: User) -> UserResult<User>;

    /// Look a user up by username; `None` when absent
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of [`UserRepository`].
///
/// Serializes access with a reader/writer lock (concurrent readers,
/// exclusive writer), and enforces username uniqueness itself since there
/// is no store index to rely on.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameTaken(user.username));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}
