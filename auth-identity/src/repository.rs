use async_trait::async_trait;
use dashmap::DashMap;

use crate::{error::*, models::*};

/// Read access to the host's local user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Exact, case-sensitive lookup by login.
    async fn find_by_login(&self, login: &str) -> Result<Option<LocalUser>>;
}

/// In-memory directory for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<String, LocalUser>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = LocalUser>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    pub fn insert(&self, user: LocalUser) {
        self.users.insert(user.login.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_login(&self, login: &str) -> Result<Option<LocalUser>> {
        Ok(self.users.get(login).map(|entry| entry.value().clone()))
    }
}
