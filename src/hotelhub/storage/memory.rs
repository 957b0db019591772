use super::{StoreError, User, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store keyed by email, for `memory://` runs and tests.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(StoreError::Duplicate);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.insert(email.to_string(), user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find() {
        let store = MemoryUserStore::new();
        let created = store.create_user("a@x.com", "alice", "hash").await.unwrap();
        let found = store.find_user_by_email("a@x.com").await.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.username, "alice");
        assert_eq!(found.password_hash, "hash");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        store.create_user("a@x.com", "alice", "h1").await.unwrap();
        let second = store.create_user("a@x.com", "alice2", "h2").await;
        assert!(matches!(second, Err(StoreError::Duplicate)));
        assert_eq!(store.len().await, 1);
        let kept = store.find_user_by_email("a@x.com").await.unwrap();
        assert_eq!(kept.username, "alice");
    }

    #[tokio::test]
    async fn lookup_is_exact_match() {
        let store = MemoryUserStore::new();
        store.create_user("a@x.com", "alice", "h").await.unwrap();
        assert!(matches!(
            store.find_user_by_email("A@x.com").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.find_user_by_email("b@x.com").await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = MemoryUserStore::new();
        let a = store.create_user("a@x.com", "a", "h").await.unwrap();
        let b = store.create_user("b@x.com", "b", "h").await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(!store.is_empty().await);
    }
}
