//! In-Memory Repository Implementation
//!
//! Process-local user store for tests and database-less local runs. Each
//! call takes the lock once, so check-and-write steps (user name uniqueness)
//! are atomic.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// In-memory user repository
///
/// Clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
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
}

fn name_taken_by_other(users: &HashMap<UserId, User>, user: &User) -> bool {
    users
        .values()
        .any(|u| u.user_name == user.user_name && u.user_id != user.user_id)
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.user_name == user_name).cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| &u.user_name == user_name))
    }

    async fn insert(&self, user: &User) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if name_taken_by_other(&users, user) {
            return Err(AuthError::UserNameTaken(user.user_name.to_string()));
        }
        if users.contains_key(&user.user_id) {
            return Err(AuthError::Internal(format!(
                "Duplicate user_id: {}",
                user.user_id
            )));
        }

        users.insert(user.user_id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if name_taken_by_other(&users, user) {
            return Err(AuthError::UserNameTaken(user.user_name.to_string()));
        }

        users.insert(user.user_id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        self.users.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};

    fn user(name: &str) -> User {
        let raw = RawPassword::new("secret123".to_string()).unwrap();
        User::new(
            None,
            UserName::new(name).unwrap(),
            "First".to_string(),
            "Last".to_string(),
            format!("{name}@example.com"),
            UserPassword::from_raw(&raw),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.insert(&user("alice")).await.unwrap();

        let by_id = repo.find_by_id(&alice.user_id).await.unwrap().unwrap();
        assert_eq!(by_id.user_name.as_str(), "alice");

        let by_name = repo
            .find_by_user_name(&UserName::new("alice").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.user_id, alice.user_id);

        assert!(repo
            .exists_by_user_name(&UserName::new("alice").unwrap())
            .await
            .unwrap());
        assert!(!repo
            .exists_by_user_name(&UserName::new("Alice").unwrap())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unique_user_name() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("alice")).await.unwrap();

        assert!(matches!(
            repo.insert(&user("alice")).await,
            Err(AuthError::UserNameTaken(_))
        ));
        assert_eq!(repo.len().await, 1);

        let mut bob = repo.insert(&user("bob")).await.unwrap();
        bob.user_name = UserName::new("alice").unwrap();
        assert!(matches!(
            repo.update(&bob).await,
            Err(AuthError::UserNameTaken(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(&user("alice")).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryUserRepository::new();
        assert!(matches!(
            repo.update(&user("ghost")).await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.insert(&user("alice")).await.unwrap();

        repo.delete(&alice.user_id).await.unwrap();
        repo.delete(&alice.user_id).await.unwrap();
        assert!(repo.is_empty().await);
    }
}
