//! Delete User Use Case
//!
//! Idempotent: deleting an unknown ID succeeds.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Delete user use case
pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        self.repo.delete(user_id).await?;

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_delete() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = RegisterUseCase::new(repo.clone())
            .execute(RegisterInput {
                user_id: None,
                user_name: "alice".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Liddell".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        DeleteUserUseCase::new(repo.clone())
            .execute(&user.user_id)
            .await
            .unwrap();
        assert!(repo.find_by_id(&user.user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_twice() {
        let use_case = DeleteUserUseCase::new(Arc::new(InMemoryUserRepository::new()));
        let user_id = UserId::new();

        use_case.execute(&user_id).await.unwrap();
        use_case.execute(&user_id).await.unwrap();
    }
}
