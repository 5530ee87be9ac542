//! Authenticate Use Case
//!
//! Verifies a username / password pair.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

const MISSING_CREDENTIALS: &str = "Please enter your username & password.";

/// Authenticate input
pub struct AuthenticateInput {
    pub user_name: String,
    pub password: String,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the user on a match
    ///
    /// An unknown user name and a wrong password both give `None`. Only
    /// empty fields are `InvalidInput`; blank ones can never match a stored
    /// user.
    pub async fn execute(&self, input: AuthenticateInput) -> AuthResult<Option<User>> {
        if input.user_name.is_empty() || input.password.is_empty() {
            return Err(AuthError::InvalidInput(MISSING_CREDENTIALS.to_string()));
        }

        let (Ok(user_name), Ok(raw_password)) = (
            UserName::new(input.user_name),
            RawPassword::new(input.password),
        ) else {
            tracing::debug!("Authentication failed: blank credentials");
            return Ok(None);
        };

        let Some(user) = self.repo.find_by_user_name(&user_name).await? else {
            tracing::debug!(user_name = %user_name, "Authentication failed");
            return Ok(None);
        };

        if !user.password.verify(&raw_password) {
            tracing::debug!(user_id = %user.user_id, "Authentication failed");
            return Ok(None);
        }

        tracing::info!(user_id = %user.user_id, "User authenticated");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::infra::memory::InMemoryUserRepository;

    async fn repo_with_alice() -> Arc<InMemoryUserRepository> {
        let repo = Arc::new(InMemoryUserRepository::new());
        RegisterUseCase::new(repo.clone())
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
        repo
    }

    fn input(user_name: &str, password: &str) -> AuthenticateInput {
        AuthenticateInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_correct_password() {
        let use_case = AuthenticateUseCase::new(repo_with_alice().await);

        let user = use_case.execute(input("alice", "secret123")).await.unwrap();
        let user = user.expect("user should authenticate");
        assert_eq!(user.user_name.as_str(), "alice");
        assert_eq!(user.first_name, "Alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_alike() {
        let use_case = AuthenticateUseCase::new(repo_with_alice().await);

        assert!(use_case.execute(input("alice", "wrong")).await.unwrap().is_none());
        assert!(use_case.execute(input("nobody", "secret123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_name_is_case_sensitive() {
        let use_case = AuthenticateUseCase::new(repo_with_alice().await);

        assert!(use_case.execute(input("Alice", "secret123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let use_case = AuthenticateUseCase::new(repo_with_alice().await);

        for (user_name, password) in [("", "secret123"), ("alice", ""), ("", "")] {
            match use_case.execute(input(user_name, password)).await {
                Err(AuthError::InvalidInput(msg)) => assert_eq!(msg, MISSING_CREDENTIALS),
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_blank_input_finds_no_user() {
        let use_case = AuthenticateUseCase::new(repo_with_alice().await);

        for (user_name, password) in [("  ", "secret123"), ("alice", "  "), ("  ", "  ")] {
            assert!(use_case.execute(input(user_name, password)).await.unwrap().is_none());
        }
    }
}
