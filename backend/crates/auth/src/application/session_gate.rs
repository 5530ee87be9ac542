//! Session Gate
//!
//! Request-time check for protected operations: the token must validate and
//! its subject must still exist. Deleting an account therefore revokes every
//! token issued for it.

use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Session gate
pub struct SessionGate<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
}

impl<R> SessionGate<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    /// Resolve a bearer token to the live user record
    ///
    /// Fails with `Unauthorized` for an invalid token or a deleted subject.
    /// Store failures propagate unchanged.
    pub async fn authorize(&self, token: &str) -> AuthResult<User> {
        let user_id = self
            .issuer
            .validate(token)
            .map_err(|_| AuthError::Unauthorized)?;

        match self.repo.find_by_id(&user_id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!(user_id = %user_id, "Token subject no longer exists");
                Err(AuthError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::value_object::{
        user_id::UserId,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use crate::infra::memory::InMemoryUserRepository;

    fn setup() -> (Arc<InMemoryUserRepository>, Arc<TokenIssuer>) {
        let issuer = TokenIssuer::new(&AuthConfig::with_random_secret()).unwrap();
        (Arc::new(InMemoryUserRepository::new()), Arc::new(issuer))
    }

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
    async fn test_authorize_live_user() {
        let (repo, issuer) = setup();
        let stored = repo.insert(&user("alice")).await.unwrap();
        let token = issuer.issue(&stored.user_id).unwrap().token;

        let gate = SessionGate::new(repo, issuer);
        let resolved = gate.authorize(&token).await.unwrap();
        assert_eq!(resolved.user_id, stored.user_id);
        assert_eq!(resolved.user_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_deleted_user_is_revoked() {
        let (repo, issuer) = setup();
        let stored = repo.insert(&user("bob")).await.unwrap();
        let token = issuer.issue(&stored.user_id).unwrap().token;

        repo.delete(&stored.user_id).await.unwrap();

        let gate = SessionGate::new(repo, issuer.clone());
        assert!(matches!(
            gate.authorize(&token).await,
            Err(AuthError::Unauthorized)
        ));
        // The token itself is still cryptographically valid
        assert_eq!(issuer.validate(&token).unwrap(), stored.user_id);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let (repo, issuer) = setup();
        let gate = SessionGate::new(repo, issuer);

        assert!(matches!(
            gate.authorize("garbage").await,
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthorized() {
        let (repo, issuer) = setup();
        let token = issuer.issue(&UserId::new()).unwrap().token;
        let gate = SessionGate::new(repo, issuer);

        assert!(matches!(
            gate.authorize(&token).await,
            Err(AuthError::Unauthorized)
        ));
    }
}
