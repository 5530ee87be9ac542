//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    /// Pre-assigned identity; a fresh one is generated when `None`
    pub user_id: Option<UserId>,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let raw_password = RawPassword::new(input.password)?;

        let user_name = UserName::new(input.user_name)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        // Friendly early answer; the store's unique constraint is authoritative
        if self.repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken(user_name.into()));
        }

        let user = User::new(
            input.user_id,
            user_name,
            input.first_name,
            input.last_name,
            input.email,
            UserPassword::from_raw(&raw_password),
        );

        let user = self.repo.insert(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(user)
    }
}
