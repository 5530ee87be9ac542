//! Update User Use Case
//!
//! Partial profile update. Blank or missing fields leave the stored value
//! unchanged.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Update user input
#[derive(Default)]
pub struct UpdateUserInput {
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// Update user use case
pub struct UpdateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: UpdateUserInput) -> AuthResult<()> {
        let mut user = self
            .repo
            .find_by_id(&input.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(user_name) = non_blank(input.user_name) {
            if user_name != user.user_name.as_str() {
                let user_name = UserName::new(user_name)
                    .map_err(|e| AuthError::InvalidInput(e.to_string()))?;
                if self.repo.exists_by_user_name(&user_name).await? {
                    return Err(AuthError::UserNameTaken(user_name.into()));
                }
                user.set_user_name(user_name);
            }
        }

        if let Some(first_name) = non_blank(input.first_name) {
            user.set_first_name(first_name);
        }

        if let Some(last_name) = non_blank(input.last_name) {
            user.set_last_name(last_name);
        }

        if let Some(password) = non_blank(input.password) {
            let raw_password = RawPassword::new(password)?;
            user.set_password(UserPassword::from_raw(&raw_password));
        }

        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User updated");

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
