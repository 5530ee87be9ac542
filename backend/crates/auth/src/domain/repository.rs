//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer. Every call commits on its own; a successful write is visible to the
//! next read.

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User store
///
/// Implementations must enforce user name uniqueness themselves and report a
/// violation as `AuthError::UserNameTaken`, so concurrent registrations cannot
/// both succeed.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by exact user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Insert a new user and return the committed record
    async fn insert(&self, user: &User) -> AuthResult<User>;

    /// Overwrite an existing user; `UserNotFound` if the ID is absent
    async fn update(&self, user: &User) -> AuthResult<User>;

    /// Delete a user; deleting an absent ID is not an error
    async fn delete(&self, user_id: &UserId) -> AuthResult<()>;
}
