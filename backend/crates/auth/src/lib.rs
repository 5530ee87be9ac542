//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token issuer, session gate
//! - `infra/` - PostgreSQL and in-memory user stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with username + password
//! - Username / password authentication returning a bearer token
//! - Profile update (partial) and idempotent account deletion
//! - Bearer-protected user routes
//!
//! ## Security Model
//! - Passwords hashed with HMAC-SHA512 keyed by a 128-byte per-user salt,
//!   verified in constant time
//! - Stateless JWT (HS256) tokens, 7 day lifetime
//! - Every protected request re-checks that the token's user still exists,
//!   so deleting an account revokes its tokens
//! - Unknown user and wrong password are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::User;
    pub use crate::domain::value_object::{
        user_id::UserId,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryUserRepository as MemoryStore;
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}
