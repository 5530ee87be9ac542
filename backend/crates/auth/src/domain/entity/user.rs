//! User Entity
//!
//! Account record: profile fields plus the stored password verifier.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Stable identity, assigned at registration
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique, case-sensitive login handle
    pub user_name: UserName,
    pub email: String,
    /// Hash + salt, never a clear text password
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    ///
    /// A caller-supplied identity is kept; otherwise a fresh one is assigned.
    pub fn new(
        user_id: Option<UserId>,
        user_name: UserName,
        first_name: String,
        last_name: String,
        email: String,
        password: UserPassword,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.unwrap_or_default(),
            first_name,
            last_name,
            user_name,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.updated_at = Utc::now();
    }

    pub fn set_first_name(&mut self, first_name: String) {
        self.first_name = first_name;
        self.updated_at = Utc::now();
    }

    pub fn set_last_name(&mut self, last_name: String) {
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }

    /// Replace hash and salt together
    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }
}
