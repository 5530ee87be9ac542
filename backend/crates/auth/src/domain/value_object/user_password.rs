//! User Password Value Object
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] is user input, zeroized on drop
//! - [`UserPassword`] is the stored hash + salt pair
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("secret123".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&raw);
//! assert!(stored.verify(&raw));
//! ```

use platform::password::{ClearTextPassword, PasswordCredential};
use std::fmt;

use crate::error::AuthResult;

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Fails with `InvalidInput` for empty or whitespace-only input
    pub fn new(raw: String) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password verifier (64-byte hash, 128-byte salt)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(PasswordCredential);

impl UserPassword {
    /// Hash with a fresh salt
    pub fn from_raw(raw: &RawPassword) -> Self {
        Self(PasswordCredential::derive(&raw.0))
    }

    /// Restore from database columns
    ///
    /// Fails with `CorruptRecord` when either column has the wrong length.
    pub fn from_db(hash: &[u8], salt: &[u8]) -> AuthResult<Self> {
        Ok(Self(PasswordCredential::from_parts(hash, salt)?))
    }

    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }

    pub fn hash(&self) -> &[u8] {
        self.0.hash()
    }

    pub fn salt(&self) -> &[u8] {
        self.0.salt()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
