//! Password Credentials
//!
//! Salted password verifiers built on HMAC-SHA512:
//! - A fresh 128-byte salt from the OS CSPRNG for every derivation
//! - The salt is the MAC key, the UTF-8 password bytes are the message
//! - Verification recomputes the MAC and compares in constant time
//! - Clear text is zeroized on drop and redacted from `Debug`
//!
//! Stored records must carry exactly [`HASH_LEN`] hash bytes and
//! [`SALT_LEN`] salt bytes; anything else is reported as corruption.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{HMAC_SHA512_LEN, hmac_sha512, random_array, verify_hmac_sha512};

/// Length of a stored password hash in bytes
pub const HASH_LEN: usize = HMAC_SHA512_LEN;

/// Length of a stored password salt in bytes
pub const SALT_LEN: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// Password is empty or whitespace only
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Stored hash has the wrong length
    #[error("Invalid length of password hash ({expected} bytes expected, got {actual})")]
    InvalidHashLength { expected: usize, actual: usize },

    /// Stored salt has the wrong length
    #[error("Invalid length of password salt ({expected} bytes expected, got {actual})")]
    InvalidSaltLength { expected: usize, actual: usize },
}

impl PasswordError {
    /// True when the error comes from a stored record rather than user input
    pub fn is_corrupt_record(&self) -> bool {
        matches!(
            self,
            PasswordError::InvalidHashLength { .. } | PasswordError::InvalidSaltLength { .. }
        )
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`. The bytes are hashed exactly as given
/// (no trimming, no Unicode normalization).
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// assert!(ClearTextPassword::new("secret123".to_string()).is_ok());
/// assert!(ClearTextPassword::new("   ".to_string()).is_err());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Rejects empty and whitespace-only input
    pub fn new(raw: String) -> Result<Self, PasswordError> {
        if raw.trim().is_empty() {
            return Err(PasswordError::EmptyOrWhitespace);
        }
        Ok(Self(raw))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Credential (Safe to store)
// ============================================================================

/// Hash and salt pair for a single user
///
/// The fixed-size arrays make a wrong-length credential unrepresentable once
/// constructed; [`PasswordCredential::from_parts`] is the only way in from
/// storage.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential {
    hash: [u8; HASH_LEN],
    salt: [u8; SALT_LEN],
}

impl PasswordCredential {
    /// Derive a new credential with a fresh random salt
    pub fn derive(password: &ClearTextPassword) -> Self {
        let salt: [u8; SALT_LEN] = random_array();
        let hash = hmac_sha512(&salt, password.as_bytes());
        Self { hash, salt }
    }

    /// Rebuild a credential from stored bytes
    pub fn from_parts(hash: &[u8], salt: &[u8]) -> Result<Self, PasswordError> {
        let hash: [u8; HASH_LEN] = hash.try_into().map_err(|_| PasswordError::InvalidHashLength {
            expected: HASH_LEN,
            actual: hash.len(),
        })?;
        let salt: [u8; SALT_LEN] = salt.try_into().map_err(|_| PasswordError::InvalidSaltLength {
            expected: SALT_LEN,
            actual: salt.len(),
        })?;
        Ok(Self { hash, salt })
    }

    /// Check a password against this credential (constant-time comparison)
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        verify_hmac_sha512(&self.salt, password.as_bytes(), &self.hash)
    }

    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredential")
            .field("hash", &"[HASH]")
            .field("salt", &"[SALT]")
            .finish()
    }
}

/// Derive a `(hash, salt)` pair from a clear text password
pub fn derive_password_hash(password: &str) -> Result<PasswordCredential, PasswordError> {
    let password = ClearTextPassword::new(password.to_owned())?;
    Ok(PasswordCredential::derive(&password))
}

/// Verify a clear text password against stored hash and salt bytes
///
/// The password is validated before the stored record, so an empty password
/// is always reported as such even when the record is also damaged.
pub fn verify_password_hash(
    password: &str,
    stored_hash: &[u8],
    stored_salt: &[u8],
) -> Result<bool, PasswordError> {
    let password = ClearTextPassword::new(password.to_owned())?;
    let credential = PasswordCredential::from_parts(stored_hash, stored_salt)?;
    Ok(credential.verify(&password))
}
