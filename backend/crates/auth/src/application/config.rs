//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Minimum accepted length of the token signing secret
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Auth application configuration
///
/// Built once at startup and shared read-only.
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric key for HS256 token signatures
    pub token_secret: Vec<u8>,
    /// Session token lifetime (1 week)
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
        }
    }
}

impl AuthConfig {
    /// Create config with an explicit signing secret
    pub fn with_secret(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self::with_secret(platform::crypto::random_bytes(64))
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_week() {
        assert_eq!(AuthConfig::default().token_ttl.as_secs(), 604_800);
    }

    #[test]
    fn test_random_secret() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert!(a.token_secret.len() >= MIN_TOKEN_SECRET_LEN);
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AuthConfig::with_secret(b"super-secret-signing-key-material".to_vec());
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
