//! Session Tokens
//!
//! Signed bearer tokens (JWT, HS256) carrying a user's ID.
//!
//! The token is stateless: validation only checks signature, structure and
//! expiry. Whether the subject still exists is the session gate's job.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// A freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates session tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.token_secret.is_empty() {
            return Err(AuthError::Internal(
                "Token signing secret is not configured".to_string(),
            ));
        }
        let ttl = Duration::from_std(config.token_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))?;
        if ttl <= Duration::zero() {
            return Err(AuthError::Internal("Token TTL must be positive".to_string()));
        }
        if Utc::now().checked_add_signed(ttl).is_none() {
            return Err(AuthError::Internal(
                "Token TTL exceeds the representable date range".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            ttl,
        })
    }

    /// Issue a token for `subject`, valid from now
    pub fn issue(&self, subject: &UserId) -> AuthResult<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(&self, subject: &UserId, issued_at: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let expires_at = issued_at.checked_add_signed(self.ttl).ok_or_else(|| {
            AuthError::Internal("Token expiry exceeds the representable date range".to_string())
        })?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return its subject
    ///
    /// Any failure (bad signature, malformed, expired, bad subject) is
    /// reported as `InvalidToken`.
    pub fn validate(&self, token: &str) -> AuthResult<UserId> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token validation failed");
            AuthError::InvalidToken
        })?;

        // Reject at the exact expiry second too
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::InvalidToken);
        }

        UserId::from_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig::with_random_secret()).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let issuer = issuer();
        let user_id = UserId::new();

        let issued = issuer.issue(&user_id).unwrap();
        assert_eq!(issuer.validate(&issued.token).unwrap(), user_id);

        let remaining = issued.expires_at - Utc::now();
        assert!(remaining > Duration::days(6));
        assert!(remaining <= Duration::days(7));
    }

    #[test]
    fn test_expired_token() {
        let issuer = issuer();
        let issued = issuer
            .issue_at(&UserId::new(), Utc::now() - Duration::days(8))
            .unwrap();

        assert!(matches!(
            issuer.validate(&issued.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issued = issuer().issue(&UserId::new()).unwrap();

        assert!(matches!(
            issuer().validate(&issued.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = issuer();
        let issued = issuer.issue(&UserId::new()).unwrap();

        // Flip the first signature character
        let sig_start = issued.token.rfind('.').unwrap() + 1;
        let first = issued.token.as_bytes()[sig_start];
        let mut tampered = issued.token.clone();
        tampered.replace_range(
            sig_start..sig_start + 1,
            if first == b'A' { "B" } else { "A" },
        );

        assert!(matches!(
            issuer.validate(&tampered),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            issuer.validate("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(issuer.validate(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let config = AuthConfig::with_random_secret();
        let issuer = TokenIssuer::new(&config).unwrap();
        let now = Utc::now();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&config.token_secret),
        )
        .unwrap();

        assert!(matches!(
            issuer.validate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(TokenIssuer::new(&AuthConfig::default()).is_err());
    }

    #[test]
    fn test_out_of_range_ttl_rejected() {
        let mut config = AuthConfig::with_random_secret();
        config.token_ttl = std::time::Duration::from_secs(100_000_000_000_000);

        assert!(matches!(
            TokenIssuer::new(&config),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let issuer = issuer();

        assert!(matches!(
            issuer.issue_at(&UserId::new(), DateTime::<Utc>::MAX_UTC),
            Err(AuthError::Internal(_))
        ));
    }
}
