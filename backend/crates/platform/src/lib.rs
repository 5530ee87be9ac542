//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Cryptographic utilities (CSPRNG, HMAC-SHA512)
//! - Salted password credentials (HMAC-SHA512, constant-time verification)
//! - Bearer token extraction from HTTP headers

pub mod bearer;
pub mod crypto;
pub mod password;
