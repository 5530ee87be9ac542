//! Cryptographic Utilities

use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Output length of HMAC-SHA512 in bytes
pub const HMAC_SHA512_LEN: usize = 64;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Fill a fixed-size buffer from the OS CSPRNG
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Compute HMAC-SHA512 with a key of any length
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; HMAC_SHA512_LEN] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    let tag = mac.finalize().into_bytes();

    let mut out = [0u8; HMAC_SHA512_LEN];
    out.copy_from_slice(&tag);
    out
}

/// Verify an HMAC-SHA512 tag in constant time
///
/// Returns `false` for tags of the wrong length.
pub fn verify_hmac_sha512(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.verify_slice(tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));

        let a: [u8; 128] = random_array();
        let b: [u8; 128] = random_array();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hmac_sha512_rfc4231_case_2() {
        let tag = hmac_sha512(b"Jefe", b"what do ya want for nothing?");
        let expected = hex::decode(
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737",
        )
        .unwrap();
        assert_eq!(tag.to_vec(), expected);
    }

    #[test]
    fn test_verify_hmac_sha512() {
        let key = [7u8; 128];
        let tag = hmac_sha512(&key, b"message");

        assert!(verify_hmac_sha512(&key, b"message", &tag));
        assert!(!verify_hmac_sha512(&key, b"other", &tag));
        assert!(!verify_hmac_sha512(&key, b"message", &tag[..32]));
    }
}
