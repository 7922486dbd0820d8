//! Password digest value object.
//!
//! Accounts never store raw passwords; they store a salted SHA-256 digest
//! in `{salt}${hex}` form. Verification recomputes the digest and compares
//! it in constant time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Salted password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digests a password with a fresh random salt.
    pub fn create(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self(format!("{}${}", salt, Self::digest(&salt, password)))
    }

    /// Wraps an already-stored digest string.
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Returns the storable representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verifies a password against this digest, constant-time.
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt, expected)) = self.0.split_once('$') else {
            return false;
        };
        let computed = Self::digest(salt, password);
        if computed.len() != expected.len() {
            return false;
        }
        computed.as_bytes().ct_eq(expected.as_bytes()).into()
    }

    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(b"$");
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}
