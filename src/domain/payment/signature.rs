//! Gateway callback signature verification.
//!
//! The gateway signs its payment callback with HMAC-SHA256 over
//! `"{order_id}|{payment_id}"` using the shared key secret and sends the
//! hex-encoded MAC. Verification recomputes the MAC and compares it in
//! constant time; any HMAC-based gateway can be substituted.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::PaymentFlowError;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for signed payment callbacks.
#[derive(Clone)]
pub struct SignatureVerifier {
    /// Shared key secret issued by the gateway.
    secret: SecretString,
}

impl SignatureVerifier {
    /// Creates a new verifier with the given key secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies a callback signature.
    ///
    /// # Verification Steps
    ///
    /// 1. Decode the hex signature
    /// 2. Compute HMAC-SHA256 over `"{order_id}|{payment_id}"`
    /// 3. Compare MACs using constant-time comparison
    ///
    /// # Errors
    ///
    /// `SignatureMismatch` on malformed hex or a MAC that does not match.
    /// The two cases are deliberately indistinguishable to the caller.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), PaymentFlowError> {
        let provided = match hex::decode(signature) {
            Ok(bytes) => bytes,
            Err(_) => return Err(PaymentFlowError::SignatureMismatch),
        };

        let expected = self.compute(order_id, payment_id);

        if constant_time_compare(&expected, &provided) {
            Ok(())
        } else {
            Err(PaymentFlowError::SignatureMismatch)
        }
    }

    /// Computes the HMAC-SHA256 MAC for the given callback identifiers.
    fn compute(&self, order_id: &str, payment_id: &str) -> Vec<u8> {
        let signed_payload = format!("{}|{}", order_id, payment_id);

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the
/// expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a hex-encoded callback signature for use in test fixtures.
#[cfg(test)]
pub fn sign_callback(secret: &str, order_id: &str, payment_id: &str) -> String {
    let signed_payload = format!("{}|{}", order_id, payment_id);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(signed_payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
