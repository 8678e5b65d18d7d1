//! Payment signature verification for the redirect-based gateway.
//!
//! The gateway reports a payment success back through the client, so the
//! client-supplied `(order_id, payment_id, signature)` triple is only trusted
//! after recomputing the HMAC-SHA256 of `"{order_id}|{payment_id}"` with the
//! shared gateway secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Invalid signature encoding")]
    InvalidEncoding,
    #[error("Signature mismatch")]
    Mismatch,
    #[error("Invalid secret key")]
    InvalidKey,
}

/// Computes the hex-encoded HMAC-SHA256 signature for a gateway order/payment pair.
pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::InvalidKey)?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a client-reported signature. Comparison happens inside the MAC
/// implementation, in constant time.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<(), SignatureError> {
    let expected = hex::decode(signature).map_err(|_| SignatureError::InvalidEncoding)?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SignatureError::InvalidKey)?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&expected).map_err(|_| SignatureError::Mismatch)
}
