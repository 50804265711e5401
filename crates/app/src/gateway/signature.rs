//! Settlement callback signature verification.
//!
//! The processor signs `"{order_id}|{payment_id}"` with HMAC-SHA256 under the
//! shared key secret and sends the hex digest alongside the callback.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::secrets::SecretString;

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected hex signature for an order/payment pair.
#[must_use]
pub fn sign_payment(secret: &SecretString, order_id: &str, payment_id: &str) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose().as_bytes()) else {
        return String::new();
    };

    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Verify a supplied hex signature in constant time.
#[must_use]
pub fn verify_payment_signature(
    secret: &SecretString,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(supplied) = hex::decode(signature.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose().as_bytes()) else {
        return false;
    };

    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    mac.verify_slice(&supplied).is_ok()
}
