//! Local access-token expiry inspection
//!
//! The client decodes the JWT payload segment without verifying the
//! signature. That is deliberate: the decoded expiry is only a hint used to
//! refresh proactively and skip a doomed round trip. The server remains the
//! authority and rejects genuinely invalid tokens with 401, so any token we
//! cannot decode is treated as already expired.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use serde::Deserialize;

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Decode the `exp` claim from a JWT without verifying the signature
pub fn decode_expiry(token: &str) -> Option<i64> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
        _ => return None,
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    Some(claims.exp)
}

/// Whether a token should be treated as expired.
///
/// Fail-closed: malformed tokens and tokens without a readable `exp` claim
/// count as expired, which routes them through a refresh before use.
pub fn is_expired(token: &str) -> bool {
    match decode_expiry(token) {
        Some(exp) => exp <= Utc::now().timestamp(),
        None => true,
    }
}
