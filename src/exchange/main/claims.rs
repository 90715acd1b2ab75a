use crate::exchange::types::DisplayClaims;
use crate::utils::base64url_decode;

/// Decode the display claims from a JWT-style token payload.
///
/// Tolerant by design: a token without a readable payload segment simply
/// yields no display claims. The token is never inspected for authorization.
pub(super) fn decode_display_claims(token: &str) -> Option<DisplayClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64url_decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
