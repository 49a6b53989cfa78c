// Session cookie middleware: stateless HMAC-SHA256 signed session ids.
//
// Token format: {timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The HMAC covers "{timestamp_secs}.{nonce_hex}" signed with
// TIDINGS_SESSION_SECRET. Tokens are valid for SESSION_TTL_SECS (24 hours).
// The verified token doubles as the key into the SessionStore.
//
// Every request passes through `with_session`:
//   valid tidings_session cookie → reuse it
//   missing / tampered / expired → mint a new token and set the cookie

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tracing::debug;

use super::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "tidings_session";

/// Session lifetime, matching how long the store keeps an idle session.
pub const SESSION_TTL_SECS: u64 = crate::session::SESSION_TTL.as_secs();

/// Id of the session a request belongs to, inserted by `with_session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

/// Build a new session token signed with `secret`.
pub fn create_token(secret: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let payload = format!("{timestamp}.{nonce}");
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token. Returns `true` if the HMAC is valid and the token
/// is not older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> bool {
    let parts: Vec<&str> = token.splitn(3, '.').collect();
    if parts.len() != 3 {
        return false;
    }
    let timestamp_str = parts[0];
    let nonce = parts[1];
    let provided_sig = parts[2];

    let payload = format!("{timestamp_str}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if !constant_time_eq(provided_sig, &expected_sig) {
        return false;
    }

    let Ok(timestamp) = timestamp_str.parse::<u64>() else {
        return false;
    };
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    now.saturating_sub(timestamp) < SESSION_TTL_SECS
}

/// Axum middleware: attach a SessionId to every request, starting a new
/// session when the cookie is missing or invalid.
pub async fn with_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let secret = &state.config.session_secret;

    let existing = session_cookie(&request).filter(|token| verify_token(secret, token));
    let (token, fresh) = match existing {
        Some(token) => (token, false),
        None => {
            debug!("Starting new session");
            (create_token(secret), true)
        }
    };

    request.extensions_mut().insert(SessionId(token.clone()));
    let mut response = next.run(request).await;

    if fresh {
        if let Ok(value) = HeaderValue::from_str(&set_cookie_header(&token)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Build the `Set-Cookie` header value for a session token.
pub fn set_cookie_header(token: &str) -> String {
    format!("{COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}")
}

// --- Private helpers ---

fn hmac_sign(secret: &str, payload: &str) -> String {
    // HMAC accepts keys of any length, so this never fails in practice
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() || a.is_empty() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Extract the raw session cookie value from the request, if present.
fn session_cookie(request: &Request) -> Option<String> {
    let cookie_header = request.headers().get(header::COOKIE)?.to_str().ok()?;

    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name.trim() == COOKIE_NAME).then(|| value.trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let secret = "test_secret_32_bytes_long_enough!";
        let token = create_token(secret);
        assert!(verify_token(secret, &token));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("correct_secret");
        assert!(!verify_token("wrong_secret", &token));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(create_token("s"), create_token("s"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "my_secret";
        let payload = format!("{}.{}", 1_000, "00ff");
        let token = format!("{payload}.{}", hmac_sign(secret, &payload));
        assert!(!verify_token(secret, &token));
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(!verify_token("secret", "not.a.valid.token.format"));
        assert!(!verify_token("secret", ""));
        assert!(!verify_token("secret", "onlytwoparts.here"));
    }

    #[test]
    fn test_cookie_header_format() {
        let header = set_cookie_header("abc");
        assert!(header.starts_with("tidings_session=abc;"));
        assert!(header.contains("HttpOnly"));
    }
}
