//! Bearer credential helpers
//!
//! Session tokens reach the API either as a cookie or as an
//! `Authorization: Bearer` header, and are persisted only as digests.

use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};

use crate::cookie::extract_cookie;

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme == "Bearer" && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// Locate the session token for a request.
///
/// The cookie wins; the `Authorization` header is only consulted when no
/// cookie is present.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    extract_cookie(headers, cookie_name).or_else(|| extract_bearer(headers))
}

/// SHA-256 digest used as the storage key for an opaque token
pub fn token_digest(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}
