//! Anti-forgery tokens for HTML forms
//!
//! Tokens are stateless: `base64url(nonce ‖ issued_at) "." hex(sha256(secret ‖ payload))`.
//! Nothing is stored server-side, so any process sharing the secret can
//! verify a token another one issued.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{thread_rng, RngCore};
use sha2::{Digest, Sha256};
use std::time::Duration;
use thiserror::Error;

/// Name of the hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";

const NONCE_LEN: usize = 16;
const PAYLOAD_LEN: usize = NONCE_LEN + 8;

/// Why a submitted token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CsrfError {
    #[error("The form is missing its security token.")]
    Missing,
    #[error("The form security token is malformed.")]
    Malformed,
    #[error("The form security token is invalid.")]
    BadSignature,
    #[error("The form has expired. Please submit it again.")]
    Expired,
    #[error("The form security token is not valid yet.")]
    IssuedInFuture,
}

/// Issues and verifies form tokens
#[derive(Clone)]
pub struct FormSigner {
    secret: Vec<u8>,
    lifetime: Duration,
}

impl std::fmt::Debug for FormSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSigner")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl FormSigner {
    pub fn new(secret: impl AsRef<[u8]>, lifetime: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a fresh token
    pub fn issue(&self) -> String {
        self.issue_at(now())
    }

    /// Verify a submitted token
    pub fn verify(&self, token: &str) -> Result<(), CsrfError> {
        self.verify_at(token, now())
    }

    fn issue_at(&self, issued_at: i64) -> String {
        let mut payload = [0u8; PAYLOAD_LEN];
        thread_rng().fill_bytes(&mut payload[..NONCE_LEN]);
        payload[NONCE_LEN..].copy_from_slice(&issued_at.to_be_bytes());

        format!("{}.{}", URL_SAFE_NO_PAD.encode(payload), self.sign(&payload))
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<(), CsrfError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CsrfError::Missing);
        }

        let (encoded, signature) = token.split_once('.').ok_or(CsrfError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| CsrfError::Malformed)?;
        if payload.len() != PAYLOAD_LEN {
            return Err(CsrfError::Malformed);
        }

        let expected = self.sign(&payload);
        if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            return Err(CsrfError::BadSignature);
        }

        let mut issued_bytes = [0u8; 8];
        issued_bytes.copy_from_slice(&payload[NONCE_LEN..]);
        let issued_at = i64::from_be_bytes(issued_bytes);

        if issued_at > now {
            return Err(CsrfError::IssuedInFuture);
        }
        let lifetime = i64::try_from(self.lifetime.as_secs()).unwrap_or(i64::MAX);
        if now - issued_at > lifetime {
            return Err(CsrfError::Expired);
        }

        Ok(())
    }

    fn sign(&self, payload: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(payload);
        hex::encode(hasher.finalize())
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
