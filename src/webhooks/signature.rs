//! # Webhook Signature Verification
//!
//! HMAC-SHA256 verification of GitHub webhook bodies with constant-time
//! comparison to prevent timing attacks.

use axum::http::StatusCode;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur during webhook signature verification
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Missing required signature header: X-Hub-Signature-256")]
    MissingSignature,

    #[error("Invalid signature format: {reason}")]
    InvalidFormat { reason: String },

    #[error("Signature verification failed")]
    VerificationFailed,
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        ApiError::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
    }
}

/// Verifies a GitHub webhook delivery against the configured shared secret.
///
/// With no secret configured, every delivery is accepted; this is a
/// documented opt-out, not a fallback. With a secret configured, the
/// `X-Hub-Signature-256` header must carry
/// `"sha256=" + hex(HMAC-SHA256(secret, body))`.
pub fn verify_github_signature(
    secret: Option<&str>,
    signature_header: Option<&str>,
    body: &[u8],
) -> Result<(), SignatureError> {
    let Some(secret) = secret else {
        return Ok(());
    };

    let signature_header = signature_header
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingSignature)?;

    debug!(
        body_size = body.len(),
        "Starting GitHub signature verification"
    );

    let expected_hex = signature_header.strip_prefix("sha256=").ok_or_else(|| {
        SignatureError::InvalidFormat {
            reason: "X-Hub-Signature-256 must start with 'sha256='".to_string(),
        }
    })?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::VerificationFailed)?;
    mac.update(body);
    let expected_bytes = mac.finalize().into_bytes();

    let provided_bytes =
        hex::decode(expected_hex).map_err(|_| SignatureError::InvalidFormat {
            reason: "X-Hub-Signature-256 contains invalid hex".to_string(),
        })?;

    // Constant-time comparison to prevent timing attacks
    let expected_bytes_array: &[u8] = expected_bytes.as_ref();
    if subtle::ConstantTimeEq::ct_eq(expected_bytes_array, &provided_bytes[..]).into() {
        Ok(())
    } else {
        Err(SignatureError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn accepts_everything_without_a_secret() {
        assert!(verify_github_signature(None, None, b"{}").is_ok());
        assert!(verify_github_signature(None, Some("sha256=junk"), b"{}").is_ok());
    }

    #[test]
    fn rejects_missing_header_when_secret_configured() {
        let result = verify_github_signature(Some("s3cret"), None, b"{}");
        assert!(matches!(result, Err(SignatureError::MissingSignature)));
    }

    #[test]
    fn accepts_valid_signature() {
        let body = br#"{"action":"opened"}"#;
        let header = sign("s3cret", body);
        assert!(verify_github_signature(Some("s3cret"), Some(&header), body).is_ok());
    }

    #[test]
    fn rejects_wrong_secret() {
        let body = br#"{"action":"opened"}"#;
        let header = sign("other", body);
        let result = verify_github_signature(Some("s3cret"), Some(&header), body);
        assert!(matches!(result, Err(SignatureError::VerificationFailed)));
    }

    #[test]
    fn rejects_malformed_header() {
        let result = verify_github_signature(Some("s3cret"), Some("md5=abc"), b"{}");
        assert!(matches!(result, Err(SignatureError::InvalidFormat { .. })));

        let result = verify_github_signature(Some("s3cret"), Some("sha256=not-hex"), b"{}");
        assert!(matches!(result, Err(SignatureError::InvalidFormat { .. })));
    }
}
