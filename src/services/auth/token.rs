//! Bearer extraction + untrusted token decoding.
//!
//! Nothing here establishes cryptographic trust: the output is a structured
//! candidate whose segments merely decoded cleanly. Signature and claim
//! checks happen in `verifier`.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use super::error::AuthError;

/// Case-sensitive scheme literal. `bearer` / `Bear` / etc. are rejected.
const BEARER_SCHEME: &str = "Bearer";

/// Decoded-but-unverified JOSE header.
#[derive(Debug, Clone, Deserialize)]
pub struct UntrustedHeader {
    pub alg: String,

    #[serde(default)]
    pub kid: Option<String>,

    #[serde(default)]
    pub typ: Option<String>,
}

/// A compact token split into its three segments, with header and payload
/// decoded. `raw` is kept because signature verification runs over the
/// original serialization, not the decoded parts.
#[derive(Debug, Clone)]
pub struct UntrustedToken<'a> {
    pub raw: &'a str,
    pub header: UntrustedHeader,
    pub claims: serde_json::Value,
}

/// Extract the token value from an `Authorization` header value.
///
/// The header must be exactly two space-separated parts: the `Bearer` scheme
/// and a single non-empty token.
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AuthError> {
    let value = header_value.ok_or(AuthError::MalformedHeader)?;

    let mut parts = value.split(' ');
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(AuthError::MalformedHeader),
    };

    if scheme != BEARER_SCHEME || token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}

/// Split a bearer token into header / payload / signature and decode the
/// first two as unpadded base64url JSON.
pub fn decode_untrusted(raw: &str) -> Result<UntrustedToken<'_>, AuthError> {
    let mut segments = raw.split('.');
    let (header_b64, payload_b64) = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(header), Some(payload), Some(_signature), None) => (header, payload),
        _ => return Err(AuthError::MalformedToken),
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| AuthError::MalformedToken)?;
    let header: UntrustedHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| AuthError::MalformedToken)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| AuthError::MalformedToken)?;
    let claims: serde_json::Value =
        serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::MalformedToken)?;

    Ok(UntrustedToken { raw, header, claims })
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;

    use super::*;

    fn b64(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    #[test]
    fn bearer_token_accepts_exact_scheme() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn bearer_token_rejects_missing_header() {
        assert!(matches!(bearer_token(None), Err(AuthError::MalformedHeader)));
    }

    #[test]
    fn bearer_token_rejects_wrong_scheme() {
        for value in ["Bear abc", "bearer abc", "Token abc"] {
            assert!(matches!(
                bearer_token(Some(value)),
                Err(AuthError::MalformedHeader)
            ));
        }
    }

    #[test]
    fn bearer_token_rejects_wrong_part_count() {
        for value in ["Bearer", "Bearer a b", "Bearer  a", "Bearer "] {
            assert!(matches!(
                bearer_token(Some(value)),
                Err(AuthError::MalformedHeader)
            ));
        }
    }

    #[test]
    fn decode_rejects_wrong_segment_count() {
        for raw in ["a.b", "a.b.c.d", "abc"] {
            assert!(matches!(
                decode_untrusted(raw),
                Err(AuthError::MalformedToken)
            ));
        }
    }

    #[test]
    fn decode_rejects_bad_base64() {
        let raw = format!("{}.%%%.sig", b64(r#"{"alg":"EdDSA"}"#));
        assert!(matches!(
            decode_untrusted(&raw),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn decode_rejects_non_json_segments() {
        let raw = format!("{}.{}.sig", b64("not json"), b64("{}"));
        assert!(matches!(
            decode_untrusted(&raw),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn decode_extracts_header_fields() {
        let raw = format!(
            "{}.{}.sig",
            b64(r#"{"alg":"EdDSA","kid":"key-1","typ":"JWT"}"#),
            b64(r#"{"sub":"user-1"}"#)
        );
        let token = decode_untrusted(&raw).unwrap();
        assert_eq!(token.header.alg, "EdDSA");
        assert_eq!(token.header.kid.as_deref(), Some("key-1"));
        assert_eq!(token.claims["sub"], "user-1");
    }
}
