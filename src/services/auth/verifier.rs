//! Signature + standard-claim verification.
//!
//! Check order is fixed: algorithm agreement, signature, then exp/iss/aud.
//! The first failure aborts with its precise kind; an expired token with a
//! valid signature is always `TokenExpired`, never `InvalidSignature`.

use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use super::error::AuthError;
use super::token::UntrustedToken;

/// The only algorithm the provider signs with. The resolver already filters
/// keys to this algorithm; the header check below closes the substitution
/// hole on the token side.
pub const EXPECTED_ALG: Algorithm = Algorithm::EdDSA;
const EXPECTED_ALG_NAME: &str = "EdDSA";

/// Claims of a token whose signature and standard claims checked out.
/// Exists per request only; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedClaims {
    pub iss: String,

    /// String or array; audience agreement is enforced during validation, so
    /// the raw shape is kept as-is.
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    /// Absent claim stays `None`; the permission gate tells the two cases
    /// apart.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

pub struct Verifier {
    validation: Validation,
}

impl Verifier {
    pub fn new(issuer: &str, audience: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(EXPECTED_ALG);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Self { validation }
    }

    /// Verify the signature over the original serialization and validate
    /// exp / iss / aud.
    pub fn verify(
        &self,
        token: &UntrustedToken<'_>,
        key: &Jwk,
    ) -> Result<VerifiedClaims, AuthError> {
        if token.header.alg != EXPECTED_ALG_NAME {
            return Err(AuthError::AlgorithmMismatch);
        }

        // The resolver only returns Ed25519 keys, so a key that fails to
        // convert means the provider published broken material.
        let decoding_key =
            DecodingKey::from_jwk(key).map_err(|_| AuthError::KeyProviderUnavailable)?;

        let data = jsonwebtoken::decode::<VerifiedClaims>(token.raw, &decoding_key, &self.validation)
            .map_err(map_jwt_error)?;

        Ok(data.claims)
    }
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        ErrorKind::InvalidAudience => AuthError::InvalidAudience,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::AlgorithmMismatch,
        ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
        ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => AuthError::MalformedToken,
        ErrorKind::InvalidToken => AuthError::MalformedToken,
        _ => AuthError::InvalidSignature,
    }
}
