/*!
 * Bearer-token authorization pipeline
 *
 * Responsibility:
 * - decode → resolve key → verify → permission gate の直列化
 * - 失敗種別は AuthError のまま上位へ (HTTP への集約はしない)
 *
 * Public API:
 * - AuthService
 * - AuthError, VerifiedClaims
 * - KeyProvider (tests から fake を注入するための seam)
 */

pub mod error;
pub mod factory;
pub mod jwks;
pub mod permissions;
pub mod token;
pub mod verifier;

use std::sync::Arc;

pub use error::AuthError;
pub use jwks::KeyProvider;
pub use verifier::VerifiedClaims;

use jwks::KeyResolver;
use verifier::Verifier;

/// Per-process authorization service: owns the key cache and the configured
/// claim validation. Cheap to share behind an `Arc`.
pub struct AuthService {
    keys: KeyResolver,
    verifier: Verifier,
}

impl AuthService {
    pub fn new(
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
        provider: Arc<dyn KeyProvider>,
    ) -> Self {
        Self {
            keys: KeyResolver::new(provider),
            verifier: Verifier::new(issuer, audience, leeway_seconds),
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Header parsing and token decoding happen before any key-provider
    /// round-trip, so malformed credentials never cause network traffic.
    /// A token header without a kid is malformed (we cannot even address a
    /// key for it).
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required: &str,
    ) -> Result<VerifiedClaims, AuthError> {
        let claims = self.verify_token(authorization).await?;
        permissions::check_permission(&claims, required)?;
        Ok(claims)
    }

    /// Decode + key resolution + signature/claims verification, without a
    /// permission requirement.
    pub async fn verify_token(
        &self,
        authorization: Option<&str>,
    ) -> Result<VerifiedClaims, AuthError> {
        let bearer = token::bearer_token(authorization)?;
        let untrusted = token::decode_untrusted(bearer)?;

        let kid = untrusted
            .header
            .kid
            .clone()
            .ok_or(AuthError::MalformedToken)?;
        let key = self.keys.resolve(&kid).await?;

        self.verifier.verify(&untrusted, &key)
    }
}
