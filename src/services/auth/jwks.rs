//! Signing-key resolution against the provider's published key set.
//!
//! Responsibility:
//! - Fetch the JWKS document over HTTP with a bounded timeout.
//! - Cache it for the process lifetime; a kid miss triggers one re-fetch.
//! - Hand out only keys usable for the expected signature algorithm.
//!
//! The provider sits behind a trait so tests can inject a fake instead of a
//! live endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::{AlgorithmParameters, EllipticCurve, Jwk, JwkSet, KeyAlgorithm};
use tokio::sync::RwLock;
use url::Url;

use super::error::AuthError;

/// Source of the provider's key-set document.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    async fn fetch_keys(&self) -> Result<JwkSet, AuthError>;
}

/// Production provider: GET the configured JWKS endpoint.
///
/// The client is expected to carry the fetch timeout (see the auth factory),
/// so the round-trip here is the only bounded suspension point of the
/// authorization pipeline.
pub struct HttpKeyProvider {
    client: reqwest::Client,
    jwks_url: Url,
}

impl HttpKeyProvider {
    pub fn new(client: reqwest::Client, jwks_url: Url) -> Self {
        Self { client, jwks_url }
    }
}

#[async_trait]
impl KeyProvider for HttpKeyProvider {
    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::warn!(error = %e, "jwks fetch failed");
                AuthError::KeyProviderUnavailable
            })?;

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::warn!(error = %e, "jwks document malformed");
            AuthError::KeyProviderUnavailable
        })
    }
}

/// Process-wide signing-key cache.
///
/// Populated lazily on first use and reused across requests. A kid absent
/// from the cached set causes exactly one re-fetch; still absent afterwards
/// is `KeyNotFound` (distinct from the provider being unreachable).
///
/// Concurrency: the lock is never held across the provider round-trip, so
/// two requests racing on a cold cache may both fetch. Last write wins.
pub struct KeyResolver {
    provider: Arc<dyn KeyProvider>,
    cached: RwLock<Option<Arc<JwkSet>>>,
}

impl KeyResolver {
    pub fn new(provider: Arc<dyn KeyProvider>) -> Self {
        Self {
            provider,
            cached: RwLock::new(None),
        }
    }

    /// Return the signing key for `kid`, fetching the key set if needed.
    pub async fn resolve(&self, kid: &str) -> Result<Jwk, AuthError> {
        let cached = self.cached.read().await.as_ref().cloned();
        if let Some(set) = cached {
            if let Some(key) = candidate(&set, kid) {
                return Ok(key.clone());
            }
        }

        let fresh = Arc::new(self.provider.fetch_keys().await?);
        *self.cached.write().await = Some(fresh.clone());

        candidate(&fresh, kid)
            .cloned()
            .ok_or_else(|| AuthError::KeyNotFound {
                kid: kid.to_string(),
            })
    }
}

/// Keys of any other type/algorithm are ignored, not errors.
fn candidate<'a>(set: &'a JwkSet, kid: &str) -> Option<&'a Jwk> {
    set.keys
        .iter()
        .find(|jwk| jwk.common.key_id.as_deref() == Some(kid) && usable_for_eddsa(jwk))
}

fn usable_for_eddsa(jwk: &Jwk) -> bool {
    if let Some(alg) = &jwk.common.key_algorithm {
        if !matches!(alg, KeyAlgorithm::EdDSA) {
            return false;
        }
    }

    match &jwk.algorithm {
        AlgorithmParameters::OctetKeyPair(params) => {
            matches!(params.curve, EllipticCurve::Ed25519)
        }
        _ => false,
    }
}
