/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::auth::jwks::HttpKeyProvider;

pub fn build_auth_service(config: &Config) -> anyhow::Result<Arc<AuthService>> {
    // The timeout lives on the client so every provider round-trip is bounded.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.jwks_fetch_timeout_seconds))
        .build()
        .context("failed to build jwks http client")?;

    let provider = Arc::new(HttpKeyProvider::new(client, config.auth_jwks_url.clone()));

    Ok(Arc::new(AuthService::new(
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
        provider,
    )))
}
