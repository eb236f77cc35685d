//! Permission-gated access: one declarative table, one gate.
//!
//! Every protected route appears in `ROUTE_PERMISSIONS`; a single middleware
//! looks up the matched route pattern + method and runs the authorization
//! pipeline with the required permission. Routes without an entry are public
//! and skip token handling entirely (no header parsing, no key fetch).
//!
//! On success the verified context is inserted into request extensions for
//! the `AuthCtx` extractor.

use axum::{
    Router,
    body::Body,
    extract::{MatchedPath, State},
    http::{Method, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::ApiError;
use crate::state::AppState;

/// (verb, route pattern) → required permission. Patterns are the route
/// templates as registered in `api::routes`.
const ROUTE_PERMISSIONS: &[(Method, &str, &str)] = &[
    (Method::GET, "/drinks-detail", "get:drinks-detail"),
    (Method::POST, "/drinks/create", "post:drinks"),
    (Method::PATCH, "/drinks/{drink_id}", "patch:drinks"),
    (Method::DELETE, "/drinks/{drink_id}", "delete:drinks"),
];

fn required_permission(method: &Method, route: &str) -> Option<&'static str> {
    ROUTE_PERMISSIONS
        .iter()
        .find(|(m, pattern, _)| m == method && *pattern == route)
        .map(|(_, _, permission)| *permission)
}

/// Apply the gate to the whole router. Lookup is per-request; public routes
/// pass through untouched.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // MatchedPath is absent for unmatched requests; those fall through to the
    // router's own 404 handling.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    let Some(required) = route
        .as_deref()
        .and_then(|route| required_permission(req.method(), route))
    else {
        return Ok(next.run(req).await);
    };

    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = match state.auth.authorize(authorization, required).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = ?err, required, "authorization failed");
            return Err(ApiError::Auth(err));
        }
    };

    let ctx = AuthCtx::new(claims.sub, claims.permissions.unwrap_or_default());

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
