/*
 * Responsibility
 * - 認可パイプラインが上位に伝える失敗の種別
 * - 種別はここで潰さない (HTTP status への集約は error.rs 側)
 */
use thiserror::Error;

/// Every way a request can fail authorization, kept precise end-to-end.
///
/// The pipeline short-circuits on the first failure; the kind is preserved so
/// callers (and tests) can tell exactly which stage rejected the request.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header missing or malformed")]
    MalformedHeader,

    #[error("token is not a well-formed signed token")]
    MalformedToken,

    #[error("no usable signing key for kid '{kid}'")]
    KeyNotFound { kid: String },

    #[error("signing key provider unavailable")]
    KeyProviderUnavailable,

    #[error("token signature verification failed")]
    InvalidSignature,

    #[error("token algorithm does not match the signing key")]
    AlgorithmMismatch,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token issuer")]
    InvalidIssuer,

    #[error("invalid token audience")]
    InvalidAudience,

    #[error("token carries no permissions claim")]
    PermissionsClaimMissing,

    #[error("permission '{required}' not granted")]
    PermissionDenied { required: String },
}
