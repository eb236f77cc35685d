//! Permission gate: exact set membership over verified claims.
//!
//! A token with no permissions claim at all is told apart from one whose set
//! lacks the specific entry. No wildcard, hierarchy, or prefix matching.

use super::error::AuthError;
use super::verifier::VerifiedClaims;

pub fn check_permission(claims: &VerifiedClaims, required: &str) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if permissions.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied {
            required: required.to_string(),
        })
    }
}
