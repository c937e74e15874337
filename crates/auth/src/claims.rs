use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use campusnav_core::UserId;

use crate::{Principal, Role};

/// Token claims model (transport-agnostic).
///
/// This is the minimal set of claims expected once a token has been
/// decoded/verified by whatever transport/security layer is in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Stored role name. Kept as a raw string: accounts may carry a missing or
    /// unrecognised role, which resolves to "no role".
    #[serde(default)]
    pub role: Option<String>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    /// Resolve the principal these claims describe.
    pub fn principal(&self) -> Principal {
        Principal::new(self.sub, self.role.as_deref().and_then(Role::parse))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding is
/// intentionally outside this crate.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(role: Option<&str>, issued_at: DateTime<Utc>, ttl: Duration) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            role: role.map(str::to_string),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    #[test]
    fn validates_time_window() {
        let now = Utc::now();
        assert_eq!(validate_claims(&claims(None, now, Duration::minutes(5)), now), Ok(()));
        assert_eq!(
            validate_claims(&claims(None, now, Duration::minutes(5)), now + Duration::minutes(5)),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(
            validate_claims(&claims(None, now + Duration::minutes(1), Duration::minutes(5)), now),
            Err(TokenValidationError::NotYetValid)
        );
        assert_eq!(
            validate_claims(&claims(None, now, Duration::zero()), now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn principal_resolution_drops_unknown_roles() {
        let now = Utc::now();
        let c = claims(Some("organizer"), now, Duration::minutes(5));
        assert_eq!(c.principal().role, Some(Role::Organizer));
        assert_eq!(c.principal().id, c.sub);

        assert_eq!(claims(Some("user"), now, Duration::minutes(5)).principal().role, None);
        assert_eq!(claims(None, now, Duration::minutes(5)).principal().role, None);
    }

    #[test]
    fn role_claim_is_optional_in_json() {
        let json = serde_json::json!({
            "sub": UserId::new(),
            "issued_at": "2026-01-01T00:00:00Z",
            "expires_at": "2026-01-01T01:00:00Z",
        });
        let c: JwtClaims = serde_json::from_value(json).unwrap();
        assert_eq!(c.role, None);
    }
}
