//! Revoked token tracking.
//!
//! Access tokens are stateless, so logging out records the token's JWT ID
//! here until the token would have expired anyway.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::{AuthError, AuthResult, Claims};

/// In-memory set of revoked JWT IDs.
#[derive(Debug, Default)]
pub struct RevokedTokens {
    tokens: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl RevokedTokens {
    /// Creates an empty revocation list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes the token the claims were decoded from.
    pub fn revoke(&self, claims: &Claims) -> AuthResult<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|e| AuthError::Other(format!("Lock poisoned: {}", e)))?;
        tokens.insert(claims.jti.clone(), claims.expires_at());
        tracing::debug!(jti = %claims.jti, "Token revoked");
        Ok(())
    }

    /// Returns true if the token has been revoked.
    pub fn is_revoked(&self, claims: &Claims) -> AuthResult<bool> {
        let tokens = self
            .tokens
            .read()
            .map_err(|e| AuthError::Other(format!("Lock poisoned: {}", e)))?;
        Ok(tokens.contains_key(&claims.jti))
    }

    /// Drops entries whose tokens have expired.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> AuthResult<usize> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|e| AuthError::Other(format!("Lock poisoned: {}", e)))?;
        let before_count = tokens.len();
        let now = Utc::now();
        tokens.retain(|_, expires_at| *expires_at > now);
        Ok(before_count - tokens.len())
    }
}

#[cfg(test)]
mod tests {
    use entities::{User, UserRole};

    use super::*;
    use crate::DEFAULT_JWT_ISSUER;

    fn claims(expiration_hours: u64) -> Claims {
        let user = User::new("Alex Johnson", "student@example.com", UserRole::Student);
        Claims::new(&user, expiration_hours, DEFAULT_JWT_ISSUER).unwrap()
    }

    #[test]
    fn test_revoke() {
        let revoked = RevokedTokens::new();
        let a = claims(1);
        let b = claims(1);

        revoked.revoke(&a).unwrap();

        assert!(revoked.is_revoked(&a).unwrap());
        assert!(!revoked.is_revoked(&b).unwrap());
        assert_eq!(revoked.cleanup_expired().unwrap(), 0);
    }

    #[test]
    fn test_cleanup_expired() {
        let revoked = RevokedTokens::new();
        let mut expired = claims(1);
        expired.exp = Utc::now().timestamp() - 60;
        let live = claims(1);

        revoked.revoke(&expired).unwrap();
        revoked.revoke(&live).unwrap();

        assert_eq!(revoked.cleanup_expired().unwrap(), 1);
        assert!(revoked.is_revoked(&live).unwrap());
        assert!(!revoked.is_revoked(&expired).unwrap());
        assert_eq!(revoked.cleanup_expired().unwrap(), 0);
    }
}
