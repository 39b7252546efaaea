use chrono::{DateTime, Duration, FixedOffset, Utc};
use tracing::{debug, warn};

use crate::services::auth::error::TokenCreationError;
use crate::services::auth::jwt::{SessionClaims, SessionKeys, TOKEN_ISSUER};
use crate::services::identity::Identity;

/// Session lifetime. Fixed; not configurable.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// Mints session tokens, typically right after a successful login.
///
/// The expiration is computed in a fixed UTC offset so the same issuance
/// instant yields the same `exp` wherever the process runs.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    keys: SessionKeys,
    expiry_offset: FixedOffset,
}

impl TokenIssuer {
    pub fn new(keys: SessionKeys, expiry_offset: FixedOffset) -> Self {
        Self {
            keys,
            expiry_offset,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, TokenCreationError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<String, TokenCreationError> {
        // Same predicate as TokenValidator: a blank `sub` is malformed.
        if identity.login().trim().is_empty() {
            warn!("refusing to issue a session token without a subject");
            return Err(TokenCreationError::EmptySubject);
        }

        let expires_at = self.expires_at(now);

        debug!(
            sub = identity.login(),
            expires_at = %expires_at,
            "issuing session token"
        );

        let claims = SessionClaims {
            iss: TOKEN_ISSUER.to_string(),
            sub: identity.login().to_string(),
            exp: expires_at.timestamp(),
        };

        self.keys.sign(&claims)
    }

    /// Expiration for a token issued at `now`, expressed in the fixed offset.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.expiry_offset) + Duration::hours(TOKEN_TTL_HOURS)
    }
}
