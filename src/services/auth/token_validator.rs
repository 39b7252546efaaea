use jsonwebtoken::Validation;
use tracing::debug;

use crate::services::auth::error::InvalidToken;
use crate::services::auth::jwt::{SessionClaims, SessionKeys, TOKEN_ALGORITHM, TOKEN_ISSUER};

/// HS256 session-token verifier.
///
/// `jsonwebtoken::Validation` checks:
/// - signature (HS256 only, any other `alg` is refused)
/// - `iss` equals [`TOKEN_ISSUER`]
/// - `exp` with zero leeway, so a token is good up to and including its `exp` second
/// - presence of `iss`, `sub` and `exp`
///
/// On top of that an empty `sub` is treated as malformed.
#[derive(Clone)]
pub struct TokenValidator {
    keys: SessionKeys,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenValidator {
    pub fn new(keys: SessionKeys) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;
        validation.leeway = 0;

        Self { keys, validation }
    }

    /// Verify `token` and return its subject (the login it was issued for).
    pub fn validate(&self, token: &str) -> Result<String, InvalidToken> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, self.keys.decoding_key(), &self.validation)
                .map_err(|e| {
                    let reason = InvalidToken::from(&e);
                    debug!(error = %e, %reason, "session token rejected");
                    reason
                })?;

        let claims = data.claims;
        if claims.sub.trim().is_empty() {
            debug!("session token rejected: empty subject");
            return Err(InvalidToken::Malformed);
        }

        Ok(claims.sub)
    }
}
