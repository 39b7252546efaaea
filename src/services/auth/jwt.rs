use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::services::auth::error::TokenCreationError;

/// `iss` claim shared by issuance and validation.
pub const TOKEN_ISSUER: &str = "API Voll.med";

/// Session tokens are HS256 only; validation refuses any other `alg`.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// The fixed claim set carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub sub: String,
    /// Unix seconds.
    pub exp: i64,
}

/// HMAC key material, loaded once at startup and never rotated.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("algorithm", &TOKEN_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn from_secret(secret: &str) -> Result<Self, TokenCreationError> {
        if secret.is_empty() {
            error!("refusing to build session keys from an empty secret");
            return Err(TokenCreationError::MissingKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, TokenCreationError> {
        let header = Header::new(TOKEN_ALGORITHM);
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign session token");
            TokenCreationError::Signing(e)
        })
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_missing_key() {
        assert!(matches!(
            SessionKeys::from_secret(""),
            Err(TokenCreationError::MissingKey)
        ));
    }

    #[test]
    fn signed_token_is_three_segment_hs256() {
        use base64::Engine;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let keys = SessionKeys::from_secret("test-secret").unwrap();
        let token = keys
            .sign(&SessionClaims {
                iss: TOKEN_ISSUER.to_string(),
                sub: "drsmith".to_string(),
                exp: 1_700_000_000,
            })
            .unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");

        let claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
        assert_eq!(
            claims,
            serde_json::json!({"iss": "API Voll.med", "sub": "drsmith", "exp": 1_700_000_000})
        );
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let keys = SessionKeys::from_secret("super-secret-value").unwrap();
        assert!(!format!("{:?}", keys).contains("super-secret-value"));
    }
}
