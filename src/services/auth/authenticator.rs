use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::error::{AuthError, InvalidToken};
use crate::services::auth::token_validator::TokenValidator;
use crate::services::identity::IdentityLookup;

const BEARER_PREFIX: &str = "Bearer ";

/// Result of authenticating a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// No `Authorization` header. Enforcement is left to downstream handlers.
    Anonymous,
    Authenticated(AuthCtx),
}

/// Per-request authentication: bearer token → subject → identity → AuthCtx.
///
/// Holds no per-request state; one instance is shared by every request.
#[derive(Clone)]
pub struct RequestAuthenticator {
    validator: TokenValidator,
    identities: Arc<dyn IdentityLookup>,
}

impl std::fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("validator", &self.validator)
            .field("identities", &self.identities.backend_name())
            .finish()
    }
}

impl RequestAuthenticator {
    pub fn new(validator: TokenValidator, identities: Arc<dyn IdentityLookup>) -> Self {
        Self {
            validator,
            identities,
        }
    }

    /// Authenticate a request from its headers.
    ///
    /// - no `Authorization` header → `Ok(Anonymous)`
    /// - header present and everything checks out → `Ok(Authenticated)`
    /// - header present but unusable, token invalid, or subject unknown → `Err`
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Authentication, AuthError> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Ok(Authentication::Anonymous);
        };

        let value = value.to_str().map_err(|_| InvalidToken::Malformed)?;
        let ctx = self.authenticate_bearer(value).await?;

        Ok(Authentication::Authenticated(ctx))
    }

    /// Authenticate a raw `Authorization` header value.
    pub async fn authenticate_bearer(&self, authorization: &str) -> Result<AuthCtx, AuthError> {
        let token = bearer_token(authorization).ok_or(InvalidToken::Malformed)?;
        let login = self.validator.validate(token)?;

        let identity = self
            .identities
            .find_by_login(&login)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        Ok(AuthCtx::new(identity))
    }
}

/// Strip the literal, case-sensitive `"Bearer "` prefix.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization.strip_prefix(BEARER_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::HeaderValue;

    use crate::config::parse_utc_offset;
    use crate::services::auth::jwt::SessionKeys;
    use crate::services::auth::token_issuer::TokenIssuer;
    use crate::services::identity::{
        Identity, IdentityError, StaticIdentityDirectory,
    };

    const SECRET: &str = "authenticator-test-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            SessionKeys::from_secret(SECRET).unwrap(),
            parse_utc_offset("-03:00").unwrap(),
        )
    }

    fn authenticator_with(identities: Arc<dyn IdentityLookup>) -> RequestAuthenticator {
        RequestAuthenticator::new(
            TokenValidator::new(SessionKeys::from_secret(SECRET).unwrap()),
            identities,
        )
    }

    fn authenticator() -> RequestAuthenticator {
        let directory = StaticIdentityDirectory::new([Identity::user("drsmith")]).unwrap();
        authenticator_with(Arc::new(directory))
    }

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(authorization).unwrap(),
        );
        headers
    }

    struct UnavailableDirectory;

    #[async_trait]
    impl IdentityLookup for UnavailableDirectory {
        fn backend_name(&self) -> &'static str {
            "unavailable"
        }

        async fn find_by_login(&self, _login: &str) -> Result<Option<Identity>, IdentityError> {
            Err(IdentityError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn bearer_prefix_is_literal() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), Some(""));
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("Bearer  abc"), Some(" abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn no_header_is_anonymous() {
        let outcome = authenticator().authenticate(&HeaderMap::new()).await.unwrap();
        assert_eq!(outcome, Authentication::Anonymous);
    }

    #[tokio::test]
    async fn valid_token_for_known_login_binds_context() {
        let token = issuer().issue(&Identity::user("drsmith")).unwrap();

        let outcome = authenticator()
            .authenticate(&headers(&format!("Bearer {}", token)))
            .await
            .unwrap();

        let Authentication::Authenticated(ctx) = outcome else {
            panic!("expected an authenticated outcome");
        };
        assert_eq!(ctx.login(), "drsmith");
        assert_eq!(
            ctx.authorities.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["ROLE_USER"]
        );
    }

    #[tokio::test]
    async fn valid_token_for_unknown_login_is_rejected() {
        let token = issuer().issue(&Identity::user("ghost")).unwrap();

        let err = authenticator()
            .authenticate(&headers(&format!("Bearer {}", token)))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnknownSubject));
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_before_lookup() {
        // The lookup would fail loudly if it were reached.
        let authenticator = authenticator_with(Arc::new(UnavailableDirectory));

        let err = authenticator
            .authenticate(&headers("Bearer not.a.token"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(InvalidToken::Malformed)));
    }

    #[tokio::test]
    async fn header_without_bearer_prefix_is_rejected() {
        let token = issuer().issue(&Identity::user("drsmith")).unwrap();

        for value in [token.clone(), format!("bearer {}", token), format!("Token {}", token)] {
            let err = authenticator()
                .authenticate(&headers(&value))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidToken(_)), "{}", value);
        }
    }

    #[tokio::test]
    async fn non_ascii_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );

        let err = authenticator().authenticate(&headers).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(InvalidToken::Malformed)));
    }

    #[tokio::test]
    async fn lookup_failure_surfaces_as_lookup_error() {
        let token = issuer().issue(&Identity::user("drsmith")).unwrap();
        let authenticator = authenticator_with(Arc::new(UnavailableDirectory));

        let err = authenticator
            .authenticate(&headers(&format!("Bearer {}", token)))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Lookup(_)));
    }
}
