use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Extractor for handlers that require an authenticated caller.
///
/// The access middleware inserts AuthCtx into request extensions. If it is
/// missing the request was anonymous and the handler is refused with 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

/// Extractor for handlers that serve anonymous and authenticated callers alike.
pub struct MaybeAuthCtx(pub Option<AuthCtx>);

impl<S> FromRequestParts<S> for MaybeAuthCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthCtx(parts.extensions.get::<AuthCtx>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::services::identity::Identity;

    fn parts() -> Parts {
        Request::builder()
            .uri("/api/v1/me")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn anonymous_request_is_refused_by_the_strict_extractor() {
        let mut parts = parts();
        let result = AuthCtxExtractor::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn bound_context_is_returned() {
        let mut parts = parts();
        parts
            .extensions
            .insert(AuthCtx::new(Identity::user("drsmith")));

        let AuthCtxExtractor(ctx) = AuthCtxExtractor::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(ctx.login(), "drsmith");
        assert!(ctx.has_authority("ROLE_USER"));

        let MaybeAuthCtx(maybe) = MaybeAuthCtx::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(maybe, Some(ctx));
    }

    #[tokio::test]
    async fn anonymous_request_is_none_for_the_lenient_extractor() {
        let mut parts = parts();
        let MaybeAuthCtx(maybe) = MaybeAuthCtx::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(maybe.is_none());
    }
}
