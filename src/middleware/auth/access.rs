//! Bearer session authentication → AuthCtx in request extensions.
//!
//! - No `Authorization` header: the request continues anonymously.
//! - Valid token whose subject resolves: AuthCtx is inserted and the request continues.
//! - Anything else: the request stops here with a uniform 401.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthError, Authentication};
use crate::state::AppState;

/// Apply the access middleware to every route of `router`.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor, so pass the state explicitly.
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match state.authenticator.authenticate(req.headers()).await {
        Ok(Authentication::Anonymous) => {
            tracing::debug!("no authorization header; continuing anonymously");
        }
        Ok(Authentication::Authenticated(auth_ctx)) => {
            tracing::debug!(login = auth_ctx.login(), "request authenticated");
            // middleware → extractor hand-off
            req.extensions_mut().insert(auth_ctx);
        }
        Err(err) => {
            match &err {
                AuthError::Lookup(_) => {
                    tracing::error!(error = %err, "identity lookup failed during authentication")
                }
                _ => tracing::warn!(error = %err, "authentication rejected"),
            }
            return Err(err.into());
        }
    }

    Ok(next.run(req).await)
}
