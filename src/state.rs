/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to clone: everything inside sits behind an Arc
 * - Holds nothing request-specific; the per-request AuthCtx travels in extensions
 */
use std::sync::Arc;

use crate::services::auth::RequestAuthenticator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub authenticator: Arc<RequestAuthenticator>,
}

impl AppState {
    pub fn new(authenticator: Arc<RequestAuthenticator>) -> Self {
        Self { authenticator }
    }
}
