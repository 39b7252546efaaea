/*
 * Responsibility
 * - v1 URL layout
 * - Every v1 route runs behind the access middleware; handlers decide
 *   whether an anonymous caller is acceptable
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::session::{me, whoami};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/me", get(me))
        .route("/whoami", get(whoami));

    middleware::auth::access::apply(router, state)
}
