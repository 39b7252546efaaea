/*
 * Responsibility
 * - GET /me: requires an authenticated caller
 * - GET /whoami: answers for anonymous callers too
 */
use axum::Json;

use crate::api::v1::dto::session::{MeResponse, WhoAmIResponse};
use crate::api::v1::extractors::{AuthCtxExtractor, MaybeAuthCtx};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse::from(ctx))
}

pub async fn whoami(MaybeAuthCtx(ctx): MaybeAuthCtx) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse::from(ctx))
}
