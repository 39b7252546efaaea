/*
 * Responsibility
 * - Response DTOs describing the caller's session
 */
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub login: String,
    pub authorities: Vec<String>,
}

impl From<AuthCtx> for MeResponse {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            login: ctx.login().to_string(),
            authorities: ctx.authorities.into_iter().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    pub authorities: Vec<String>,
}

impl From<Option<AuthCtx>> for WhoAmIResponse {
    fn from(ctx: Option<AuthCtx>) -> Self {
        match ctx {
            Some(ctx) => Self {
                authenticated: true,
                login: Some(ctx.login().to_string()),
                authorities: ctx.authorities.into_iter().collect(),
            },
            None => Self {
                authenticated: false,
                login: None,
                authorities: Vec::new(),
            },
        }
    }
}
