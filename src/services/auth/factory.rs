//! Factory: build the auth services from application `Config`.
use std::sync::Arc;

use tracing::{error, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{RequestAuthenticator, TokenIssuer, TokenValidator, jwt::SessionKeys};
use crate::services::identity::{IdentityLookup, StaticIdentityDirectory};

fn session_keys(config: &Config) -> Result<SessionKeys, AppError> {
    SessionKeys::from_secret(&config.token_secret).map_err(|e| {
        error!(error = %e, "failed to load session signing key");
        AppError::Internal
    })
}

pub fn build_token_issuer(config: &Config) -> Result<TokenIssuer, AppError> {
    Ok(TokenIssuer::new(session_keys(config)?, config.expiry_offset))
}

pub fn build_identity_lookup(config: &Config) -> Result<Arc<dyn IdentityLookup>, AppError> {
    let directory = match &config.identities_path {
        Some(path) => StaticIdentityDirectory::load(path).map_err(|e| {
            error!(error = %e, "failed to load identity directory");
            AppError::Internal
        })?,
        None => {
            warn!("IDENTITIES_PATH is not set; every bearer token will resolve to an unknown subject");
            StaticIdentityDirectory::default()
        }
    };

    Ok(Arc::new(directory))
}

pub fn build_request_authenticator(config: &Config) -> Result<Arc<RequestAuthenticator>, AppError> {
    let validator = TokenValidator::new(session_keys(config)?);
    let identities = build_identity_lookup(config)?;

    Ok(Arc::new(RequestAuthenticator::new(validator, identities)))
}
