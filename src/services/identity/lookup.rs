//! Identity lookup interface consumed by request authentication.
use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authority granted to identities that do not list any.
pub const DEFAULT_AUTHORITY: &str = "ROLE_USER";

/// An authenticated principal: a unique login plus its authorities.
///
/// Identity records are owned elsewhere; this crate only reads them by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    login: String,
    #[serde(default = "default_authorities")]
    authorities: BTreeSet<String>,
}

fn default_authorities() -> BTreeSet<String> {
    BTreeSet::from([DEFAULT_AUTHORITY.to_string()])
}

impl Identity {
    pub fn new<I, A>(login: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            login: login.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    /// Identity carrying only [`DEFAULT_AUTHORITY`].
    pub fn user(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            authorities: default_authorities(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn authorities(&self) -> &BTreeSet<String> {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}

/// Lookup-layer errors.
///
/// `Ok(None)` from a lookup is "no such login" and is not an error; these
/// variants mean the directory itself could not answer.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity directory unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read identity file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid identity file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("identity with an empty login")]
    EmptyLogin,

    #[error("duplicate login: {0}")]
    DuplicateLogin(String),
}

/// Resolve a token subject to the identity it names.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Name of the backing directory, for logs.
    fn backend_name(&self) -> &'static str;

    /// `Ok(None)` when no identity has this login.
    async fn find_by_login(&self, login: &str) -> Result<Option<Identity>, IdentityError>;
}
