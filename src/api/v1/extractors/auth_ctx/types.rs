/*
 * Responsibility
 * - The authenticated context as handlers see it
 * - The access middleware builds it and inserts it into request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Lives exactly as long as the request that carries it
 * - Absence means the caller is anonymous
 */
use std::collections::BTreeSet;

use crate::services::identity::Identity;

/// Context attached to an authenticated request.
///
/// - `identity` is the record the token subject resolved to
/// - `authorities` are copied from it for coarse-grained checks downstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub identity: Identity,
    pub authorities: BTreeSet<String>,
}

impl AuthCtx {
    pub fn new(identity: Identity) -> Self {
        let authorities = identity.authorities().clone();
        Self {
            identity,
            authorities,
        }
    }

    pub fn login(&self) -> &str {
        self.identity.login()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}
