use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

use crate::error::AppError;
use crate::services::identity::IdentityError;

/// Token signing failed. Always an operator problem, never the caller's.
#[derive(Debug, Error)]
pub enum TokenCreationError {
    #[error("signing key is missing")]
    MissingKey,

    #[error("cannot issue a token for an empty login")]
    EmptySubject,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Why a presented token was refused.
///
/// The tag is for server-side logs only; clients see a uniform 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidToken {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    BadSignature,

    #[error("token issuer does not match")]
    IssuerMismatch,

    #[error("token has expired")]
    Expired,
}

impl From<&jsonwebtoken::errors::Error> for InvalidToken {
    fn from(e: &jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::BadSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidIssuer => Self::IssuerMismatch,
            _ => Self::Malformed,
        }
    }
}

/// Outcome of a rejected authentication attempt.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    InvalidToken(#[from] InvalidToken),

    #[error("token subject does not resolve to an identity")]
    UnknownSubject,

    #[error("identity lookup failed: {0}")]
    Lookup(#[from] IdentityError),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidToken(_) | AuthError::UnknownSubject => AppError::Unauthorized,
            AuthError::Lookup(_) => AppError::Internal,
        }
    }
}
