pub mod authenticator;
pub mod error;
pub mod factory;
pub mod jwt;
pub mod token_issuer;
pub mod token_validator;

pub use authenticator::{Authentication, RequestAuthenticator};
pub use error::{AuthError, InvalidToken, TokenCreationError};
pub use factory::{build_request_authenticator, build_token_issuer};
pub use token_issuer::TokenIssuer;
pub use token_validator::TokenValidator;
