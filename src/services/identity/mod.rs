pub mod directory;
pub mod lookup;

pub use directory::StaticIdentityDirectory;
pub use lookup::{DEFAULT_AUTHORITY, Identity, IdentityError, IdentityLookup};
