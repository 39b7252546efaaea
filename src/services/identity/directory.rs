use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::lookup::{Identity, IdentityError, IdentityLookup};

/// In-memory identity directory, seeded once at startup.
///
/// The file format is a JSON array of identities:
///
/// ```json
/// [{"login": "drsmith"}, {"login": "ops", "authorities": ["ROLE_ADMIN"]}]
/// ```
///
/// Cheap to clone; the map is shared behind an `Arc` and never mutated.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityDirectory {
    by_login: Arc<HashMap<String, Identity>>,
}

impl StaticIdentityDirectory {
    pub fn new<I>(identities: I) -> Result<Self, IdentityError>
    where
        I: IntoIterator<Item = Identity>,
    {
        let mut by_login = HashMap::new();
        for identity in identities {
            if identity.login().trim().is_empty() {
                return Err(IdentityError::EmptyLogin);
            }
            let login = identity.login().to_string();
            if by_login.insert(login.clone(), identity).is_some() {
                return Err(IdentityError::DuplicateLogin(login));
            }
        }

        Ok(Self {
            by_login: Arc::new(by_login),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, IdentityError> {
        let identities: Vec<Identity> = serde_json::from_str(json)?;
        Self::new(identities)
    }

    pub fn load(path: &Path) -> Result<Self, IdentityError> {
        let json = std::fs::read_to_string(path).map_err(|source| IdentityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = Self::from_json(&json)?;
        info!(path = %path.display(), identities = directory.len(), "identity directory loaded");
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.by_login.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_login.is_empty()
    }
}

#[async_trait]
impl IdentityLookup for StaticIdentityDirectory {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Identity>, IdentityError> {
        let found = self.by_login.get(login).cloned();
        debug!(login, found = found.is_some(), "identity lookup");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_logins_only() {
        let directory = StaticIdentityDirectory::from_json(
            r#"[{"login":"drsmith"},{"login":"ops","authorities":["ROLE_ADMIN"]}]"#,
        )
        .unwrap();
        assert_eq!(directory.len(), 2);

        let drsmith = directory.find_by_login("drsmith").await.unwrap().unwrap();
        assert!(drsmith.has_authority("ROLE_USER"));

        let ops = directory.find_by_login("ops").await.unwrap().unwrap();
        assert!(ops.has_authority("ROLE_ADMIN"));
        assert!(!ops.has_authority("ROLE_USER"));

        assert!(directory.find_by_login("nobody").await.unwrap().is_none());
        // Logins are matched exactly.
        assert!(directory.find_by_login("DrSmith").await.unwrap().is_none());
    }

    #[test]
    fn duplicate_logins_are_rejected() {
        let err = StaticIdentityDirectory::new([Identity::user("a"), Identity::user("a")])
            .unwrap_err();
        assert!(matches!(err, IdentityError::DuplicateLogin(login) if login == "a"));
    }

    #[test]
    fn empty_logins_are_rejected() {
        let err = StaticIdentityDirectory::from_json(r#"[{"login":" "}]"#).unwrap_err();
        assert!(matches!(err, IdentityError::EmptyLogin));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let err = StaticIdentityDirectory::from_json(r#"{"login":"drsmith"}"#).unwrap_err();
        assert!(matches!(err, IdentityError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = Path::new("/definitely/not/here/identities.json");
        let err = StaticIdentityDirectory::load(path).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here/identities.json"));
    }

    #[tokio::test]
    async fn default_directory_is_empty() {
        let directory = StaticIdentityDirectory::default();
        assert!(directory.is_empty());
        assert!(directory.find_by_login("drsmith").await.unwrap().is_none());
    }
}
