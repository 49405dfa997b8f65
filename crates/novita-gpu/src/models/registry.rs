//! Container registry credential models.
//!
//! Passwords are held as [`SecretString`]: `Debug` output is redacted and the
//! plain value is only exposed when serializing a request body.

use novita_core::id::RegistryAuthId;
use novita_core::serde_helpers::null_as_default;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Stored credential for a private registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryAuth {
    /// Credential ID
    pub id: RegistryAuthId,
    /// Registry host (`docker.io`, `ghcr.io`, ...)
    pub name: String,
    /// Registry user
    pub username: String,
    /// Registry password or token
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// Request body for storing a registry credential.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRepositoryAuthRequest {
    /// Registry host
    #[validate(length(min = 1))]
    pub name: String,
    /// Registry user
    #[validate(length(min = 1))]
    pub username: String,
    /// Registry password or token
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl CreateRepositoryAuthRequest {
    /// Convenience constructor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryAuthList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) data: Vec<RepositoryAuth>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RepositoryAuthRef<'a> {
    pub(crate) id: &'a RegistryAuthId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_redacted_in_debug() {
        let request = CreateRepositoryAuthRequest::new("docker.io", "user", "super-secret-password");
        let debug = format!("{request:?}");
        assert!(!debug.contains("super-secret-password"));
    }

    #[test]
    fn test_password_sent_in_body() {
        let request = CreateRepositoryAuthRequest::new("docker.io", "user", "super-secret-password");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "docker.io", "username": "user", "password": "super-secret-password"})
        );
    }

    #[test]
    fn test_parse_list() {
        let list: RepositoryAuthList = serde_json::from_value(json!({
            "data": [{"id": "auth-1", "name": "ghcr.io", "username": "u", "password": "p"}]
        }))
        .unwrap();
        assert_eq!(list.data[0].id, "auth-1");
        assert_eq!(list.data[0].password.expose_secret(), "p");
    }
}
