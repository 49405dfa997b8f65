//! SSH public key models.

use novita_core::id::SshKeyId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An SSH public key registered with the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshKey {
    /// Key ID
    pub id: SshKeyId,
    /// Display name
    pub name: String,
    /// Public key in OpenSSH format
    pub public_key: String,
    /// Registration time as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Request body for registering a public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSshKeyRequest {
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,
    /// Public key in OpenSSH format
    #[validate(length(min = 1))]
    pub public_key: String,
}

impl CreateSshKeyRequest {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_key: public_key.into(),
        }
    }
}
