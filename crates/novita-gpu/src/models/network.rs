//! VPC network models.

use novita_core::id::{ClusterId, NetworkId};
use novita_core::serde_helpers::null_as_default;
use novita_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// A VPC network instances can join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Network ID
    pub id: NetworkId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Cluster the network belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<ClusterId>,
    /// Address range (CIDR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    /// Network state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Instances attached to the network, by ID
    #[serde(default, deserialize_with = "null_as_default")]
    pub instance_ids: Vec<String>,
    /// Creation time as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Network {
    /// Decode a single network from any of the shapes the API uses:
    /// a bare object, `{"network": ...}`, or a list holding one network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an empty list and [`Error::Decode`]
    /// when the payload is not a network.
    pub(crate) fn from_single(body: &[u8]) -> Result<Self> {
        let payload: Value = serde_json::from_slice(body)?;
        let raw = match payload {
            Value::Object(mut map) if map.contains_key("network") => {
                map.remove("network").unwrap_or(Value::Null)
            }
            other => other,
        };
        let raw = match raw {
            Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| Error::not_found("Network not found"))?,
            other => other,
        };
        Ok(serde_json::from_value(raw)?)
    }
}

/// Request body for creating a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNetworkRequest {
    /// Cluster to create the network in
    pub cluster_id: ClusterId,
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,
}

/// Request body for renaming a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNetworkRequest {
    /// Network to update
    pub network_id: NetworkId,
    /// New display name
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetworkList {
    #[serde(alias = "networks", deserialize_with = "null_as_default")]
    pub(crate) network: Vec<Network>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NetworkRef<'a> {
    pub(crate) network_id: &'a NetworkId,
}
