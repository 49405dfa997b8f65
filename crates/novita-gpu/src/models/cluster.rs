//! Cluster (region) models.

use novita_core::id::ClusterId;
use novita_core::serde_helpers::null_as_default;
use serde::{Deserialize, Serialize};

/// A cluster instances can be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Cluster ID
    pub id: ClusterId,
    /// Display name
    pub name: String,
    /// GPU types offered in the cluster
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_gpu_type: Vec<String>,
    /// Whether network storage can be created here
    #[serde(default)]
    pub support_network_storage: bool,
    /// Whether VPC networks can be created here
    #[serde(default)]
    pub support_instance_network: bool,
}
