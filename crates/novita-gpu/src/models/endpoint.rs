//! Serverless endpoint models.

use super::instance::{EnvVar, VolumeMount};
use novita_core::id::{ClusterId, EndpointId, ProductId, RegistryAuthId};
use novita_core::serde_helpers::{null_as_default, option_from_str_or_number};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Worker pool sizing for an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Minimum number of workers
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_num: Option<u32>,
    /// Maximum number of workers
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_num: Option<u32>,
    /// Idle seconds before a worker is released
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub free_timeout: Option<u32>,
    /// Concurrent requests per worker
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_concurrent: Option<u32>,
    /// GPUs per worker
    #[validate(range(max = 8))]
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gpu_num: Option<u32>,
    /// Required CUDA version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuda_version: Option<String>,
}

/// Autoscaling policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingPolicy {
    /// Policy type (`queue`, `concurrency`, `rps`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Threshold for the policy
    pub value: u32,
}

/// Container image for endpoint workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointImage {
    /// Image reference
    pub image: String,
    /// Registry credential for private images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_id: Option<RegistryAuthId>,
    /// Start command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// Product reference used by endpoint workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointProduct {
    /// Product ID
    pub id: ProductId,
}

/// Port exposed by endpoint workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPort {
    /// Container port
    pub port: u16,
}

/// Health check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// HTTP path probed on each worker
    pub path: String,
}

/// A serverless endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Endpoint ID
    pub id: EndpointId,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Application name used in the public URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    /// Public URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// State object (`state`, `error`, `message`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    /// Worker pool sizing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_config: Option<WorkerConfig>,
    /// Autoscaling policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ScalingPolicy>,
    /// Worker image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EndpointImage>,
    /// Root filesystem size in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rootfs_size: Option<u32>,
    /// Attached volumes
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Environment variables
    #[serde(default, deserialize_with = "null_as_default")]
    pub envs: Vec<EnvVar>,
    /// Exposed ports
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: Vec<EndpointPort>,
    /// Running workers, as sent by the server
    #[serde(default, deserialize_with = "null_as_default")]
    pub workers: Vec<Value>,
    /// Products the workers run on
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<EndpointProduct>,
    /// Cluster hosting the workers
    #[serde(default, rename = "clusterID", alias = "clusterId", skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<ClusterId>,
    /// Creation time as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Endpoint {
    /// The `state` field of the state object, when present.
    #[must_use]
    pub fn state_name(&self) -> Option<&str> {
        match self.state.as_ref()? {
            Value::String(state) => Some(state),
            Value::Object(map) => map.get("state").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Request body for creating an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEndpointRequest {
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,
    /// Application name used in the public URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    /// Worker pool sizing
    #[validate(nested)]
    pub worker_config: WorkerConfig,
    /// Exposed ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<EndpointPort>,
    /// Autoscaling policy
    pub policy: ScalingPolicy,
    /// Worker image
    pub image: EndpointImage,
    /// Products the workers run on
    #[validate(length(min = 1))]
    pub products: Vec<EndpointProduct>,
    /// Root filesystem size in GB
    #[validate(range(min = 20, max = 1000))]
    pub rootfs_size: u32,
    /// Attached volumes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Cluster to run in
    #[serde(default, rename = "clusterID", skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<ClusterId>,
    /// Environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
    /// Health check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<HealthCheck>,
}

/// Response of endpoint creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEndpointResponse {
    /// ID of the new endpoint
    pub id: EndpointId,
}

/// Request body for updating an endpoint. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEndpointRequest {
    /// Endpoint to update
    pub id: EndpointId,
    /// Worker pool sizing
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_config: Option<WorkerConfig>,
    /// Autoscaling policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ScalingPolicy>,
    /// Worker image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EndpointImage>,
    /// Root filesystem size in GB
    #[validate(range(min = 20, max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rootfs_size: Option<u32>,
    /// Replacement environment variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envs: Option<Vec<EnvVar>>,
    /// Replacement ports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<EndpointPort>>,
    /// Health check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<HealthCheck>,
}

impl UpdateEndpointRequest {
    /// Update request that changes nothing yet.
    #[must_use]
    pub fn new(id: impl Into<EndpointId>) -> Self {
        Self {
            id: id.into(),
            worker_config: None,
            policy: None,
            image: None,
            rootfs_size: None,
            envs: None,
            ports: None,
            healthy: None,
        }
    }
}

/// Allowed ranges for endpoint parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EndpointLimitRanges {
    #[serde(default)]
    pub min_rootfs_size: u32,
    #[serde(default)]
    pub max_rootfs_size: u32,
    #[serde(default)]
    pub free_rootfs_size: u32,
    #[serde(default)]
    pub min_local_volume_size: u32,
    #[serde(default)]
    pub max_local_volume_size: u32,
    #[serde(default)]
    pub free_local_volume_size: u32,
    #[serde(default)]
    pub min_worker_num: u32,
    #[serde(default)]
    pub max_worker_num: u32,
    #[serde(default)]
    pub min_free_timeout: u32,
    #[serde(default)]
    pub max_free_timeout: u32,
    #[serde(default)]
    pub min_concurrency_num: u32,
    #[serde(default)]
    pub max_concurrency_num: u32,
    #[serde(default)]
    pub min_queue_wait_time: u32,
    #[serde(default)]
    pub max_queue_wait_time: u32,
    #[serde(default)]
    pub min_request_num: u32,
    #[serde(default)]
    pub max_request_num: u32,
    #[serde(default, rename = "minGPUNum")]
    pub min_gpu_num: u32,
    #[serde(default, rename = "maxGPUNum")]
    pub max_gpu_num: u32,
    /// CUDA versions workers can request
    #[serde(default, deserialize_with = "null_as_default")]
    pub cuda_version_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EndpointEnvelope {
    Wrapped { endpoint: Endpoint },
    Bare(Endpoint),
}

impl EndpointEnvelope {
    pub(crate) fn into_inner(self) -> Endpoint {
        match self {
            Self::Wrapped { endpoint } | Self::Bare(endpoint) => endpoint,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EndpointList {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) endpoints: Vec<Endpoint>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EndpointRef<'a> {
    pub(crate) id: &'a EndpointId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_wrapped_or_bare() {
        let bare: EndpointEnvelope =
            serde_json::from_value(json!({"id": "ep-1", "name": "demo"})).unwrap();
        let wrapped: EndpointEnvelope =
            serde_json::from_value(json!({"endpoint": {"id": "ep-1", "name": "demo"}})).unwrap();
        assert_eq!(bare.into_inner(), wrapped.into_inner());
    }

    #[test]
    fn test_state_name() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "id": "ep-1",
            "state": {"state": "serving", "error": "", "message": ""}
        }))
        .unwrap();
        assert_eq!(endpoint.state_name(), Some("serving"));
    }

    #[test]
    fn test_limit_ranges_wire_names() {
        let limits: EndpointLimitRanges = serde_json::from_value(json!({
            "minRootfsSize": 10,
            "maxRootfsSize": 100,
            "minGPUNum": 1,
            "maxGPUNum": 8,
            "cudaVersionList": ["12.1", "12.4"]
        }))
        .unwrap();
        assert_eq!(limits.max_gpu_num, 8);
        assert_eq!(limits.cuda_version_list.len(), 2);
        assert_eq!(limits.min_worker_num, 0);
    }

    #[test]
    fn test_update_request_skips_absent_fields() {
        let request = UpdateEndpointRequest::new("ep-1");
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"id": "ep-1"}));
    }
}
