//! Instance models.

use novita_core::id::{ClusterId, InstanceId, JobId, NetworkId, ProductId, RegistryAuthId, StorageId, TemplateId};
use novita_core::query::QueryParams;
use novita_core::serde_helpers::{null_as_default, option_from_str_or_number};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Lifecycle state reported for an instance.
///
/// States the SDK does not know about deserialize to [`InstanceStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstanceStatus {
    /// Queued for creation
    ToCreate,
    /// Being created
    Creating,
    /// Pulling the container image
    Pulling,
    /// Running
    Running,
    /// Queued for start
    ToStart,
    /// Starting
    Starting,
    /// Queued for stop
    ToStop,
    /// Stopping
    Stopping,
    /// Stopped
    Exited,
    /// Queued for restart
    ToRestart,
    /// Restarting
    Restarting,
    /// Queued for removal
    ToRemove,
    /// Being removed
    Removing,
    /// Removed
    Removed,
    /// Queued for reset
    ToReset,
    /// Resetting
    Resetting,
    /// Migrating to another node
    Migrating,
    /// Frozen (for example after an unpaid bill)
    Freezing,
    /// A state this SDK version does not recognise
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    /// Wire representation, as used in list filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToCreate => "toCreate",
            Self::Creating => "creating",
            Self::Pulling => "pulling",
            Self::Running => "running",
            Self::ToStart => "toStart",
            Self::Starting => "starting",
            Self::ToStop => "toStop",
            Self::Stopping => "stopping",
            Self::Exited => "exited",
            Self::ToRestart => "toRestart",
            Self::Restarting => "restarting",
            Self::ToRemove => "toRemove",
            Self::Removing => "removing",
            Self::Removed => "removed",
            Self::ToReset => "toReset",
            Self::Resetting => "resetting",
            Self::Migrating => "migrating",
            Self::Freezing => "freezing",
            Self::Unknown => "unknown",
        }
    }

    /// True once the instance has reached a state it will not leave on its own.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Running | Self::Exited | Self::Removed)
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware class of an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceKind {
    /// GPU instance
    #[default]
    Gpu,
    /// CPU-only instance
    Cpu,
}

/// How an instance is billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingMode {
    /// Pay as you go
    #[default]
    OnDemand,
    /// Monthly subscription
    Monthly,
    /// Interruptible spot capacity
    Spot,
}

impl BillingMode {
    /// Wire representation, as used in query filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnDemand => "onDemand",
            Self::Monthly => "monthly",
            Self::Spot => "spot",
        }
    }
}

impl fmt::Display for BillingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment variable passed to the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    /// Variable name
    pub key: String,
    /// Variable value
    pub value: String,
}

impl EnvVar {
    /// Convenience constructor.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Port to expose from the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Container port
    pub port: u16,
    /// Protocol (`tcp`, `http`, `udp`)
    #[serde(rename = "type")]
    pub protocol: String,
}

impl PortSpec {
    /// Convenience constructor.
    #[must_use]
    pub fn new(port: u16, protocol: impl Into<String>) -> Self {
        Self {
            port,
            protocol: protocol.into(),
        }
    }
}

/// Exposed port as reported for a running instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortMapping {
    /// Container port
    pub port: u16,
    /// Public endpoint (`tcp://host:port`, `host:port`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Protocol
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Volume attached to an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Volume type (`local`, `network`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Size in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<u64>,
    /// Network storage ID, for network volumes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StorageId>,
    /// Mount point inside the container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
}

impl VolumeMount {
    /// A network storage mounted at `mount_path`.
    #[must_use]
    pub fn network(id: impl Into<StorageId>, mount_path: impl Into<String>) -> Self {
        Self {
            kind: Some("network".to_string()),
            size: None,
            id: Some(id.into()),
            mount_path: Some(mount_path.into()),
        }
    }
}

/// Network storage attachment on instance creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStorageMount {
    /// Storage ID
    pub id: StorageId,
    /// Mount point inside the container
    pub mount_point: String,
}

/// SSH connection hint published by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectComponentSsh {
    /// Login user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Ready-to-run ssh command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// A GPU or CPU instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Instance ID
    pub id: InstanceId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Cluster hosting the instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<ClusterId>,
    /// Cluster display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Current lifecycle state
    pub status: InstanceStatus,
    /// Container image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Registry credential used to pull the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_auth_id: Option<RegistryAuthId>,
    /// Container start command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Number of vCPUs
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpu_num: Option<u32>,
    /// Memory in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory: Option<u32>,
    /// Number of GPUs
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gpu_num: Option<u32>,
    /// Exposed ports
    #[serde(default, deserialize_with = "null_as_default")]
    pub port_mappings: Vec<PortMapping>,
    /// Product the instance was created from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Product display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
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
    /// Billing mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
    /// Subscription end time (`-1` for on-demand)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Creation time as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Hardware class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InstanceKind>,
    /// SSH connection hint
    #[serde(
        default,
        rename = "connectComponentSSH",
        skip_serializing_if = "Option::is_none"
    )]
    pub connect_component_ssh: Option<ConnectComponentSsh>,
}

/// Filters accepted by the instance list endpoint.
#[derive(Debug, Default, Clone)]
pub struct InstanceListParams {
    /// Page size
    pub page_size: Option<u32>,
    /// Page number
    pub page_num: Option<u32>,
    /// Filter by name
    pub name: Option<String>,
    /// Filter by product name
    pub product_name: Option<String>,
    /// Filter by status
    pub status: Option<InstanceStatus>,
}

impl InstanceListParams {
    /// Convert the parameters into query pairs.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("pageSize", self.page_size);
        params.push_opt("pageNum", self.page_num);
        params.push_opt("name", self.name.as_deref());
        params.push_opt("productName", self.product_name.as_deref());
        params.push_opt("status", self.status);
        params
    }
}

/// Request body for creating an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Product to create the instance from
    #[validate(length(min = 1))]
    pub product_id: String,
    /// Number of GPUs
    #[validate(range(max = 8))]
    pub gpu_num: u32,
    /// Root filesystem size in GB
    #[validate(range(min = 20, max = 1000))]
    pub rootfs_size: u32,
    /// Container image
    #[validate(length(min = 1))]
    pub image_url: String,
    /// Hardware class
    #[serde(default)]
    pub kind: InstanceKind,
    /// Registry credential for private images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_auth_id: Option<RegistryAuthId>,
    /// Cluster to place the instance in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<ClusterId>,
    /// Ports to expose
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortSpec>,
    /// Environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
    /// Container start command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Mount point of the local volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_storage_mount_point: Option<String>,
    /// Network storages to attach
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_storages: Vec<NetworkStorageMount>,
    /// VPC network to join
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<NetworkId>,
    /// Template to create the instance from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<TemplateId>,
    /// Minimum CUDA version required on the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cuda_version: Option<String>,
    /// Billing mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
    /// Subscription length in months, for monthly billing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl CreateInstanceRequest {
    /// Request with the required fields set and everything else left out.
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        gpu_num: u32,
        rootfs_size: u32,
        image_url: impl Into<String>,
        kind: InstanceKind,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            gpu_num,
            rootfs_size,
            image_url: image_url.into(),
            kind,
            ..Self::default()
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Place the instance in a specific cluster.
    #[must_use]
    pub fn with_cluster(mut self, cluster_id: impl Into<ClusterId>) -> Self {
        self.cluster_id = Some(cluster_id.into());
        self
    }

    /// Add a port to expose.
    #[must_use]
    pub fn with_port(mut self, port: PortSpec) -> Self {
        self.ports.push(port);
        self
    }

    /// Add an environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push(EnvVar::new(key, value));
        self
    }

    /// Set the billing mode.
    #[must_use]
    pub const fn with_billing_mode(mut self, mode: BillingMode) -> Self {
        self.billing_mode = Some(mode);
        self
    }
}

/// Response of instance creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInstanceResponse {
    /// ID of the new instance
    pub id: InstanceId,
}

/// Request body for editing an instance's ports or root disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditInstanceRequest {
    /// Instance to edit
    pub instance_id: InstanceId,
    /// Replacement port list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortSpec>,
    /// New root disk size in GB
    #[validate(range(min = 20, max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand_root_disk: Option<u32>,
}

impl EditInstanceRequest {
    /// Edit request that changes nothing yet.
    #[must_use]
    pub fn new(instance_id: impl Into<InstanceId>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ports: Vec::new(),
            expand_root_disk: None,
        }
    }
}

/// Network volumes attached on upgrade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkVolume {
    /// Volumes to mount
    #[serde(default)]
    pub volume_mounts: Vec<VolumeMount>,
}

/// Request body for replacing an instance's image or configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeInstanceRequest {
    /// Instance to upgrade
    pub instance_id: InstanceId,
    /// New container image
    pub image_url: String,
    /// Registry credential for the new image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_auth_id: Option<RegistryAuthId>,
    /// Replacement environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
    /// Replacement start command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Keep the data on the root filesystem
    #[serde(default)]
    pub save: bool,
    /// Network volumes to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_volume: Option<NetworkVolume>,
}

/// Request body for saving an instance's filesystem as an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveImageRequest {
    /// Source instance
    pub instance_id: InstanceId,
    /// Target image reference (`registry/repo:tag`)
    pub image: String,
    /// Credential used to push the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_auth_id: Option<RegistryAuthId>,
}

/// Response of a save-image call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveImageResponse {
    pub(crate) job_id: JobId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstanceRef<'a> {
    pub(crate) instance_id: &'a InstanceId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstanceMonths<'a> {
    pub(crate) instance_id: &'a InstanceId,
    pub(crate) month: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstanceList {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) instances: Vec<Instance>,
}
