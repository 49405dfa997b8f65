//! Request and response models for the GPU instance API.
//!
//! Wire names are camelCase; Rust field names are snake_case. Request structs
//! skip absent optional fields when serialized. List envelopes are internal:
//! resource clients return the unwrapped collections.

pub mod cluster;
pub mod endpoint;
pub mod image;
pub mod instance;
pub mod job;
pub mod metrics;
pub mod network;
pub mod product;
pub mod registry;
pub mod ssh_key;
pub mod storage;
pub mod template;

pub use cluster::Cluster;
pub use endpoint::{
    CreateEndpointRequest, CreateEndpointResponse, Endpoint, EndpointImage, EndpointLimitRanges,
    EndpointPort, EndpointProduct, HealthCheck, ScalingPolicy, UpdateEndpointRequest, WorkerConfig,
};
pub use image::{
    CreateImagePrewarmRequest, CreateImagePrewarmResponse, ImagePrewarmQuota, ImagePrewarmTask,
    UpdateImagePrewarmRequest,
};
pub use instance::{
    BillingMode, ConnectComponentSsh, CreateInstanceRequest, CreateInstanceResponse,
    EditInstanceRequest, EnvVar, Instance, InstanceKind, InstanceListParams, InstanceStatus,
    NetworkStorageMount, NetworkVolume, PortMapping, PortSpec, SaveImageRequest,
    UpgradeInstanceRequest, VolumeMount,
};
pub use job::{Job, JobListParams};
pub use metrics::InstanceMetrics;
pub use network::{CreateNetworkRequest, Network, UpdateNetworkRequest};
pub use product::{CpuProduct, CpuProductListParams, GpuProduct, ProductListParams, SubscriptionPrice};
pub use registry::{CreateRepositoryAuthRequest, RepositoryAuth};
pub use ssh_key::{CreateSshKeyRequest, SshKey};
pub use storage::{CreateNetworkStorageRequest, NetworkStorage, UpdateNetworkStorageRequest};
pub use template::{CreateTemplateRequest, CreateTemplateResponse, Template, TemplateListParams};

use novita_core::serde_helpers::null_as_default;
use serde::Deserialize;

/// `{"data": [...]}` envelope.
///
/// `null` data decodes as an empty list; a missing `data` key is an error.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct DataList<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) data: Vec<T>,
}
