//! Resource clients and data models for the Novita GPU instance API.
//!
//! Every resource client is generic over a [`novita_core::Executor`]. The same
//! [`GpuClient`] works blocking (with [`novita_core::BlockingTransport`]) or
//! asynchronously (with [`novita_core::AsyncTransport`]).

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod models;
pub mod resources;
pub mod ssh;

pub use client::GpuClient;
pub use models::{
    BillingMode, Cluster, CpuProduct, CpuProductListParams, CreateEndpointRequest,
    CreateEndpointResponse, CreateImagePrewarmRequest, CreateImagePrewarmResponse,
    CreateInstanceRequest, CreateInstanceResponse, CreateNetworkRequest,
    CreateNetworkStorageRequest, CreateRepositoryAuthRequest, CreateSshKeyRequest,
    CreateTemplateRequest, CreateTemplateResponse, EditInstanceRequest, Endpoint,
    EndpointLimitRanges, GpuProduct, ImagePrewarmQuota, ImagePrewarmTask, Instance, InstanceKind,
    InstanceListParams, InstanceMetrics, InstanceStatus, Job, JobListParams, Network,
    NetworkStorage, ProductListParams, RepositoryAuth, SaveImageRequest, SshKey, Template,
    TemplateListParams, UpdateEndpointRequest, UpdateImagePrewarmRequest, UpdateNetworkRequest,
    UpdateNetworkStorageRequest, UpgradeInstanceRequest,
};
pub use resources::{
    Clusters, Endpoints, Images, Instances, Jobs, Metrics, Networks, Products, Registries,
    SshKeys, Storages, Templates,
};
pub use ssh::SshEndpoint;

/// Convenient result alias that reuses the shared Novita error type.
pub type Result<T> = novita_core::Result<T>;
