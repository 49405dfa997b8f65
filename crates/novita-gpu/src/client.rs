//! Aggregate of the GPU instance resource clients.

use crate::resources::{
    Clusters, Endpoints, Images, Instances, Jobs, Metrics, Networks, Products, Registries,
    SshKeys, Storages, Templates,
};
use novita_core::Executor;

/// Every GPU instance API area, sharing one executor.
///
/// Instantiated with [`BlockingTransport`](novita_core::BlockingTransport) or
/// [`AsyncTransport`](novita_core::AsyncTransport); both expose the same
/// fields and methods.
#[derive(Debug, Clone)]
pub struct GpuClient<E> {
    /// Cluster listing
    pub clusters: Clusters<E>,
    /// Serverless endpoints
    pub endpoints: Endpoints<E>,
    /// Image prewarm tasks
    pub images: Images<E>,
    /// Instance lifecycle
    pub instances: Instances<E>,
    /// Background jobs
    pub jobs: Jobs<E>,
    /// Instance metrics
    pub metrics: Metrics<E>,
    /// VPC networks
    pub networks: Networks<E>,
    /// Product catalogue
    pub products: Products<E>,
    /// Registry credentials
    pub registries: Registries<E>,
    /// Network storage
    pub storages: Storages<E>,
    /// Instance templates
    pub templates: Templates<E>,
    /// SSH public keys
    pub ssh_keys: SshKeys<E>,
}

impl<E: Executor> GpuClient<E> {
    /// Build every resource client on top of `executor`.
    pub fn new(executor: &E) -> Self {
        Self {
            clusters: Clusters::new(executor.clone()),
            endpoints: Endpoints::new(executor.clone()),
            images: Images::new(executor.clone()),
            instances: Instances::new(executor.clone()),
            jobs: Jobs::new(executor.clone()),
            metrics: Metrics::new(executor.clone()),
            networks: Networks::new(executor.clone()),
            products: Products::new(executor.clone()),
            registries: Registries::new(executor.clone()),
            storages: Storages::new(executor.clone()),
            templates: Templates::new(executor.clone()),
            ssh_keys: SshKeys::new(executor.clone()),
        }
    }
}
