//! GPU and CPU instance lifecycle.

use super::{post, post_validated};
use crate::models::instance::{InstanceList, InstanceMonths, InstanceRef, SaveImageResponse};
use crate::models::{
    CreateInstanceRequest, CreateInstanceResponse, EditInstanceRequest, Instance,
    InstanceListParams, SaveImageRequest, UpgradeInstanceRequest,
};
use crate::ssh::{self, SshEndpoint};
use novita_core::id::{InstanceId, JobId};
use novita_core::query::QueryParams;
use novita_core::{ApiRequest, Executor, Operation};
use tracing::debug;

/// Instance operations.
#[derive(Debug, Clone)]
pub struct Instances<E> {
    executor: E,
}

impl<E: Executor> Instances<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Create an instance.
    ///
    /// The request is validated locally; an invalid request fails with
    /// [`Error::Validation`](novita_core::Error::Validation) and is never sent.
    pub fn create(&self, request: &CreateInstanceRequest) -> E::Output<CreateInstanceResponse> {
        self.executor.execute(Operation::<CreateInstanceResponse>::json(
            post_validated("gpu/instance/create", request),
        ))
    }

    /// List instances with default paging.
    pub fn list(&self) -> E::Output<Vec<Instance>> {
        self.list_with(&InstanceListParams::default())
    }

    /// List instances matching `params`.
    pub fn list_with(&self, params: &InstanceListParams) -> E::Output<Vec<Instance>> {
        let request = ApiRequest::get("gpu/instances").with_query(params.to_query());
        self.executor
            .execute(Operation::<InstanceList>::json(Ok(request)).map(|list| list.instances))
    }

    /// Fetch a single instance.
    pub fn get(&self, instance_id: &InstanceId) -> E::Output<Instance> {
        self.executor.execute(Operation::<Instance>::json(Ok(get_request(instance_id))))
    }

    /// Change ports, environment or root disk of an instance.
    pub fn edit(&self, request: &EditInstanceRequest) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post_validated("gpu/instance/edit", request)))
    }

    /// Start a stopped instance.
    pub fn start(&self, instance_id: &InstanceId) -> E::Output<()> {
        self.action("gpu/instance/start", instance_id)
    }

    /// Stop a running instance.
    pub fn stop(&self, instance_id: &InstanceId) -> E::Output<()> {
        self.action("gpu/instance/stop", instance_id)
    }

    /// Restart an instance.
    pub fn restart(&self, instance_id: &InstanceId) -> E::Output<()> {
        self.action("gpu/instance/restart", instance_id)
    }

    /// Delete an instance.
    pub fn delete(&self, instance_id: &InstanceId) -> E::Output<()> {
        self.action("gpu/instance/delete", instance_id)
    }

    /// Replace the image, environment or volumes of an instance.
    pub fn upgrade(&self, request: &UpgradeInstanceRequest) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("gpu/instance/upgrade", request)))
    }

    /// Move an instance to another host.
    pub fn migrate(&self, instance_id: &InstanceId) -> E::Output<()> {
        self.action("gpu/instance/migrate", instance_id)
    }

    /// Extend a monthly instance by `month` months.
    pub fn renew(&self, instance_id: &InstanceId, month: u32) -> E::Output<()> {
        let body = InstanceMonths { instance_id, month };
        self.executor
            .execute(Operation::unit(post("gpu/instance/renewInstance", &body)))
    }

    /// Switch an on-demand instance to monthly billing for `month` months.
    pub fn convert_to_monthly(&self, instance_id: &InstanceId, month: u32) -> E::Output<()> {
        let body = InstanceMonths { instance_id, month };
        self.executor
            .execute(Operation::unit(post("gpu/instance/transToMonthlyInstance", &body)))
    }

    /// Save the instance's container as an image; returns the job tracking it.
    pub fn save_image(&self, request: &SaveImageRequest) -> E::Output<JobId> {
        self.executor.execute(
            Operation::<SaveImageResponse>::json(post("job/save/image", request))
                .map(|response| response.job_id),
        )
    }

    /// Fetch the instance and work out how to SSH into it.
    ///
    /// Fails with [`Error::NotFound`](novita_core::Error::NotFound) when the
    /// instance exposes no SSH access.
    pub fn get_ssh_endpoint(&self, instance_id: &InstanceId) -> E::Output<SshEndpoint> {
        self.executor.execute(
            Operation::<Instance>::json(Ok(get_request(instance_id))).and_then(|instance| {
                let endpoint = ssh::extract(&instance)?;
                debug!(instance = %instance.id, endpoint = %endpoint, "resolved ssh endpoint");
                Ok(endpoint)
            }),
        )
    }

    fn action(&self, path: &'static str, instance_id: &InstanceId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post(path, &InstanceRef { instance_id })))
    }
}

fn get_request(instance_id: &InstanceId) -> ApiRequest {
    ApiRequest::get("gpu/instance").with_query(QueryParams::new().with("instanceId", instance_id))
}
