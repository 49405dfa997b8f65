//! Image prewarm tasks.

use super::{post, post_validated};
use crate::models::image::{PrewarmTaskList, PrewarmTaskRef};
use crate::models::{
    CreateImagePrewarmRequest, CreateImagePrewarmResponse, ImagePrewarmQuota,
    ImagePrewarmTask, UpdateImagePrewarmRequest,
};
use novita_core::id::PrewarmTaskId;
use novita_core::{ApiRequest, Executor, Operation};

/// Image prewarm operations.
#[derive(Debug, Clone)]
pub struct Images<E> {
    executor: E,
}

impl<E: Executor> Images<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List prewarm tasks.
    pub fn list(&self) -> E::Output<Vec<ImagePrewarmTask>> {
        self.executor.execute(
            Operation::<PrewarmTaskList>::json(Ok(ApiRequest::get("image/prewarm")))
                .map(|list| list.data),
        )
    }

    /// Create a prewarm task.
    pub fn create(
        &self,
        request: &CreateImagePrewarmRequest,
    ) -> E::Output<CreateImagePrewarmResponse> {
        self.executor.execute(Operation::<CreateImagePrewarmResponse>::json(
            post_validated("image/prewarm", request),
        ))
    }

    /// Edit a prewarm task.
    pub fn update(&self, request: &UpdateImagePrewarmRequest) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("image/prewarm/edit", request)))
    }

    /// Delete a prewarm task.
    pub fn delete(&self, id: &PrewarmTaskId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("image/prewarm/delete", &PrewarmTaskRef { id })))
    }

    /// Fetch the prewarm quota.
    pub fn get_quota(&self) -> E::Output<ImagePrewarmQuota> {
        self.executor.execute(Operation::<ImagePrewarmQuota>::json(
            Ok(ApiRequest::get("image/prewarm/quota")),
        ))
    }
}
