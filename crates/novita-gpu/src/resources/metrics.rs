//! Instance metrics.

use crate::models::InstanceMetrics;
use novita_core::id::InstanceId;
use novita_core::query::QueryParams;
use novita_core::{ApiRequest, Executor, Operation};

/// Metrics operations.
#[derive(Debug, Clone)]
pub struct Metrics<E> {
    executor: E,
}

impl<E: Executor> Metrics<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Fetch the current metrics of an instance.
    pub fn get(&self, instance_id: &InstanceId) -> E::Output<InstanceMetrics> {
        let request = ApiRequest::get("instance/metrics")
            .with_query(QueryParams::new().with("instanceId", instance_id));
        self.executor.execute(Operation::<InstanceMetrics>::json(Ok(request)))
    }
}
