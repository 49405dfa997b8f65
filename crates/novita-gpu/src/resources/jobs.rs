//! Background jobs.

use super::post;
use crate::models::job::{JobList, JobRef};
use crate::models::{Job, JobListParams};
use novita_core::id::JobId;
use novita_core::{ApiRequest, Executor, Operation};

/// Job operations.
#[derive(Debug, Clone)]
pub struct Jobs<E> {
    executor: E,
}

impl<E: Executor> Jobs<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List jobs with default paging.
    pub fn list(&self) -> E::Output<Vec<Job>> {
        self.list_with(&JobListParams::default())
    }

    /// List jobs matching `params`.
    pub fn list_with(&self, params: &JobListParams) -> E::Output<Vec<Job>> {
        let request = ApiRequest::get("jobs").with_query(params.to_query());
        self.executor
            .execute(Operation::<JobList>::json(Ok(request)).map(|list| list.jobs))
    }

    /// Abort a running job.
    pub fn break_job(&self, job_id: &JobId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("job/break", &JobRef { job_id })))
    }
}
