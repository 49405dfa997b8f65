//! Asynchronous job models.

use novita_core::id::{InstanceId, JobId};
use novita_core::query::QueryParams;
use novita_core::serde_helpers::null_as_default;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A background job, such as saving an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Job ID
    #[serde(alias = "Id", alias = "jobId")]
    pub id: JobId,
    /// Job type (`saveImage`, ...)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Job status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Detailed state object, as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    /// Instance the job operates on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<InstanceId>,
    /// Creation time as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Filters accepted by the job list endpoint.
#[derive(Debug, Default, Clone)]
pub struct JobListParams {
    /// Page size
    pub page_size: Option<u32>,
    /// Page number
    pub page_num: Option<u32>,
    /// Filter by job type
    pub kind: Option<String>,
    /// Filter by job state
    pub state: Option<String>,
}

impl JobListParams {
    /// Convert the parameters into query pairs.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("pageSize", self.page_size);
        params.push_opt("pageNum", self.page_num);
        params.push_opt("type", self.kind.as_deref());
        params.push_opt("state", self.state.as_deref());
        params
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobList {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobRef<'a> {
    pub(crate) job_id: &'a JobId,
}
