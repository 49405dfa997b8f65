//! Image prewarm models.
//!
//! A prewarm task caches a container image on the nodes serving a set of
//! products so that instances start without pulling.

use novita_core::id::{ClusterId, PrewarmTaskId, ProductId, RegistryAuthId};
use novita_core::serde_helpers::{null_as_default, option_from_str_or_number};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An image prewarm task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePrewarmTask {
    /// Task ID
    pub id: PrewarmTaskId,
    /// Image being prewarmed
    pub image_url: String,
    /// Cluster the image is cached in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<ClusterId>,
    /// Cluster display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Products whose nodes hold the image
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_ids: Vec<ProductId>,
    /// Task state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Image size in bytes
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_size: Option<u64>,
    /// Creation time as sent by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Request body for creating a prewarm task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateImagePrewarmRequest {
    /// Image to prewarm
    #[validate(length(min = 1))]
    pub image_url: String,
    /// Cluster to cache the image in
    pub cluster_id: ClusterId,
    /// Products whose nodes should hold the image
    #[validate(length(min = 1))]
    pub product_ids: Vec<ProductId>,
    /// Registry credential for private images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_auth_id: Option<RegistryAuthId>,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Response of prewarm task creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateImagePrewarmResponse {
    /// ID of the new task
    pub id: PrewarmTaskId,
}

/// Request body for editing a prewarm task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImagePrewarmRequest {
    /// Task to edit
    pub id: PrewarmTaskId,
    /// Replacement product list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<ProductId>>,
    /// Replacement note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Prewarm quota of the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePrewarmQuota {
    /// Maximum number of tasks
    #[serde(default, alias = "limit")]
    pub quota: u32,
    /// Tasks currently in use
    #[serde(default)]
    pub used: u32,
}

impl ImagePrewarmQuota {
    /// Tasks that can still be created.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.quota.saturating_sub(self.used)
    }
}

/// Prewarm listing; `tasks` is accepted in place of `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct PrewarmTaskList {
    #[serde(alias = "tasks", deserialize_with = "null_as_default")]
    pub(crate) data: Vec<ImagePrewarmTask>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PrewarmTaskRef<'a> {
    pub(crate) id: &'a PrewarmTaskId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_list_accepts_both_keys() {
        let task = json!({"id": "pw-1", "imageUrl": "ubuntu:22.04"});
        let data: PrewarmTaskList = serde_json::from_value(json!({"data": [task]})).unwrap();
        let tasks: PrewarmTaskList = serde_json::from_value(json!({"tasks": [task]})).unwrap();
        assert_eq!(data.data, tasks.data);
        assert!(serde_json::from_value::<PrewarmTaskList>(json!({"code": 0})).is_err());
    }

    #[test]
    fn test_quota_remaining() {
        let quota: ImagePrewarmQuota = serde_json::from_value(json!({"quota": 10, "used": 3})).unwrap();
        assert_eq!(quota.remaining(), 7);

        let over = ImagePrewarmQuota { quota: 1, used: 2 };
        assert_eq!(over.remaining(), 0);
    }

    #[test]
    fn test_create_request_body() {
        let request = CreateImagePrewarmRequest {
            image_url: "docker.io/library/ubuntu:22.04".into(),
            cluster_id: ClusterId::new("us-west-1"),
            product_ids: vec![ProductId::new("gpu-a10")],
            registry_auth_id: None,
            note: Some("warm".into()),
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "imageUrl": "docker.io/library/ubuntu:22.04",
                "clusterId": "us-west-1",
                "productIds": ["gpu-a10"],
                "note": "warm"
            })
        );
    }
}
