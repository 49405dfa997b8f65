//! Network storage models.

use novita_core::id::{ClusterId, StorageId};
use novita_core::price::RawPrice;
use novita_core::serde_helpers::option_from_str_or_number;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A network volume that can be mounted into instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStorage {
    /// Storage ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<StorageId>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
    /// Size in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_size: Option<u32>,
    /// Cluster the storage lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<ClusterId>,
    /// Cluster display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Raw price
    #[serde(
        default,
        rename = "price",
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_price: Option<RawPrice>,
}

impl NetworkStorage {
    /// Price in US dollars.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.raw_price.map(RawPrice::to_usd)
    }
}

/// Request body for creating a network storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNetworkStorageRequest {
    /// Cluster to create the storage in
    pub cluster_id: ClusterId,
    /// Display name
    #[validate(length(min = 1))]
    pub storage_name: String,
    /// Size in GB
    #[validate(range(min = 10, max = 10240))]
    pub storage_size: u32,
}

/// Request body for renaming or resizing a network storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNetworkStorageRequest {
    /// Storage to update
    pub storage_id: StorageId,
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
    /// New size in GB; storage can only grow
    #[validate(range(min = 10, max = 10240))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_size: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StorageRef<'a> {
    pub(crate) storage_id: &'a StorageId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_storage_size_from_string() {
        let storage: NetworkStorage = serde_json::from_value(json!({
            "storageId": "stor-1",
            "storageName": "data",
            "storageSize": "500",
            "clusterId": "c-1",
            "price": 700
        }))
        .unwrap();
        assert_eq!(storage.storage_size, Some(500));
        assert_eq!(storage.price(), Some(0.007));
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateNetworkStorageRequest {
            cluster_id: ClusterId::new("c-1"),
            storage_name: "data".into(),
            storage_size: 5,
        };
        assert!(request.validate().is_err());
    }
}
