//! Network storage volumes.

use super::{post, post_validated};
use crate::models::storage::StorageRef;
use crate::models::{
    CreateNetworkStorageRequest, DataList, NetworkStorage, UpdateNetworkStorageRequest,
};
use novita_core::id::StorageId;
use novita_core::{ApiRequest, Executor, Operation};

/// Network storage operations.
#[derive(Debug, Clone)]
pub struct Storages<E> {
    executor: E,
}

impl<E: Executor> Storages<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List network storages. A `null` list is returned as empty.
    pub fn list(&self) -> E::Output<Vec<NetworkStorage>> {
        self.executor.execute(
            Operation::<DataList<NetworkStorage>>::json(Ok(ApiRequest::get(
                "networkstorages/list",
            )))
            .map(|list| list.data),
        )
    }

    /// Create a network storage.
    pub fn create(&self, request: &CreateNetworkStorageRequest) -> E::Output<NetworkStorage> {
        self.executor.execute(Operation::<NetworkStorage>::json(
            post_validated("networkstorage/create", request),
        ))
    }

    /// Rename or grow a network storage.
    pub fn update(&self, request: &UpdateNetworkStorageRequest) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post_validated("networkstorage/update", request)))
    }

    /// Delete a network storage.
    pub fn delete(&self, storage_id: &StorageId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("networkstorage/delete", &StorageRef { storage_id })))
    }
}
