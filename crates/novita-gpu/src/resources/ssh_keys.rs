//! SSH public keys.

use super::{post, post_validated};
use crate::models::{CreateSshKeyRequest, DataList, SshKey};
use novita_core::id::SshKeyId;
use novita_core::{ApiRequest, Executor, Operation};
use serde::Serialize;

#[derive(Serialize)]
struct SshKeyRef<'a> {
    id: &'a SshKeyId,
}

/// SSH key operations.
#[derive(Debug, Clone)]
pub struct SshKeys<E> {
    executor: E,
}

impl<E: Executor> SshKeys<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List registered keys.
    pub fn list(&self) -> E::Output<Vec<SshKey>> {
        self.executor.execute(
            Operation::<DataList<SshKey>>::json(Ok(ApiRequest::get("ssh-keys")))
                .map(|list| list.data),
        )
    }

    /// Register a public key.
    pub fn create(&self, request: &CreateSshKeyRequest) -> E::Output<SshKey> {
        self.executor
            .execute(Operation::<SshKey>::json(post_validated("ssh-key/create", request)))
    }

    /// Remove a registered key.
    pub fn delete(&self, id: &SshKeyId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("ssh-key/delete", &SshKeyRef { id })))
    }
}
