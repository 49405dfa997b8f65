//! Container registry credentials.

use super::{post, post_validated};
use crate::models::registry::{RepositoryAuthList, RepositoryAuthRef};
use crate::models::{CreateRepositoryAuthRequest, RepositoryAuth};
use novita_core::id::RegistryAuthId;
use novita_core::{ApiRequest, Executor, Operation};

/// Registry credential operations.
#[derive(Debug, Clone)]
pub struct Registries<E> {
    executor: E,
}

impl<E: Executor> Registries<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List stored credentials.
    pub fn list(&self) -> E::Output<Vec<RepositoryAuth>> {
        self.executor.execute(
            Operation::<RepositoryAuthList>::json(Ok(ApiRequest::get("repository/auths")))
                .map(|list| list.data),
        )
    }

    /// Store a credential.
    pub fn create(&self, request: &CreateRepositoryAuthRequest) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post_validated("repository/auth/save", request)))
    }

    /// Delete a stored credential.
    pub fn delete(&self, id: &RegistryAuthId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("repository/auth/delete", &RepositoryAuthRef { id })))
    }
}
