//! Cluster listing.

use crate::models::{Cluster, DataList};
use novita_core::{ApiRequest, Executor, Operation};

/// Cluster operations.
#[derive(Debug, Clone)]
pub struct Clusters<E> {
    executor: E,
}

impl<E: Executor> Clusters<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List the clusters available to the account.
    pub fn list(&self) -> E::Output<Vec<Cluster>> {
        self.executor.execute(
            Operation::<DataList<Cluster>>::json(Ok(ApiRequest::get("clusters")))
                .map(|list| list.data),
        )
    }
}
