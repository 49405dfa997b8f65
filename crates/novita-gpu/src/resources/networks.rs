//! VPC networks.

use super::{post, post_validated};
use crate::models::network::{NetworkList, NetworkRef};
use crate::models::{CreateNetworkRequest, Network, UpdateNetworkRequest};
use novita_core::id::NetworkId;
use novita_core::query::QueryParams;
use novita_core::{ApiRequest, Executor, Operation};

/// Network operations.
#[derive(Debug, Clone)]
pub struct Networks<E> {
    executor: E,
}

impl<E: Executor> Networks<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List networks.
    pub fn list(&self) -> E::Output<Vec<Network>> {
        self.executor.execute(
            Operation::<NetworkList>::json(Ok(ApiRequest::get("networks")))
                .map(|list| list.network),
        )
    }

    /// Fetch a single network.
    ///
    /// The server answers an unknown ID with an empty list; that is reported
    /// as [`Error::NotFound`](novita_core::Error::NotFound).
    pub fn get(&self, network_id: &NetworkId) -> E::Output<Network> {
        let request = ApiRequest::get("network")
            .with_query(QueryParams::new().with("networkId", network_id));
        self.executor
            .execute(Operation::new(Ok(request), Network::from_single))
    }

    /// Create a network.
    pub fn create(&self, request: &CreateNetworkRequest) -> E::Output<Network> {
        self.executor.execute(Operation::new(
            post_validated("network/create", request),
            Network::from_single,
        ))
    }

    /// Rename a network.
    pub fn update(&self, request: &UpdateNetworkRequest) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post_validated("network/update", request)))
    }

    /// Delete a network.
    pub fn delete(&self, network_id: &NetworkId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("network/delete", &NetworkRef { network_id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::Capture;
    use novita_core::Error;

    #[test]
    fn test_get_empty_list_is_not_found() {
        let op = Networks::new(Capture).get(&NetworkId::new("net-404"));
        assert_eq!(op.request().unwrap().target(), "GET /network?networkId=net-404");
        let err = op.decode(br#"{"network": []}"#).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_list_accepts_both_envelope_keys() {
        let networks = Networks::new(Capture);
        let a = networks
            .list()
            .decode(br#"{"network": [{"id": "net-1", "name": "a"}]}"#)
            .unwrap();
        let b = networks
            .list()
            .decode(br#"{"networks": [{"id": "net-1", "name": "a"}]}"#)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }
}
