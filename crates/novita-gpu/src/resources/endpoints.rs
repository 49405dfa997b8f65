//! Serverless endpoints.

use super::{post, post_validated};
use crate::models::endpoint::{EndpointEnvelope, EndpointList, EndpointRef};
use crate::models::{
    CreateEndpointRequest, CreateEndpointResponse, Endpoint, EndpointLimitRanges,
    UpdateEndpointRequest,
};
use novita_core::id::EndpointId;
use novita_core::query::QueryParams;
use novita_core::{ApiRequest, Executor, Operation};

/// Serverless endpoint operations.
#[derive(Debug, Clone)]
pub struct Endpoints<E> {
    executor: E,
}

impl<E: Executor> Endpoints<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Fetch the allowed ranges for endpoint parameters.
    pub fn get_limit_ranges(&self) -> E::Output<EndpointLimitRanges> {
        self.executor
            .execute(Operation::<EndpointLimitRanges>::json(Ok(ApiRequest::get("endpoint/limit"))))
    }

    /// Create an endpoint.
    pub fn create(&self, request: &CreateEndpointRequest) -> E::Output<CreateEndpointResponse> {
        self.executor.execute(Operation::<CreateEndpointResponse>::json(
            post_validated("endpoint/create", request),
        ))
    }

    /// List endpoints.
    pub fn list(&self) -> E::Output<Vec<Endpoint>> {
        self.executor.execute(
            Operation::<EndpointList>::json(Ok(ApiRequest::get("endpoints")))
                .map(|list| list.endpoints),
        )
    }

    /// Fetch a single endpoint.
    pub fn get(&self, id: &EndpointId) -> E::Output<Endpoint> {
        let request = ApiRequest::get("endpoint").with_query(QueryParams::new().with("id", id));
        self.executor.execute(
            Operation::<EndpointEnvelope>::json(Ok(request)).map(EndpointEnvelope::into_inner),
        )
    }

    /// Update an endpoint.
    pub fn update(&self, request: &UpdateEndpointRequest) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post_validated("endpoint/update", request)))
    }

    /// Delete an endpoint.
    pub fn delete(&self, id: &EndpointId) -> E::Output<()> {
        self.executor
            .execute(Operation::unit(post("endpoint/delete", &EndpointRef { id })))
    }
}
