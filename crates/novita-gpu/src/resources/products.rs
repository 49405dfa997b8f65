//! GPU and CPU product catalogue.

use crate::models::{CpuProduct, CpuProductListParams, DataList, GpuProduct, ProductListParams};
use novita_core::{ApiRequest, Executor, Operation};

/// Product operations.
#[derive(Debug, Clone)]
pub struct Products<E> {
    executor: E,
}

impl<E: Executor> Products<E> {
    pub(crate) fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List every GPU product.
    pub fn list(&self) -> E::Output<Vec<GpuProduct>> {
        self.list_with(&ProductListParams::default())
    }

    /// List GPU products matching `params`.
    pub fn list_with(&self, params: &ProductListParams) -> E::Output<Vec<GpuProduct>> {
        let request = ApiRequest::get("products").with_query(params.to_query());
        self.executor
            .execute(Operation::<DataList<GpuProduct>>::json(Ok(request)).map(|list| list.data))
    }

    /// List every CPU product.
    pub fn list_cpu(&self) -> E::Output<Vec<CpuProduct>> {
        self.list_cpu_with(&CpuProductListParams::default())
    }

    /// List CPU products matching `params`.
    pub fn list_cpu_with(&self, params: &CpuProductListParams) -> E::Output<Vec<CpuProduct>> {
        let request = ApiRequest::get("cpu/products").with_query(params.to_query());
        self.executor
            .execute(Operation::<DataList<CpuProduct>>::json(Ok(request)).map(|list| list.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillingMode;
    use crate::resources::testing::Capture;
    use novita_core::id::ClusterId;

    #[test]
    fn test_filters_become_camel_case_query() {
        let params = ProductListParams {
            cluster_id: Some(ClusterId::new("c-1")),
            gpu_num: Some(2),
            billing_method: Some(BillingMode::Spot),
            ..ProductListParams::default()
        };
        let op = Products::new(Capture).list_with(&params);
        assert_eq!(
            op.request().unwrap().target(),
            "GET /products?clusterId=c-1&gpuNum=2&billingMethod=spot"
        );
    }

    #[test]
    fn test_list_unwraps_data() {
        let op = Products::new(Capture).list_cpu();
        let products = op
            .decode(br#"{"data": [{"id": "cpu-1", "name": "4 vCPU", "price": 12000}]}"#)
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price(), Some(0.12));
    }
}
