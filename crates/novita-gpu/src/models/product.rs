//! Product (instance type) models.
//!
//! Prices are kept in the server's raw unit ([`RawPrice`], 1/100000 USD) and
//! converted on access.

use super::instance::BillingMode;
use novita_core::id::{ClusterId, ProductId};
use novita_core::price::RawPrice;
use novita_core::query::QueryParams;
use novita_core::serde_helpers::{null_as_default, option_from_str_or_number};
use serde::{Deserialize, Serialize};

/// Subscription price for a number of months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPrice {
    /// Raw price for the whole period
    #[serde(rename = "price")]
    pub raw_price: RawPrice,
    /// Subscription length in months
    pub month: u32,
}

impl SubscriptionPrice {
    /// Price in US dollars.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.raw_price.to_usd()
    }
}

/// A GPU product that instances can be created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuProduct {
    /// Product ID
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// vCPUs per GPU
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpu_per_gpu: Option<u32>,
    /// Memory per GPU in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory_per_gpu: Option<u32>,
    /// Disk per GPU in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub disk_per_gpu: Option<u32>,
    /// Whether the product can currently be deployed
    #[serde(default)]
    pub available_deploy: bool,
    /// Minimum root filesystem size in GB
    #[serde(
        default,
        rename = "minRootFS",
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_root_fs: Option<u32>,
    /// Maximum root filesystem size in GB
    #[serde(
        default,
        rename = "maxRootFS",
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_root_fs: Option<u32>,
    /// Minimum local storage in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_local_storage: Option<u32>,
    /// Maximum local storage in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_local_storage: Option<u32>,
    /// Clusters the product is limited to; empty means all
    #[serde(default, deserialize_with = "null_as_default")]
    pub regions: Vec<ClusterId>,
    /// Raw on-demand hourly price
    #[serde(default, rename = "price", skip_serializing_if = "Option::is_none")]
    pub raw_price: Option<RawPrice>,
    /// Subscription prices
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_price: Vec<SubscriptionPrice>,
    /// Supported billing modes (`onDemand`, `monthly`, `spot`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub billing_methods: Vec<String>,
    /// Raw spot hourly price (the server sends it as a string)
    #[serde(
        default,
        rename = "spotPrice",
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_spot_price: Option<RawPrice>,
}

impl GpuProduct {
    /// On-demand hourly price in US dollars.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.raw_price.map(RawPrice::to_usd)
    }

    /// Spot hourly price in US dollars.
    #[must_use]
    pub fn spot_price(&self) -> Option<f64> {
        self.raw_spot_price.map(RawPrice::to_usd)
    }

    /// Whether the product can be billed with `mode`.
    #[must_use]
    pub fn supports(&self, mode: BillingMode) -> bool {
        self.billing_methods.iter().any(|method| method == mode.as_str())
    }
}

/// A CPU-only product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuProduct {
    /// Product ID
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Number of vCPUs
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpu_num: Option<u32>,
    /// Memory in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory_size: Option<u32>,
    /// Root filesystem size in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rootfs_size: Option<u32>,
    /// Local volume size in GB
    #[serde(
        default,
        deserialize_with = "option_from_str_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub local_volume_size: Option<u32>,
    /// Whether the product can currently be deployed
    #[serde(default)]
    pub available_deploy: bool,
    /// Raw on-demand hourly price
    #[serde(default, rename = "price", skip_serializing_if = "Option::is_none")]
    pub raw_price: Option<RawPrice>,
}

impl CpuProduct {
    /// On-demand hourly price in US dollars.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.raw_price.map(RawPrice::to_usd)
    }
}

/// Filters accepted by the GPU product list endpoint.
#[derive(Debug, Default, Clone)]
pub struct ProductListParams {
    /// Only products available in this cluster
    pub cluster_id: Option<ClusterId>,
    /// Number of GPUs the instance will use
    pub gpu_num: Option<u32>,
    /// Fuzzy match on the product name
    pub product_name: Option<String>,
    /// Minimum root filesystem size in GB
    pub min_root_fs: Option<u32>,
    /// Only products supporting this billing mode
    pub billing_method: Option<BillingMode>,
}

impl ProductListParams {
    /// Convert the parameters into query pairs.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("clusterId", self.cluster_id.as_ref());
        params.push_opt("gpuNum", self.gpu_num);
        params.push_opt("productName", self.product_name.as_deref());
        params.push_opt("minRootFS", self.min_root_fs);
        params.push_opt("billingMethod", self.billing_method);
        params
    }
}

/// Filters accepted by the CPU product list endpoint.
#[derive(Debug, Default, Clone)]
pub struct CpuProductListParams {
    /// Only products available in this cluster
    pub cluster_id: Option<ClusterId>,
    /// Fuzzy match on the product name
    pub product_name: Option<String>,
}

impl CpuProductListParams {
    /// Convert the parameters into query pairs.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("clusterId", self.cluster_id.as_ref());
        params.push_opt("productName", self.product_name.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gpu_product_prices() {
        let product: GpuProduct = serde_json::from_value(json!({
            "id": "gpu-a100-80gb",
            "name": "A100 80GB",
            "cpuPerGpu": 8,
            "minRootFS": 20,
            "maxRootFS": 1000,
            "regions": [],
            "price": 350000,
            "monthlyPrice": [{"price": 20000000, "month": 1}],
            "billingMethods": ["onDemand", "monthly"],
            "spotPrice": "200000"
        }))
        .unwrap();

        assert_eq!(product.price(), Some(3.5));
        assert_eq!(product.spot_price(), Some(2.0));
        assert_eq!(product.min_root_fs, Some(20));
        assert!((product.monthly_price[0].price() - 200.0).abs() < f64::EPSILON);
        assert!(product.supports(BillingMode::Monthly));
        assert!(!product.supports(BillingMode::Spot));
    }

    #[test]
    fn test_missing_prices_are_none() {
        let product: GpuProduct = serde_json::from_value(json!({
            "id": "gpu-x",
            "name": "X",
            "spotPrice": ""
        }))
        .unwrap();
        assert_eq!(product.price(), None);
        assert_eq!(product.spot_price(), None);
        assert!(product.monthly_price.is_empty());
    }

    #[test]
    fn test_cpu_product_price() {
        let product: CpuProduct = serde_json::from_value(json!({
            "id": "cpu-4-8",
            "name": "CPU 4 cores 8GB",
            "cpuNum": 4,
            "memorySize": 8,
            "price": 20000
        }))
        .unwrap();
        assert_eq!(product.price(), Some(0.2));
        assert_eq!(product.memory_size, Some(8));
    }

    #[test]
    fn test_product_params() {
        let params = ProductListParams {
            cluster_id: Some(ClusterId::new("us-west-1")),
            min_root_fs: Some(50),
            billing_method: Some(BillingMode::Spot),
            ..ProductListParams::default()
        };
        assert_eq!(
            params.to_query().into_pairs(),
            vec![
                ("clusterId", "us-west-1".to_string()),
                ("minRootFS", "50".to_string()),
                ("billingMethod", "spot".to_string()),
            ]
        );
    }
}
