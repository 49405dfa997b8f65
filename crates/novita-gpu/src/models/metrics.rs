//! Instance metrics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Utilisation metrics for one instance.
///
/// The metric set varies by instance type, so values are kept by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceMetrics {
    values: Map<String, Value>,
}

impl InstanceMetrics {
    /// Raw value of a metric.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Numeric value of a metric, accepting numeric strings.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.values.get(name)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Names of the metrics present.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Whether no metric was returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_lookup() {
        let metrics: InstanceMetrics = serde_json::from_value(json!({
            "cpuUsage": 45.5,
            "gpuUsage": "85",
            "labels": {"node": "n1"}
        }))
        .unwrap();
        assert_eq!(metrics.get_f64("cpuUsage"), Some(45.5));
        assert_eq!(metrics.get_f64("gpuUsage"), Some(85.0));
        assert_eq!(metrics.get_f64("labels"), None);
        assert_eq!(metrics.names().count(), 3);
    }
}
