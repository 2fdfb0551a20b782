use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Google location code for the United States.
pub const DEFAULT_LOCATION_CODE: u32 = 2840;
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// One task in a DataForSEO Labs POST body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainQuery {
    pub target: String,
    pub location_code: u32,
    pub language_code: String,
}

impl DomainQuery {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            location_code: DEFAULT_LOCATION_CODE,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }

    pub fn with_location(mut self, location_code: u32) -> Self {
        self.location_code = location_code;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainMetrics {
    pub domain: String,
    pub location_code: u32,
    pub organic_traffic: f64,
    pub keywords: f64,
    pub top_3_positions: u64,
}

impl DomainMetrics {
    /// Builds metrics from one result object. Each field is read on its own;
    /// an absent, null or non-numeric field counts as zero.
    pub fn from_result(domain: &str, location_code: u32, result: &Value) -> Self {
        let organic = result.pointer("/metrics/organic");
        let field = |key: &str| {
            organic
                .and_then(|o| o.get(key))
                .and_then(Value::as_f64)
                .unwrap_or(0.0)
        };

        Self {
            domain: domain.to_string(),
            location_code,
            organic_traffic: field("etv"),
            keywords: field("count"),
            top_3_positions: (field("pos_1") + field("pos_2_3")).max(0.0).round() as u64,
        }
    }
}

// DataForSEO v3 envelope

#[derive(Debug, Deserialize)]
pub struct DataForSeoResponse {
    pub status_code: u32,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub tasks: Vec<DataForSeoTask>,
}

#[derive(Debug, Deserialize)]
pub struct DataForSeoTask {
    pub status_code: u32,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub result: Option<Vec<Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metrics_from_full_result() {
        let result = json!({
            "metrics": {
                "organic": { "etv": 100, "count": 50, "pos_1": 3, "pos_2_3": 7 }
            }
        });
        let metrics = DomainMetrics::from_result("example.com", 2840, &result);
        assert_eq!(metrics.organic_traffic, 100.0);
        assert_eq!(metrics.keywords, 50.0);
        assert_eq!(metrics.top_3_positions, 10);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let partial = json!({ "metrics": { "organic": { "etv": null, "pos_2_3": 4 } } });
        let metrics = DomainMetrics::from_result("example.com", 2840, &partial);
        assert_eq!(metrics.organic_traffic, 0.0);
        assert_eq!(metrics.keywords, 0.0);
        assert_eq!(metrics.top_3_positions, 4);

        let bare = json!({ "se_type": "google" });
        let metrics = DomainMetrics::from_result("example.com", 2826, &bare);
        assert_eq!(metrics.location_code, 2826);
        assert_eq!(metrics.top_3_positions, 0);
    }

    #[test]
    fn test_mistyped_field_only_zeroes_itself() {
        let result = json!({
            "metrics": {
                "organic": { "etv": 100, "count": "50", "pos_1": 3, "pos_2_3": 7 }
            }
        });
        let metrics = DomainMetrics::from_result("example.com", 2840, &result);
        assert_eq!(metrics.organic_traffic, 100.0);
        assert_eq!(metrics.keywords, 0.0);
        assert_eq!(metrics.top_3_positions, 10);
    }

    #[test]
    fn test_query_body_shape() {
        let query = DomainQuery::new("example.com").with_location(2826);
        assert_eq!(
            serde_json::to_value(vec![query]).unwrap(),
            json!([{ "target": "example.com", "location_code": 2826, "language_code": "en" }])
        );
    }
}
