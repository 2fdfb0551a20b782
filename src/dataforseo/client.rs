use crate::{
    config::DataForSeoConfig,
    error::{Result, SkillError},
    models::{DataForSeoResponse, DomainMetrics, DomainQuery},
    traits::MetricsSource,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const DOMAIN_METRICS_ENDPOINT: &str =
    "dataforseo_labs/google/domain_metrics_by_categories/live";

/// DataForSEO reports success with this code at both envelope and task level.
const STATUS_OK: u32 = 20000;

#[derive(Clone)]
pub struct DataForSeoClient {
    client: Client,
    base_url: String,
    login: String,
    password: String,
}

impl DataForSeoClient {
    pub fn new(config: DataForSeoConfig) -> Result<Self> {
        let (login, password) = config.require_credentials()?;
        let (login, password) = (login.to_string(), password.to_string());
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SkillError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login,
            password,
        })
    }

    pub async fn api_post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<DataForSeoResponse> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        log::info!("POST {}", url);

        let _timer = crate::logger::timer(endpoint);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.login, Some(&self.password))
            .json(body)
            .send()
            .await
            .map_err(|e| SkillError::RequestError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

/// Parses a reply body, mapping non-2xx HTTP statuses to `ApiError` with the raw body.
pub fn parse_response(status: u16, body: &str) -> Result<DataForSeoResponse> {
    if !(200..300).contains(&status) {
        return Err(SkillError::ApiError {
            status: u32::from(status),
            message: body.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| SkillError::ResponseError(e.to_string()))
}

/// Collects result objects from every task, descending into `items` where the
/// endpoint nests them. Envelope or task errors are returned as `ApiError`.
pub fn get_result(response: &DataForSeoResponse) -> Result<Vec<Value>> {
    if response.status_code != STATUS_OK {
        return Err(SkillError::ApiError {
            status: response.status_code,
            message: response.status_message.clone(),
        });
    }

    let mut results = Vec::new();
    for task in &response.tasks {
        if task.status_code != STATUS_OK {
            return Err(SkillError::ApiError {
                status: task.status_code,
                message: task.status_message.clone(),
            });
        }
        for entry in task.result.iter().flatten() {
            match entry.get("items") {
                Some(Value::Array(items)) => results.extend(items.iter().cloned()),
                Some(Value::Null) => {}
                _ => results.push(entry.clone()),
            }
        }
    }
    Ok(results)
}

#[async_trait]
impl MetricsSource for DataForSeoClient {
    async fn domain_metrics(&self, query: &DomainQuery) -> Result<Vec<DomainMetrics>> {
        let response = self.api_post(DOMAIN_METRICS_ENDPOINT, &[query]).await?;
        let results = get_result(&response)?;
        log::debug!("{} result(s) for {}", results.len(), query.target);

        Ok(results
            .iter()
            .map(|r| DomainMetrics::from_result(&query.target, query.location_code, r))
            .collect())
    }
}
