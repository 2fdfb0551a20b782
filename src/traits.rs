use crate::{
    error::Result,
    models::{DomainMetrics, DomainQuery, GenerationRequest},
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Produces one image and writes it to `request.output_path`.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf>;
}

/// Fetches organic-search metrics for a domain. An empty vec means the API had no data.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn domain_metrics(&self, query: &DomainQuery) -> Result<Vec<DomainMetrics>>;
}

/// Suspends between batch requests.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
