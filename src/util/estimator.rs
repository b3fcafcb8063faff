use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::estimator_conf::EstimatorConfig;

#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    #[error("estimation request failed: {0}")]
    Request(String),

    #[error("estimation service returned status {0}")]
    Status(u16),

    #[error("invalid estimation response: {0}")]
    InvalidResponse(String),
}

/// External cost-estimation collaborator. Callers are expected to treat any
/// error as "no estimate" rather than failing their own operation.
#[async_trait]
pub trait Estimator: Send + Sync {
    async fn estimate(&self, description: &str, category: &str) -> Result<f64, EstimatorError>;
}

#[derive(Debug, Serialize)]
struct EstimateRequest<'a> {
    description: &'a str,
    category: &'a str,
}

#[derive(Debug, Deserialize)]
struct EstimateResponse {
    #[serde(rename = "aiEstimate")]
    ai_estimate: f64,
}

pub struct HttpEstimator {
    client: reqwest::Client,
    config: EstimatorConfig,
}

impl HttpEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self, EstimatorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EstimatorError::Request(e.to_string()))?;
        Ok(HttpEstimator { client, config })
    }
}

#[async_trait]
impl Estimator for HttpEstimator {
    #[tracing::instrument(skip(self, description))]
    async fn estimate(&self, description: &str, category: &str) -> Result<f64, EstimatorError> {
        let response = self
            .client
            .post(&self.config.url)
            .json(&EstimateRequest {
                description,
                category,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Estimation request failed: {}", e);
                EstimatorError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Estimation service returned status {}", status);
            return Err(EstimatorError::Status(status.as_u16()));
        }

        let body: EstimateResponse = response.json().await.map_err(|e| {
            error!("Failed to parse estimation response: {}", e);
            EstimatorError::InvalidResponse(e.to_string())
        })?;

        debug!(estimate = body.ai_estimate, "Estimate received");
        Ok(body.ai_estimate)
    }
}
