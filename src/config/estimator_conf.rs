use serde::{Deserialize, Serialize};
use std::env;
use tracing::{error, info, warn};

use crate::config::ConfigError;

/// Configuration for the external cost-estimation service.
///
/// The estimator is a best-effort collaborator: requests are bounded by
/// `timeout_secs` and callers are expected to fall back to a zero estimate
/// when the service is unreachable or misbehaving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Full URL the estimation request is POSTed to
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EstimatorConfig {
    /// Load estimator configuration from environment variables
    ///
    /// Expected environment variables:
    /// - ESTIMATOR_URL: estimation service endpoint (required)
    /// - ESTIMATOR_TIMEOUT_SECS: request timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading estimator configuration from environment variables");

        let url = env::var("ESTIMATOR_URL").map_err(|_| {
            error!("ESTIMATOR_URL environment variable not found");
            ConfigError::EnvVarNotFound("ESTIMATOR_URL".to_string())
        })?;

        let timeout_secs = env::var("ESTIMATOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| {
                warn!("ESTIMATOR_TIMEOUT_SECS not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid ESTIMATOR_TIMEOUT_SECS value");
                ConfigError::InvalidValue("Invalid ESTIMATOR_TIMEOUT_SECS value".to_string())
            })?;

        let config = EstimatorConfig { url, timeout_secs };
        config.validate()?;
        info!("Estimator configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "Estimator URL cannot be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Estimator timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            url: "http://localhost:4000/estimate".to_string(),
            timeout_secs: 5,
        }
    }
}
