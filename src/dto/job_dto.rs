use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::job::Job;

/// Body of `POST /jobs/create`.
///
/// Fields are defaulted so that a missing field surfaces as a validation
/// failure (400) instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    pub photo_keys: Vec<String>,

    pub user_id: Option<String>,
}

impl Default for CreateJobRequest {
    fn default() -> Self {
        CreateJobRequest {
            description: String::new(),
            photo_keys: Vec::new(),
            user_id: None,
        }
    }
}

/// Body of `POST /jobs/:jobId/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelJobRequest {
    pub reason: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl Default for CancelJobRequest {
    fn default() -> Self {
        CancelJobRequest {
            reason: String::new(),
            user_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub job_id: String,
    #[serde(rename = "aiEstimate")]
    pub ai_estimate: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelJobResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
}

/// Full job record as the UI consumes it (`job_id`/`user_id` wire names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub job_id: String,
    pub description: String,
    pub status: String,
    pub ai_estimate: f64,
    pub photo_keys: Vec<String>,
    pub user_id: Option<String>,
    pub created_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        JobResponse {
            job_id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
            description: job.description,
            status: job.status.to_string(),
            ai_estimate: job.ai_estimate,
            photo_keys: job.photo_keys,
            user_id: job.owner_id,
            created_at: job.created_at,
            cancelled_at: job.cancelled_at,
            cancellation_reason: job.cancellation_reason,
            cancelled_by: job.cancelled_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_description_fails_validation() {
        let req: CreateJobRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_partial_body() {
        let req: CreateJobRequest =
            serde_json::from_str(r#"{"description": "Fix door"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.photo_keys.is_empty());
        assert!(req.user_id.is_none());
    }
}
