use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a job.
///
/// `Cancelled` is terminal for the job-cancellation path. The only transition
/// out of any progressed status is the revert-to-`Published` triggered by a
/// quote cancellation, which never applies to an already-cancelled job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Published,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Published => "published",
            JobStatus::Assigned => "assigned",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A client's posted work request. Never deleted; cancellation is recorded
/// in place via the nullable cancellation fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub description: String,
    pub status: JobStatus,
    pub ai_estimate: f64,
    pub photo_keys: Vec<String>,
    pub owner_id: Option<String>,
    pub created_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tags_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&JobStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(JobStatus::Cancelled.as_str(), "cancelled");
    }
}
