use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::job_dto::CreateJobRequest;
use crate::model::job::{Job, JobStatus};
use crate::model::notification::{NotificationType, RelatedType};
use crate::repository::job_repo::JobRepository;
use crate::repository::quote_repo::QuoteRepository;
use crate::service::notification_service::NotificationService;
use crate::util::error::ServiceError;
use crate::util::estimator::Estimator;

/// Category sent to the estimation service; job requests carry none.
const ESTIMATE_CATEGORY: &str = "general";

#[async_trait]
pub trait JobService: Send + Sync {
    async fn create_job(&self, request: CreateJobRequest) -> Result<Job, ServiceError>;
    async fn get_job(&self, id: ObjectId) -> Result<Job, ServiceError>;
    async fn cancel_job(
        &self,
        id: ObjectId,
        reason: &str,
        acting_user_id: &str,
    ) -> Result<Job, ServiceError>;
}

pub struct JobServiceImpl {
    pub job_repo: Arc<dyn JobRepository>,
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub notifications: Arc<dyn NotificationService>,
    pub estimator: Arc<dyn Estimator>,
}

impl JobServiceImpl {
    /// Estimation failures never block job creation; anything other than a
    /// usable non-negative number becomes a zero estimate.
    async fn estimate_or_zero(&self, description: &str) -> f64 {
        match self.estimator.estimate(description, ESTIMATE_CATEGORY).await {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            Ok(value) => {
                warn!(value, "Estimator returned unusable value, falling back to 0");
                0.0
            }
            Err(e) => {
                warn!("Estimation failed, falling back to 0: {e}");
                0.0
            }
        }
    }
}

#[async_trait]
impl JobService for JobServiceImpl {
    #[instrument(skip(self, request))]
    async fn create_job(&self, request: CreateJobRequest) -> Result<Job, ServiceError> {
        if request.description.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Description is required".to_string(),
            ));
        }

        let ai_estimate = self.estimate_or_zero(&request.description).await;

        let job = Job {
            id: None,
            description: request.description,
            status: JobStatus::Published,
            ai_estimate,
            photo_keys: request.photo_keys,
            owner_id: request.user_id.filter(|s| !s.trim().is_empty()),
            created_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            cancelled_by: None,
        };

        let created = self.job_repo.create(job).await.map_err(ServiceError::from)?;
        info!(ai_estimate, "Job created and published");
        Ok(created)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_job(&self, id: ObjectId) -> Result<Job, ServiceError> {
        self.job_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    /// Terminal transition. The acting user is recorded but not checked
    /// against the job owner.
    ///
    /// The status flip and the per-contractor notification inserts are
    /// separate statements, not one transaction: a crash in between leaves
    /// the job cancelled with some contractors un-notified.
    #[instrument(skip(self, reason), fields(id = %id, acting_user_id = %acting_user_id))]
    async fn cancel_job(
        &self,
        id: ObjectId,
        reason: &str,
        acting_user_id: &str,
    ) -> Result<Job, ServiceError> {
        if reason.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Cancellation reason is required".to_string(),
            ));
        }

        let job = self
            .job_repo
            .cancel(id, reason, acting_user_id)
            .await
            .map_err(ServiceError::from)?;
        info!("Job cancelled, notifying contractors with active quotes");

        let active_quotes = match self.quote_repo.list_active_by_job(id).await {
            Ok(quotes) => quotes,
            Err(e) => {
                // The cancellation itself is committed; fan-out is best effort.
                error!("Failed to list active quotes for fan-out: {e}");
                return Ok(job);
            }
        };

        let mut notified: HashSet<String> = HashSet::new();
        for quote in &active_quotes {
            if !notified.insert(quote.contractor_id.clone()) {
                continue;
            }
            let message = format!(
                "The job \"{}\" was cancelled by the client. Reason: {}",
                job.description, reason
            );
            if let Err(e) = self
                .notifications
                .append(
                    &quote.contractor_id,
                    NotificationType::JobCancelled,
                    "Job cancelled",
                    &message,
                    job.id,
                    Some(RelatedType::Job),
                )
                .await
            {
                error!(
                    contractor_id = %quote.contractor_id,
                    "Failed to notify contractor of job cancellation: {e}"
                );
            }
        }
        info!(count = notified.len(), "Contractor fan-out complete");

        Ok(job)
    }
}
