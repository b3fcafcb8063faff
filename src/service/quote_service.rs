use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::quote_dto::CreateQuoteRequest;
use crate::model::job::JobStatus;
use crate::model::notification::{NotificationType, RelatedType};
use crate::model::quote::{Quote, QuoteStatus};
use crate::repository::job_repo::JobRepository;
use crate::repository::quote_repo::QuoteRepository;
use crate::service::notification_service::NotificationService;
use crate::util::error::ServiceError;

#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn create_quote(&self, request: CreateQuoteRequest) -> Result<Quote, ServiceError>;
    async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError>;
    async fn list_quotes_by_job(&self, job_id: ObjectId) -> Result<Vec<Quote>, ServiceError>;
    async fn list_quotes_by_contractor(
        &self,
        contractor_id: &str,
    ) -> Result<Vec<Quote>, ServiceError>;
    async fn cancel_quote(
        &self,
        id: ObjectId,
        reason: &str,
        contractor_id: &str,
    ) -> Result<Quote, ServiceError>;
}

pub struct QuoteServiceImpl {
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub notifications: Arc<dyn NotificationService>,
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    #[instrument(skip(self, request))]
    async fn create_quote(&self, request: CreateQuoteRequest) -> Result<Quote, ServiceError> {
        let job_id = request
            .job_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ServiceError::InvalidInput("jobId is required".to_string()))?;
        let job_id = ObjectId::parse_str(job_id)
            .map_err(|_| ServiceError::InvalidInput("Invalid jobId".to_string()))?;

        let contractor_id = request
            .contractor_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ServiceError::InvalidInput("contractorId is required".to_string()))?
            .to_string();

        let job = self.job_repo.get_by_id(job_id).await.map_err(ServiceError::from)?;
        if job.status == JobStatus::Cancelled {
            return Err(ServiceError::Conflict(
                "Cannot submit a quote for a cancelled job".to_string(),
            ));
        }

        let quote = Quote {
            id: None,
            job_id,
            contractor_id,
            contractor_name: request.contractor_name,
            contractor_email: request.contractor_email,
            description: request.description,
            status: QuoteStatus::Active,
            estimated_cost: request.estimated_cost,
            materials_cost: request.materials_cost,
            labor_cost: request.labor_cost,
            other_costs: request.other_costs,
            timeline_days: request.timeline_days,
            timeline_description: request.timeline_description,
            guarantees: request.guarantees,
            payment_terms: request.payment_terms,
            photo_keys: request.photo_keys,
            created_at: None,
            cancelled_at: None,
            cancellation_reason: None,
        };

        let created = self.quote_repo.create(quote).await.map_err(ServiceError::from)?;
        info!("Quote created");

        // Jobs posted without an owner get no notification.
        if let Some(owner_id) = job.owner_id.as_deref().filter(|s| !s.is_empty()) {
            let message = format!(
                "{} sent a quote of ${:.2} for your job \"{}\"",
                created.contractor_name, created.estimated_cost, job.description
            );
            if let Err(e) = self
                .notifications
                .append(
                    owner_id,
                    NotificationType::QuoteReceived,
                    "New quote received",
                    &message,
                    created.id,
                    Some(RelatedType::Quote),
                )
                .await
            {
                error!("Failed to notify job owner of new quote: {e}");
            }
        }

        Ok(created)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_quote(&self, id: ObjectId) -> Result<Quote, ServiceError> {
        self.quote_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(job_id = %job_id))]
    async fn list_quotes_by_job(&self, job_id: ObjectId) -> Result<Vec<Quote>, ServiceError> {
        self.quote_repo
            .list_by_job(job_id)
            .await
            .map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(contractor_id = %contractor_id))]
    async fn list_quotes_by_contractor(
        &self,
        contractor_id: &str,
    ) -> Result<Vec<Quote>, ServiceError> {
        self.quote_repo
            .list_by_contractor(contractor_id)
            .await
            .map_err(ServiceError::from)
    }

    /// Cancels the quote, republishes the owning job, and notifies the job
    /// owner. The three effects are sequential statements, not one
    /// transaction; a crash in between can leave the quote cancelled with
    /// the job not yet reverted.
    ///
    /// The revert applies from any job status except `cancelled`: cancelling
    /// a quote puts even an assigned or completed job straight back on the
    /// marketplace, but never resurrects a cancelled one.
    #[instrument(skip(self, reason), fields(id = %id, contractor_id = %contractor_id))]
    async fn cancel_quote(
        &self,
        id: ObjectId,
        reason: &str,
        contractor_id: &str,
    ) -> Result<Quote, ServiceError> {
        if reason.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Cancellation reason is required".to_string(),
            ));
        }

        let quote = self.quote_repo.get_by_id(id).await.map_err(ServiceError::from)?;
        if quote.contractor_id != contractor_id {
            return Err(ServiceError::Forbidden(
                "Only the contractor who submitted the quote can cancel it".to_string(),
            ));
        }
        if quote.status == QuoteStatus::Cancelled {
            return Err(ServiceError::Conflict(
                "Quote is already cancelled".to_string(),
            ));
        }

        // Conditional update; a concurrent cancel that won the race surfaces
        // here as AlreadyExists -> Conflict.
        let cancelled = self
            .quote_repo
            .cancel(id, reason)
            .await
            .map_err(ServiceError::from)?;
        info!("Quote cancelled");

        let job = match self.job_repo.get_by_id(cancelled.job_id).await {
            Ok(job) => job,
            Err(e) => {
                error!("Owning job lookup failed after quote cancellation: {e}");
                return Ok(cancelled);
            }
        };

        match self.job_repo.revert_to_published(cancelled.job_id).await {
            Ok(true) => info!(job_id = %cancelled.job_id, "Job reverted to published"),
            Ok(false) => info!(job_id = %cancelled.job_id, "Job not reverted (already cancelled)"),
            Err(e) => error!("Failed to revert job status: {e}"),
        }

        if let Some(owner_id) = job.owner_id.as_deref().filter(|s| !s.is_empty()) {
            let message = format!(
                "{} cancelled their quote for \"{}\". Reason: {}. The job is available on the marketplace again.",
                cancelled.contractor_name, job.description, reason
            );
            if let Err(e) = self
                .notifications
                .append(
                    owner_id,
                    NotificationType::QuoteCancelled,
                    "Quote cancelled",
                    &message,
                    cancelled.id,
                    Some(RelatedType::Quote),
                )
                .await
            {
                error!("Failed to notify job owner of quote cancellation: {e}");
            }
        }

        Ok(cancelled)
    }
}
