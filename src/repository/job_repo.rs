use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::job::{Job, JobStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: Job) -> RepositoryResult<Job>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Job>;
    /// Check-and-set transition to `cancelled`. Returns `AlreadyExists` when
    /// the job is already cancelled, so concurrent double-cancels resolve to
    /// exactly one winner.
    async fn cancel(&self, id: ObjectId, reason: &str, cancelled_by: &str)
        -> RepositoryResult<Job>;
    /// Push the job back to `published` unless it is already cancelled.
    /// Returns whether a document was actually modified.
    async fn revert_to_published(&self, id: ObjectId) -> RepositoryResult<bool>;
}

pub struct MongoJobRepository {
    collection: mongodb::Collection<Job>,
}

impl MongoJobRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let db = crate::repository::connect(config).await?;
        let collection = db.collection::<Job>(config.job_collection_name());
        Ok(MongoJobRepository { collection })
    }
}

#[async_trait]
impl JobRepository for MongoJobRepository {
    #[tracing::instrument(skip(self, job))]
    async fn create(&self, job: Job) -> RepositoryResult<Job> {
        let mut new_job = job;
        new_job.id = Some(ObjectId::new());
        new_job.status = JobStatus::Published;
        new_job.created_at = Some(Utc::now().to_rfc3339());

        match self.collection.insert_one(new_job.clone(), None).await {
            Ok(_) => {
                info!(job_id = %new_job.id.as_ref().map(|id| id.to_hex()).unwrap_or_default(), "Job created");
                Ok(new_job)
            }
            Err(e) => {
                error!("Failed to create job: {}", e);
                Err(RepositoryError::database(format!("Failed to create job: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Job> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) => Err(RepositoryError::not_found(format!(
                "Job not found for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to fetch job by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch job by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id, cancelled_by = %cancelled_by))]
    async fn cancel(
        &self,
        id: ObjectId,
        reason: &str,
        cancelled_by: &str,
    ) -> RepositoryResult<Job> {
        // Single conditional update so only one of two concurrent cancels
        // can match the non-cancelled document.
        let filter = doc! {
            "_id": id,
            "status": { "$ne": JobStatus::Cancelled.as_str() },
        };
        let update = doc! { "$set": {
            "status": JobStatus::Cancelled.as_str(),
            "cancelled_at": Utc::now().to_rfc3339(),
            "cancellation_reason": reason,
            "cancelled_by": cancelled_by,
        }};
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        match self.collection.find_one_and_update(filter, update, options).await {
            Ok(Some(job)) => {
                info!("Job cancelled");
                Ok(job)
            }
            Ok(None) => {
                // Either absent or already cancelled; look again to tell apart.
                match self.get_by_id(id).await {
                    Ok(_) => Err(RepositoryError::already_exists(format!(
                        "Job {} is already cancelled",
                        id
                    ))),
                    Err(e) => Err(e),
                }
            }
            Err(e) => {
                error!("Failed to cancel job: {}", e);
                Err(RepositoryError::database(format!("Failed to cancel job: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn revert_to_published(&self, id: ObjectId) -> RepositoryResult<bool> {
        let filter = doc! {
            "_id": id,
            "status": { "$ne": JobStatus::Cancelled.as_str() },
        };
        let update = doc! { "$set": { "status": JobStatus::Published.as_str() } };

        match self.collection.update_one(filter, update, None).await {
            Ok(result) => {
                let reverted = result.matched_count > 0;
                if reverted {
                    info!("Job reverted to published");
                } else {
                    info!("Job not reverted (absent or already cancelled)");
                }
                Ok(reverted)
            }
            Err(e) => {
                error!("Failed to revert job status: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to revert job status: {}",
                    e
                )))
            }
        }
    }
}
