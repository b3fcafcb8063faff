use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::Utc;
use futures::stream::StreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::quote::{Quote, QuoteStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quote>;
    /// Newest-first.
    async fn list_by_job(&self, job_id: ObjectId) -> RepositoryResult<Vec<Quote>>;
    /// Newest-first.
    async fn list_by_contractor(&self, contractor_id: &str) -> RepositoryResult<Vec<Quote>>;
    /// Quotes with status `active` on the given job, for cancellation fan-out.
    async fn list_active_by_job(&self, job_id: ObjectId) -> RepositoryResult<Vec<Quote>>;
    /// Check-and-set transition to `cancelled`. Returns `AlreadyExists` when
    /// the quote is already cancelled.
    async fn cancel(&self, id: ObjectId, reason: &str) -> RepositoryResult<Quote>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<Quote>,
}

impl MongoQuoteRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let db = crate::repository::connect(config).await?;
        let collection = db.collection::<Quote>(config.quote_collection_name());
        Ok(MongoQuoteRepository { collection })
    }

    async fn find_sorted(&self, filter: Document) -> RepositoryResult<Vec<Quote>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .build();
        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list quotes: {}", e)))?;

        let mut quotes = Vec::new();
        while let Some(quote) = cursor.next().await {
            match quote {
                Ok(q) => quotes.push(q),
                Err(e) => {
                    error!("Failed to deserialize quote: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize quote: {}",
                        e
                    )));
                }
            }
        }
        Ok(quotes)
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote))]
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        let mut new_quote = quote;
        new_quote.id = Some(ObjectId::new());
        new_quote.status = QuoteStatus::Active;
        new_quote.created_at = Some(Utc::now().to_rfc3339());

        match self.collection.insert_one(new_quote.clone(), None).await {
            Ok(_) => {
                info!(
                    quote_id = %new_quote.id.as_ref().map(|id| id.to_hex()).unwrap_or_default(),
                    job_id = %new_quote.job_id,
                    "Quote created"
                );
                Ok(new_quote)
            }
            Err(e) => {
                error!("Failed to create quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create quote: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quote> {
        let filter = doc! { "_id": id };
        match self.collection.find_one(filter, None).await {
            Ok(Some(quote)) => Ok(quote),
            Ok(None) => Err(RepositoryError::not_found(format!(
                "Quote not found for ID: {}",
                id
            ))),
            Err(e) => {
                error!("Failed to fetch quote by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch quote by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(job_id = %job_id))]
    async fn list_by_job(&self, job_id: ObjectId) -> RepositoryResult<Vec<Quote>> {
        self.find_sorted(doc! { "job_id": job_id }).await
    }

    #[tracing::instrument(skip(self), fields(contractor_id = %contractor_id))]
    async fn list_by_contractor(&self, contractor_id: &str) -> RepositoryResult<Vec<Quote>> {
        self.find_sorted(doc! { "contractor_id": contractor_id }).await
    }

    #[tracing::instrument(skip(self), fields(job_id = %job_id))]
    async fn list_active_by_job(&self, job_id: ObjectId) -> RepositoryResult<Vec<Quote>> {
        self.find_sorted(doc! {
            "job_id": job_id,
            "status": QuoteStatus::Active.as_str(),
        })
        .await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn cancel(&self, id: ObjectId, reason: &str) -> RepositoryResult<Quote> {
        let filter = doc! {
            "_id": id,
            "status": { "$ne": QuoteStatus::Cancelled.as_str() },
        };
        let update = doc! { "$set": {
            "status": QuoteStatus::Cancelled.as_str(),
            "cancelled_at": Utc::now().to_rfc3339(),
            "cancellation_reason": reason,
        }};
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        match self.collection.find_one_and_update(filter, update, options).await {
            Ok(Some(quote)) => {
                info!("Quote cancelled");
                Ok(quote)
            }
            Ok(None) => match self.get_by_id(id).await {
                Ok(_) => Err(RepositoryError::already_exists(format!(
                    "Quote {} is already cancelled",
                    id
                ))),
                Err(e) => Err(e),
            },
            Err(e) => {
                error!("Failed to cancel quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to cancel quote: {}",
                    e
                )))
            }
        }
    }
}
