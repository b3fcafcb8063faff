use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::notification::Notification;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Cap applied to ledger reads; the UI polls and only ever shows a page.
pub const RECENT_LIMIT: i64 = 50;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification>;
    /// Newest-first, capped at [`RECENT_LIMIT`].
    async fn list_recent(&self, user_id: &str) -> RepositoryResult<Vec<Notification>>;
    async fn count_unread(&self, user_id: &str) -> RepositoryResult<u64>;
    /// Idempotent: marking an already-read or absent notification is a no-op.
    async fn mark_read(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn mark_all_read(&self, user_id: &str) -> RepositoryResult<u64>;
}

pub struct MongoNotificationRepository {
    collection: mongodb::Collection<Notification>,
}

impl MongoNotificationRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let db = crate::repository::connect(config).await?;
        let collection = db.collection::<Notification>(config.notification_collection_name());
        Ok(MongoNotificationRepository { collection })
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    #[tracing::instrument(skip(self, notification))]
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification> {
        let mut new_notification = notification;
        new_notification.id = Some(ObjectId::new());
        new_notification.read_status = false;
        new_notification.created_at = Some(Utc::now().to_rfc3339());

        match self.collection.insert_one(new_notification.clone(), None).await {
            Ok(_) => {
                info!(user_id = %new_notification.user_id, kind = new_notification.kind.as_str(), "Notification appended");
                Ok(new_notification)
            }
            Err(e) => {
                error!("Failed to append notification: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to append notification: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    async fn list_recent(&self, user_id: &str) -> RepositoryResult<Vec<Notification>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .limit(RECENT_LIMIT)
            .build();
        let mut cursor = self
            .collection
            .find(doc! { "user_id": user_id }, options)
            .await
            .map_err(|e| {
                RepositoryError::database(format!("Failed to list notifications: {}", e))
            })?;

        let mut notifications = Vec::new();
        while let Some(notification) = cursor.next().await {
            match notification {
                Ok(n) => notifications.push(n),
                Err(e) => {
                    error!("Failed to deserialize notification: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize notification: {}",
                        e
                    )));
                }
            }
        }
        Ok(notifications)
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    async fn count_unread(&self, user_id: &str) -> RepositoryResult<u64> {
        self.collection
            .count_documents(doc! { "user_id": user_id, "read_status": false }, None)
            .await
            .map_err(|e| {
                error!("Failed to count unread notifications: {}", e);
                RepositoryError::database(format!("Failed to count unread notifications: {}", e))
            })
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn mark_read(&self, id: ObjectId) -> RepositoryResult<()> {
        let update = doc! { "$set": { "read_status": true } };
        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            // matched_count of 0 (absent) and modified_count of 0 (already
            // read) are both silent no-ops.
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Failed to mark notification as read: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to mark notification as read: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    async fn mark_all_read(&self, user_id: &str) -> RepositoryResult<u64> {
        let filter = doc! { "user_id": user_id, "read_status": false };
        let update = doc! { "$set": { "read_status": true } };
        match self.collection.update_many(filter, update, None).await {
            Ok(result) => Ok(result.modified_count),
            Err(e) => {
                error!("Failed to mark notifications as read: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to mark notifications as read: {}",
                    e
                )))
            }
        }
    }
}
