use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::model::notification::{Notification, NotificationType, RelatedType};
use crate::repository::notification_repo::NotificationRepository;
use crate::util::error::ServiceError;

/// Append-only per-user message ledger with read/unread state.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn append(
        &self,
        user_id: &str,
        kind: NotificationType,
        title: &str,
        message: &str,
        related_id: Option<ObjectId>,
        related_type: Option<RelatedType>,
    ) -> Result<Notification, ServiceError>;

    async fn list_recent(&self, user_id: &str) -> Result<Vec<Notification>, ServiceError>;
    async fn count_unread(&self, user_id: &str) -> Result<u64, ServiceError>;
    async fn mark_read(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn mark_all_read(&self, user_id: &str) -> Result<u64, ServiceError>;
}

pub struct NotificationServiceImpl {
    pub notification_repo: Arc<dyn NotificationRepository>,
}

#[async_trait]
impl NotificationService for NotificationServiceImpl {
    #[instrument(skip(self, title, message), fields(user_id = %user_id))]
    async fn append(
        &self,
        user_id: &str,
        kind: NotificationType,
        title: &str,
        message: &str,
        related_id: Option<ObjectId>,
        related_type: Option<RelatedType>,
    ) -> Result<Notification, ServiceError> {
        let notification = Notification {
            id: None,
            user_id: user_id.to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            related_id,
            related_type,
            read_status: false,
            created_at: None,
        };
        let res = self.notification_repo.create(notification).await;
        match &res {
            Ok(_) => info!("Notification appended"),
            Err(e) => error!("Failed to append notification: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_recent(&self, user_id: &str) -> Result<Vec<Notification>, ServiceError> {
        let res = self.notification_repo.list_recent(user_id).await;
        match &res {
            Ok(notifications) => info!("Fetched {} notifications", notifications.len()),
            Err(e) => error!("Failed to list notifications: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn count_unread(&self, user_id: &str) -> Result<u64, ServiceError> {
        self.notification_repo
            .count_unread(user_id)
            .await
            .map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn mark_read(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.notification_repo
            .mark_read(id)
            .await
            .map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn mark_all_read(&self, user_id: &str) -> Result<u64, ServiceError> {
        let res = self.notification_repo.mark_all_read(user_id).await;
        match &res {
            Ok(count) => info!("Marked {} notifications as read", count),
            Err(e) => error!("Failed to mark notifications as read: {e}"),
        }
        res.map_err(ServiceError::from)
    }
}
