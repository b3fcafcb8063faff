use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;

use crate::dto::notification_dto::{MarkReadResponse, NotificationResponse, UnreadCountResponse};
use crate::service::notification_service::{NotificationService, NotificationServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_notifications_handler(
    State(service): State<Arc<NotificationServiceImpl>>,
    Path((user_id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let notifications = service.list_recent(&user_id).await?;
    let notifications: Vec<NotificationResponse> = notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect();
    Ok(Json(notifications))
}

pub async fn unread_count_handler(
    State(service): State<Arc<NotificationServiceImpl>>,
    Path((user_id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let count = service.count_unread(&user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

pub async fn mark_read_handler(
    State(service): State<Arc<NotificationServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| HandlerError::bad_request("Invalid notification id"))?;
    service.mark_read(id).await?;
    Ok(Json(MarkReadResponse { success: true }))
}

pub async fn mark_all_read_handler(
    State(service): State<Arc<NotificationServiceImpl>>,
    Path((user_id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    service.mark_all_read(&user_id).await?;
    Ok(Json(MarkReadResponse { success: true }))
}
