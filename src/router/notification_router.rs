use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::handler::notification_handler::{
    list_notifications_handler, mark_all_read_handler, mark_read_handler, unread_count_handler,
};
use crate::service::notification_service::NotificationServiceImpl;

pub fn notification_router(service: Arc<NotificationServiceImpl>) -> Router {
    Router::new()
        .route("/notifications/{id}", get(list_notifications_handler))
        .route("/notifications/{id}/unread-count", get(unread_count_handler))
        .route("/notifications/{id}/read", put(mark_read_handler))
        .route("/notifications/{id}/read-all", put(mark_all_read_handler))
        .with_state(service)
}
