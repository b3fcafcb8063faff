use serde::{Deserialize, Serialize};

use crate::model::notification::Notification;

/// Notification as the polling UI consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub notification_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_id: Option<String>,
    pub related_type: Option<String>,
    pub read_status: bool,
    pub created_at: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        NotificationResponse {
            notification_id: n.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: n.user_id,
            kind: n.kind.as_str().to_string(),
            title: n.title,
            message: n.message,
            related_id: n.related_id.map(|id| id.to_hex()),
            related_type: n.related_type.map(|t| t.as_str().to_string()),
            read_status: n.read_status,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub success: bool,
}
