use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Tag describing what happened. New variants may be added as the workflow
/// grows; consumers treat unknown tags as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    JobCancelled,
    QuoteCancelled,
    QuoteReceived,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::JobCancelled => "job_cancelled",
            NotificationType::QuoteCancelled => "quote_cancelled",
            NotificationType::QuoteReceived => "quote_received",
        }
    }
}

/// Weak reference to the entity that caused a notification. Lookup only:
/// the referenced document is not validated to exist at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedType {
    Job,
    Quote,
}

impl RelatedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelatedType::Job => "job",
            RelatedType::Quote => "quote",
        }
    }
}

/// One entry in the per-user message ledger. Append-only; only
/// `read_status` is ever mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    /// Pre-rendered text, not a template reference.
    pub message: String,
    pub related_id: Option<ObjectId>,
    pub related_type: Option<RelatedType>,
    pub read_status: bool,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_under_type_field() {
        let n = Notification {
            id: None,
            user_id: "u1".to_string(),
            kind: NotificationType::QuoteReceived,
            title: "t".to_string(),
            message: "m".to_string(),
            related_id: None,
            related_type: Some(RelatedType::Quote),
            read_status: false,
            created_at: None,
        };
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v["type"], "quote_received");
        assert_eq!(v["related_type"], "quote");
    }
}
