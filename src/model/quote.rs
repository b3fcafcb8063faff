use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Active,
    Accepted,
    Cancelled,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Active => "active",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A contractor's priced proposal against a specific job.
///
/// `estimated_cost` is supplied by the contractor and is never recomputed
/// from the materials/labor/other breakdown; the two may diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub job_id: ObjectId,
    pub contractor_id: String,
    pub contractor_name: String,
    pub contractor_email: String,
    pub description: String,
    pub status: QuoteStatus,
    pub estimated_cost: f64,
    pub materials_cost: f64,
    pub labor_cost: f64,
    pub other_costs: f64,
    pub timeline_days: u32,
    pub timeline_description: String,
    pub guarantees: String,
    pub payment_terms: String,
    pub photo_keys: Vec<String>,
    pub created_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancellation_reason: Option<String>,
}
