use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::quote::Quote;

/// Body of `POST /quotes/create`. CamelCase per the public API contract.
///
/// `job_id`/`contractor_id` stay optional so their absence is reported as a
/// 400 validation error rather than a body-rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    pub job_id: Option<String>,
    pub contractor_id: Option<String>,
    pub contractor_name: String,
    pub contractor_email: String,
    pub description: String,

    #[validate(range(min = 0.0, message = "estimatedCost must be non-negative"))]
    pub estimated_cost: f64,
    #[validate(range(min = 0.0, message = "materialsCost must be non-negative"))]
    pub materials_cost: f64,
    #[validate(range(min = 0.0, message = "laborCost must be non-negative"))]
    pub labor_cost: f64,
    #[validate(range(min = 0.0, message = "otherCosts must be non-negative"))]
    pub other_costs: f64,

    #[validate(range(min = 1, message = "timelineDays must be positive"))]
    pub timeline_days: u32,
    pub timeline_description: String,
    pub guarantees: String,
    pub payment_terms: String,
    pub photo_keys: Vec<String>,
}

impl Default for CreateQuoteRequest {
    fn default() -> Self {
        CreateQuoteRequest {
            job_id: None,
            contractor_id: None,
            contractor_name: String::new(),
            contractor_email: String::new(),
            description: String::new(),
            estimated_cost: 0.0,
            materials_cost: 0.0,
            labor_cost: 0.0,
            other_costs: 0.0,
            timeline_days: 1,
            timeline_description: String::new(),
            guarantees: String::new(),
            payment_terms: String::new(),
            photo_keys: Vec::new(),
        }
    }
}

/// Body of `POST /quotes/:quoteId/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelQuoteRequest {
    pub reason: String,
    #[serde(rename = "contractorId")]
    pub contractor_id: String,
}

impl Default for CancelQuoteRequest {
    fn default() -> Self {
        CancelQuoteRequest {
            reason: String::new(),
            contractor_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuoteResponse {
    pub success: bool,
    #[serde(rename = "quoteId")]
    pub quote_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelQuoteResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "quoteId")]
    pub quote_id: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
}

/// Full quote record as the UI consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub quote_id: String,
    pub job_id: String,
    pub contractor_id: String,
    pub contractor_name: String,
    pub contractor_email: String,
    pub description: String,
    pub status: String,
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

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        QuoteResponse {
            quote_id: quote.id.map(|id| id.to_hex()).unwrap_or_default(),
            job_id: quote.job_id.to_hex(),
            contractor_id: quote.contractor_id,
            contractor_name: quote.contractor_name,
            contractor_email: quote.contractor_email,
            description: quote.description,
            status: quote.status.to_string(),
            estimated_cost: quote.estimated_cost,
            materials_cost: quote.materials_cost,
            labor_cost: quote.labor_cost,
            other_costs: quote.other_costs,
            timeline_days: quote.timeline_days,
            timeline_description: quote.timeline_description,
            guarantees: quote.guarantees,
            payment_terms: quote.payment_terms,
            photo_keys: quote.photo_keys,
            created_at: quote.created_at,
            cancelled_at: quote.cancelled_at,
            cancellation_reason: quote.cancellation_reason,
        }
    }
}
