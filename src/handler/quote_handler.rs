use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::quote_dto::{
    CancelQuoteRequest, CancelQuoteResponse, CreateQuoteRequest, CreateQuoteResponse,
    QuoteResponse,
};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::HandlerError;

pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Json(payload): Json<CreateQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }

    let quote = service.create_quote(payload).await?;
    Ok(Json(CreateQuoteResponse {
        success: true,
        quote_id: quote.id.map(|id| id.to_hex()).unwrap_or_default(),
        message: "Quote submitted successfully".to_string(),
    }))
}

pub async fn get_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid quote id"))?;
    let quote = service.get_quote(id).await?;
    Ok(Json(QuoteResponse::from(quote)))
}

pub async fn list_quotes_by_job_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((job_id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let job_id =
        ObjectId::parse_str(&job_id).map_err(|_| HandlerError::bad_request("Invalid job id"))?;
    let quotes = service.list_quotes_by_job(job_id).await?;
    let quotes: Vec<QuoteResponse> = quotes.into_iter().map(QuoteResponse::from).collect();
    Ok(Json(quotes))
}

pub async fn list_quotes_by_contractor_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((contractor_id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = service.list_quotes_by_contractor(&contractor_id).await?;
    let quotes: Vec<QuoteResponse> = quotes.into_iter().map(QuoteResponse::from).collect();
    Ok(Json(quotes))
}

pub async fn cancel_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<CancelQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid quote id"))?;
    let quote = service
        .cancel_quote(id, &payload.reason, &payload.contractor_id)
        .await?;
    Ok(Json(CancelQuoteResponse {
        success: true,
        message: "Quote cancelled successfully".to_string(),
        quote_id: quote.id.map(|id| id.to_hex()).unwrap_or_default(),
        job_id: quote.job_id.to_hex(),
    }))
}
