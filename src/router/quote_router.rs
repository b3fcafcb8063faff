use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::quote_handler::{
    cancel_quote_handler, create_quote_handler, get_quote_handler,
    list_quotes_by_contractor_handler, list_quotes_by_job_handler,
};
use crate::service::quote_service::QuoteServiceImpl;

pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .route("/quotes/create", post(create_quote_handler))
        .route("/quotes/{id}", get(get_quote_handler))
        .route("/quotes/{id}/cancel", post(cancel_quote_handler))
        .route("/quotes/job/{job_id}", get(list_quotes_by_job_handler))
        .route(
            "/quotes/contractor/{contractor_id}",
            get(list_quotes_by_contractor_handler),
        )
        .with_state(service)
}
