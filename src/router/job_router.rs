use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::job_handler::{cancel_job_handler, create_job_handler, get_job_handler};
use crate::service::job_service::JobServiceImpl;

pub fn job_router(service: Arc<JobServiceImpl>) -> Router {
    Router::new()
        .route("/jobs/create", post(create_job_handler))
        .route("/jobs/{id}", get(get_job_handler))
        .route("/jobs/{id}/cancel", post(cancel_job_handler))
        .with_state(service)
}
