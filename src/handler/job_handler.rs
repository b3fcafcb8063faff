use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::dto::job_dto::{
    CancelJobRequest, CancelJobResponse, CreateJobRequest, CreateJobResponse, JobResponse,
};
use crate::service::job_service::{JobService, JobServiceImpl};
use crate::util::error::HandlerError;

pub async fn create_job_handler(
    State(service): State<Arc<JobServiceImpl>>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError::validation(format!("Validation error: {}", e)));
    }

    let job = service.create_job(payload).await?;
    Ok(Json(CreateJobResponse {
        job_id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
        ai_estimate: job.ai_estimate,
        status: job.status.to_string(),
    }))
}

pub async fn get_job_handler(
    State(service): State<Arc<JobServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid job id"))?;
    let job = service.get_job(id).await?;
    Ok(Json(JobResponse::from(job)))
}

pub async fn cancel_job_handler(
    State(service): State<Arc<JobServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<CancelJobRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError::bad_request("Invalid job id"))?;
    let job = service.cancel_job(id, &payload.reason, &payload.user_id).await?;
    Ok(Json(CancelJobResponse {
        success: true,
        message: "Job cancelled successfully".to_string(),
        job_id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
    }))
}
