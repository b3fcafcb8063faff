#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use obralink_backend::model::job::{Job, JobStatus};
use obralink_backend::model::notification::Notification;
use obralink_backend::model::quote::{Quote, QuoteStatus};
use obralink_backend::repository::job_repo::JobRepository;
use obralink_backend::repository::notification_repo::{NotificationRepository, RECENT_LIMIT};
use obralink_backend::repository::quote_repo::QuoteRepository;
use obralink_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use obralink_backend::router::job_router::job_router;
use obralink_backend::router::notification_router::notification_router;
use obralink_backend::router::quote_router::quote_router;
use obralink_backend::service::job_service::JobServiceImpl;
use obralink_backend::service::notification_service::{
    NotificationService, NotificationServiceImpl,
};
use obralink_backend::service::quote_service::QuoteServiceImpl;
use obralink_backend::util::estimator::{Estimator, EstimatorError};

// ---------------------------------------------------------------------------
// In-memory repository fakes, mirroring the conditional-update semantics of
// the Mongo implementations.
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryJobRepo {
    pub jobs: Mutex<HashMap<ObjectId, Job>>,
}

#[async_trait]
impl JobRepository for InMemoryJobRepo {
    async fn create(&self, job: Job) -> RepositoryResult<Job> {
        let mut new_job = job;
        new_job.id = Some(ObjectId::new());
        new_job.status = JobStatus::Published;
        new_job.created_at = Some(Utc::now().to_rfc3339());
        self.jobs
            .lock()
            .unwrap()
            .insert(new_job.id.unwrap(), new_job.clone());
        Ok(new_job)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Job> {
        self.jobs
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Job not found for ID: {}", id)))
    }

    async fn cancel(
        &self,
        id: ObjectId,
        reason: &str,
        cancelled_by: &str,
    ) -> RepositoryResult<Job> {
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(format!("Job not found for ID: {}", id)))?;
        if job.status == JobStatus::Cancelled {
            return Err(RepositoryError::already_exists(format!(
                "Job {} is already cancelled",
                id
            )));
        }
        job.status = JobStatus::Cancelled;
        job.cancelled_at = Some(Utc::now().to_rfc3339());
        job.cancellation_reason = Some(reason.to_string());
        job.cancelled_by = Some(cancelled_by.to_string());
        Ok(job.clone())
    }

    async fn revert_to_published(&self, id: ObjectId) -> RepositoryResult<bool> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.get_mut(&id) {
            Some(job) if job.status != JobStatus::Cancelled => {
                job.status = JobStatus::Published;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryQuoteRepo {
    pub quotes: Mutex<Vec<Quote>>,
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepo {
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        let mut new_quote = quote;
        new_quote.id = Some(ObjectId::new());
        new_quote.status = QuoteStatus::Active;
        new_quote.created_at = Some(Utc::now().to_rfc3339());
        self.quotes.lock().unwrap().push(new_quote.clone());
        Ok(new_quote)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Quote> {
        self.quotes
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Quote not found for ID: {}", id)))
    }

    async fn list_by_job(&self, job_id: ObjectId) -> RepositoryResult<Vec<Quote>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|q| q.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn list_by_contractor(&self, contractor_id: &str) -> RepositoryResult<Vec<Quote>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|q| q.contractor_id == contractor_id)
            .cloned()
            .collect())
    }

    async fn list_active_by_job(&self, job_id: ObjectId) -> RepositoryResult<Vec<Quote>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|q| q.job_id == job_id && q.status == QuoteStatus::Active)
            .cloned()
            .collect())
    }

    async fn cancel(&self, id: ObjectId, reason: &str) -> RepositoryResult<Quote> {
        let mut quotes = self.quotes.lock().unwrap();
        let quote = quotes
            .iter_mut()
            .find(|q| q.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("Quote not found for ID: {}", id)))?;
        if quote.status == QuoteStatus::Cancelled {
            return Err(RepositoryError::already_exists(format!(
                "Quote {} is already cancelled",
                id
            )));
        }
        quote.status = QuoteStatus::Cancelled;
        quote.cancelled_at = Some(Utc::now().to_rfc3339());
        quote.cancellation_reason = Some(reason.to_string());
        Ok(quote.clone())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationRepo {
    pub notifications: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepo {
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification> {
        let mut new_notification = notification;
        new_notification.id = Some(ObjectId::new());
        new_notification.read_status = false;
        new_notification.created_at = Some(Utc::now().to_rfc3339());
        self.notifications
            .lock()
            .unwrap()
            .push(new_notification.clone());
        Ok(new_notification)
    }

    async fn list_recent(&self, user_id: &str) -> RepositoryResult<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .take(RECENT_LIMIT as usize)
            .cloned()
            .collect())
    }

    async fn count_unread(&self, user_id: &str) -> RepositoryResult<u64> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.read_status)
            .count() as u64)
    }

    async fn mark_read(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut notifications = self.notifications.lock().unwrap();
        if let Some(n) = notifications.iter_mut().find(|n| n.id == Some(id)) {
            n.read_status = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &str) -> RepositoryResult<u64> {
        let mut notifications = self.notifications.lock().unwrap();
        let mut modified = 0;
        for n in notifications.iter_mut() {
            if n.user_id == user_id && !n.read_status {
                n.read_status = true;
                modified += 1;
            }
        }
        Ok(modified)
    }
}

// ---------------------------------------------------------------------------
// Estimator stubs
// ---------------------------------------------------------------------------

pub struct FixedEstimator(pub f64);

#[async_trait]
impl Estimator for FixedEstimator {
    async fn estimate(&self, _description: &str, _category: &str) -> Result<f64, EstimatorError> {
        Ok(self.0)
    }
}

pub struct FailingEstimator;

#[async_trait]
impl Estimator for FailingEstimator {
    async fn estimate(&self, _description: &str, _category: &str) -> Result<f64, EstimatorError> {
        Err(EstimatorError::Request("connection refused".to_string()))
    }
}

// ---------------------------------------------------------------------------
// App wiring
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub job_repo: Arc<InMemoryJobRepo>,
    pub quote_repo: Arc<InMemoryQuoteRepo>,
    pub notification_repo: Arc<InMemoryNotificationRepo>,
}

pub fn test_app(estimator: Arc<dyn Estimator>) -> TestApp {
    let job_repo = Arc::new(InMemoryJobRepo::default());
    let quote_repo = Arc::new(InMemoryQuoteRepo::default());
    let notification_repo = Arc::new(InMemoryNotificationRepo::default());

    let notification_service = Arc::new(NotificationServiceImpl {
        notification_repo: notification_repo.clone(),
    });
    let job_service = Arc::new(JobServiceImpl {
        job_repo: job_repo.clone(),
        quote_repo: quote_repo.clone(),
        notifications: notification_service.clone() as Arc<dyn NotificationService>,
        estimator,
    });
    let quote_service = Arc::new(QuoteServiceImpl {
        quote_repo: quote_repo.clone(),
        job_repo: job_repo.clone(),
        notifications: notification_service.clone() as Arc<dyn NotificationService>,
    });

    let router = Router::new()
        .merge(job_router(job_service))
        .merge(quote_router(quote_service))
        .merge(notification_router(notification_service));

    TestApp {
        router,
        job_repo,
        quote_repo,
        notification_repo,
    }
}

pub fn default_app() -> TestApp {
    test_app(Arc::new(FixedEstimator(150.0)))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn create_job(router: &Router, description: &str, user_id: &str) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/jobs/create",
        Some(json!({
            "description": description,
            "photo_keys": [],
            "user_id": user_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create_job failed: {body}");
    body["job_id"].as_str().unwrap().to_string()
}

pub fn quote_body(job_id: &str, contractor_id: &str, contractor_name: &str) -> Value {
    json!({
        "jobId": job_id,
        "contractorId": contractor_id,
        "contractorName": contractor_name,
        "contractorEmail": format!("{contractor_id}@example.com"),
        "description": "Replace the hinges and repaint",
        "estimatedCost": 200.0,
        "materialsCost": 80.0,
        "laborCost": 100.0,
        "otherCosts": 20.0,
        "timelineDays": 3,
        "timelineDescription": "Three working days",
        "guarantees": "6 months on labor",
        "paymentTerms": "50% upfront",
        "photoKeys": [],
    })
}

pub async fn create_quote(router: &Router, job_id: &str, contractor_id: &str) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/quotes/create",
        Some(quote_body(job_id, contractor_id, "Casa Fix SA")),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create_quote failed: {body}");
    body["quoteId"].as_str().unwrap().to_string()
}
