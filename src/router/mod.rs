pub mod job_router;
pub mod notification_router;
pub mod quote_router;
