pub mod job_handler;
pub mod notification_handler;
pub mod quote_handler;
