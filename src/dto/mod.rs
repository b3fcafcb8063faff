pub mod job_dto;
pub mod notification_dto;
pub mod quote_dto;
