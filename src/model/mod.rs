pub mod job;
pub mod notification;
pub mod quote;
