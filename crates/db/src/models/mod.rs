//! Row models for the `requests` and `app_log` tables.

pub mod app_log;
pub mod request;
