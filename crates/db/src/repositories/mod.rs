//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod app_log_repo;
pub mod request_repo;

pub use app_log_repo::AppLogRepo;
pub use request_repo::RequestRepo;
