//! learnhub-server: HTTP backend for the LearnHub course platform
//!
//! User accounts, a searchable course catalog with quizzes, and enrollment
//! tracking, served over HTTP and backed by PostgreSQL. Each request runs
//! against its own short-lived database connection; schema bootstrap and
//! demo seeding happen once at startup.

pub mod db;
pub mod http;
pub mod models;

pub use db::{Db, DbConfig, DbError};
pub use http::{run_server, ApiError, AppState, ServerConfig};
