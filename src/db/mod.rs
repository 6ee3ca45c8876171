//! Database access: connection handling, schema bootstrap, repositories

pub mod bootstrap;
pub mod conn;
pub mod repos;

pub use conn::{Db, DbConfig};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database unreachable after {attempts} attempts: {source}")]
    Unreachable { attempts: u32, source: sqlx::Error },

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i32 },

    #[error("{0}")]
    Conflict(&'static str),

    #[error("invalid login or password")]
    InvalidCredentials,

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
