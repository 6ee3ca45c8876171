//! Repository implementations for database access
//!
//! Each repository borrows a [`Db`](super::Db) handle and opens a fresh
//! connection per operation via `with_conn`. All SQL is parameterized;
//! multi-step writes run inside a transaction; uniqueness is ultimately
//! enforced by database constraints, with pre-checks only to pick a
//! friendlier message.
//!
//! Repository tests need a live Postgres and live in
//! `tests/repo_properties.rs`, gated behind `--ignored`.

pub mod courses;
pub mod enrollments;
pub mod users;

pub use courses::CourseRepo;
pub use enrollments::EnrollmentRepo;
pub use users::UserRepo;

/// Name of the violated unique constraint when `err` is a Postgres
/// unique violation (SQLSTATE 23505), otherwise `None`.
///
/// Returned owned so callers can move `err` into their own error type.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            Some(db.constraint().unwrap_or_default().to_owned())
        }
        _ => None,
    }
}

/// True when `err` is a Postgres undefined-column error (SQLSTATE 42703),
/// which reads hit on a schema the bootstrapper has not migrated yet.
pub(crate) fn undefined_column(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("42703"))
}
