//! HTTP route handlers, one module per resource

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod users;
