//! Enrollment repository
//!
//! Membership rows only; idempotence comes from the composite primary key
//! plus ON CONFLICT DO NOTHING, not from application-level checks.

use crate::db::{Db, DbError};
use crate::models::{Course, CourseSummary};

/// Enrollment repository
pub struct EnrollmentRepo<'a> {
    db: &'a Db,
}

impl<'a> EnrollmentRepo<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Enroll a user in a course. Enrolling twice is a no-op.
    pub async fn enroll(&self, user_id: i32, course_id: i32) -> Result<(), DbError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    sqlx::query(
                        "INSERT INTO user_courses (user_id, course_id) VALUES ($1, $2) \
                         ON CONFLICT DO NOTHING",
                    )
                    .bind(user_id)
                    .bind(course_id)
                    .execute(&mut *conn)
                    .await?;

                    Ok(())
                })
            })
            .await
    }

    /// List the courses a user is enrolled in.
    pub async fn list_courses_for_user(&self, user_id: i32) -> Result<Vec<CourseSummary>, DbError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    let rows: Vec<Course> = sqlx::query_as(
                        "SELECT c.id, c.title, c.description \
                         FROM courses c \
                         JOIN user_courses uc ON c.id = uc.course_id \
                         WHERE uc.user_id = $1 \
                         ORDER BY c.id",
                    )
                    .bind(user_id)
                    .fetch_all(&mut *conn)
                    .await?;

                    Ok(rows.into_iter().map(CourseSummary::enrolled).collect())
                })
            })
            .await
    }
}
