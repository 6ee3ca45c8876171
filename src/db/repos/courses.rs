//! Course repository
//!
//! Catalog listing/search, composite course creation, nested detail reads.

use sqlx::Connection;

use crate::db::{Db, DbError};
use crate::models::{Answer, Course, CourseDetail, CourseSummary, CreateCourseRequest, Question};

/// Course repository
pub struct CourseRepo<'a> {
    db: &'a Db,
}

impl<'a> CourseRepo<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// List catalog courses, optionally filtered.
    ///
    /// A blank filter behaves like no filter; otherwise the match is a
    /// case-insensitive substring search over title OR description.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<CourseSummary>, DbError> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{q}%"));

        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    let rows: Vec<Course> = match &pattern {
                        Some(pattern) => {
                            sqlx::query_as(
                                "SELECT id, title, description FROM courses \
                                 WHERE title ILIKE $1 OR description ILIKE $1 \
                                 ORDER BY id",
                            )
                            .bind(pattern)
                            .fetch_all(&mut *conn)
                            .await?
                        }
                        None => {
                            sqlx::query_as("SELECT id, title, description FROM courses ORDER BY id")
                                .fetch_all(&mut *conn)
                                .await?
                        }
                    };

                    Ok(rows.into_iter().map(CourseSummary::catalog).collect())
                })
            })
            .await
    }

    /// Create a course with its questions and answers atomically.
    ///
    /// Everything runs in one transaction: a failed answer insert rolls back
    /// the course and all of its questions.
    pub async fn create(&self, req: CreateCourseRequest) -> Result<Course, DbError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    let mut tx = conn.begin().await?;

                    let course_id: i32 = sqlx::query_scalar(
                        "INSERT INTO courses (title, description) VALUES ($1, $2) RETURNING id",
                    )
                    .bind(&req.title)
                    .bind(req.description.as_deref())
                    .fetch_one(&mut *tx)
                    .await?;

                    for question in &req.questions {
                        let question_id: i32 = sqlx::query_scalar(
                            "INSERT INTO questions (course_id, text) VALUES ($1, $2) RETURNING id",
                        )
                        .bind(course_id)
                        .bind(&question.text)
                        .fetch_one(&mut *tx)
                        .await?;

                        for answer in &question.answers {
                            sqlx::query(
                                "INSERT INTO answers (question_id, text, is_correct) \
                                 VALUES ($1, $2, $3)",
                            )
                            .bind(question_id)
                            .bind(&answer.text)
                            .bind(answer.is_correct)
                            .execute(&mut *tx)
                            .await?;
                        }
                    }

                    tx.commit().await?;

                    Ok(Course {
                        id: course_id,
                        title: req.title,
                        description: req.description,
                    })
                })
            })
            .await
    }

    /// Load a course with its questions and answers nested.
    ///
    /// Questions and answers come back ordered by id. Answers are fetched
    /// with a single JOIN and grouped in memory rather than queried per
    /// question.
    pub async fn get_detail(&self, id: i32) -> Result<CourseDetail, DbError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(async move {
                    let course: Course = sqlx::query_as(
                        "SELECT id, title, description FROM courses WHERE id = $1",
                    )
                    .bind(id)
                    .fetch_optional(&mut *conn)
                    .await?
                    .ok_or(DbError::NotFound {
                        resource: "course",
                        id,
                    })?;

                    let question_rows: Vec<(i32, String)> = sqlx::query_as(
                        "SELECT id, text FROM questions WHERE course_id = $1 ORDER BY id",
                    )
                    .bind(id)
                    .fetch_all(&mut *conn)
                    .await?;

                    let answer_rows: Vec<(i32, i32, String, bool)> = sqlx::query_as(
                        "SELECT a.question_id, a.id, a.text, a.is_correct \
                         FROM answers a \
                         JOIN questions q ON q.id = a.question_id \
                         WHERE q.course_id = $1 \
                         ORDER BY a.question_id, a.id",
                    )
                    .bind(id)
                    .fetch_all(&mut *conn)
                    .await?;

                    let mut questions: Vec<Question> = question_rows
                        .into_iter()
                        .map(|(id, text)| Question {
                            id,
                            text,
                            answers: Vec::new(),
                        })
                        .collect();

                    for (question_id, answer_id, text, is_correct) in answer_rows {
                        if let Some(question) =
                            questions.iter_mut().find(|q| q.id == question_id)
                        {
                            question.answers.push(Answer {
                                id: answer_id,
                                text,
                                is_correct,
                            });
                        }
                    }

                    Ok(CourseDetail { course, questions })
                })
            })
            .await
    }
}
