//! Course catalog models
//!
//! Core primitives for the course catalog:
//! - Courses: title + description rows
//! - Questions: quiz questions attached to a course
//! - Answers: options for a question, flagged correct/incorrect
//! - Summaries: catalog/enrolled listings with display metadata

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Placeholder rating shown until real ratings exist
pub const PLACEHOLDER_RATING: f64 = 4.5;

/// Student count shown on enrolled-course cards
pub const ENROLLED_STUDENTS_COUNT: i64 = 123;

/// Lesson count shown on enrolled-course cards
pub const ENROLLED_TOTAL_LESSONS: i64 = 3;

// ============================================================================
// Core rows
// ============================================================================

/// A course as stored, without nested questions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
}

/// A quiz question with its answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub text: String,
    pub answers: Vec<Answer>,
}

/// An answer option for a question
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i32,
    pub text: String,
    pub is_correct: bool,
}

// ============================================================================
// Requests
// ============================================================================

/// Payload for `POST /api/v1/courses`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<NewQuestion>,
}

/// A question within a course-creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub answers: Vec<NewAnswer>,
}

/// An answer within a course-creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewAnswer {
    pub text: String,
    pub is_correct: bool,
}

// ============================================================================
// Responses
// ============================================================================

/// Course with nested questions and answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub questions: Vec<Question>,
}

/// Course card for listings.
///
/// The display fields past `description` are fixed placeholders; the
/// frontend card layout expects them even though nothing tracks ratings,
/// lessons, or progress yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub rating: f64,
    pub students_count: i64,
    pub price_status: String,
    pub total_lessons: i64,
    pub completed_lessons: i64,
    pub progress_percentage: i64,
}

impl CourseSummary {
    /// Card for the public catalog listing.
    pub fn catalog(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            rating: PLACEHOLDER_RATING,
            students_count: 0,
            price_status: "Free".to_owned(),
            total_lessons: 0,
            completed_lessons: 0,
            progress_percentage: 0,
        }
    }

    /// Card for a user's enrolled-courses listing.
    pub fn enrolled(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            rating: PLACEHOLDER_RATING,
            students_count: ENROLLED_STUDENTS_COUNT,
            price_status: "Enrolled".to_owned(),
            total_lessons: ENROLLED_TOTAL_LESSONS,
            completed_lessons: 0,
            progress_percentage: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course {
            id: 7,
            title: "Rust Basics".into(),
            description: Some("Ownership and borrowing".into()),
        }
    }

    #[test]
    fn catalog_card_defaults() {
        let card = CourseSummary::catalog(course());
        assert_eq!(card.id, 7);
        assert_eq!(card.rating, PLACEHOLDER_RATING);
        assert_eq!(card.students_count, 0);
        assert_eq!(card.price_status, "Free");
        assert_eq!(card.total_lessons, 0);
        assert_eq!(card.progress_percentage, 0);
    }

    #[test]
    fn enrolled_card_defaults() {
        let card = CourseSummary::enrolled(course());
        assert_eq!(card.price_status, "Enrolled");
        assert_eq!(card.students_count, ENROLLED_STUDENTS_COUNT);
        assert_eq!(card.total_lessons, ENROLLED_TOTAL_LESSONS);
        assert_eq!(card.completed_lessons, 0);
    }

    #[test]
    fn detail_flattens_course_fields() {
        let detail = CourseDetail {
            course: course(),
            questions: vec![Question {
                id: 1,
                text: "What moves ownership?".into(),
                answers: vec![Answer {
                    id: 1,
                    text: "Assignment".into(),
                    is_correct: true,
                }],
            }],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Rust Basics");
        assert_eq!(json["questions"][0]["answers"][0]["is_correct"], true);
    }
}
