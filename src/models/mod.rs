//! Domain models and request/response payloads
//!
//! Request payloads are validated before any repository call; invalid
//! input returns ValidationError, not panic.

pub mod avatar;
pub mod course;
pub mod user;
pub mod validation;

pub use avatar::{validate_avatar_url, MAX_AVATAR_BYTES};
pub use course::{
    Answer, Course, CourseDetail, CourseSummary, CreateCourseRequest, NewAnswer, NewQuestion,
    Question,
};
pub use user::{LoginRequest, RegisterRequest, UpdateProfileRequest, User};
pub use validation::ValidationError;
