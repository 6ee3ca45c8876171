//! User account models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user account.
///
/// The password column is intentionally never part of this type; queries that
/// need it fetch it as a scalar and drop it immediately after the comparison.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Payload for `POST /auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Payload for `POST /auth/login`
///
/// `login` matches either a username or an email address.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Payload for `PUT /api/v1/users/{user_id}`
///
/// All fields are optional; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    /// True when no field is present, in which case the update is a no-op
    /// apart from the existence check.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.avatar_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_without_null_avatar() {
        let user = User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            avatar_url: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("avatar_url").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn user_serializes_avatar_when_present() {
        let user = User {
            id: 2,
            username: "bob".into(),
            email: "bob@example.com".into(),
            avatar_url: Some("data:image/png;base64,AAAA".into()),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["avatar_url"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn empty_update_detected() {
        assert!(UpdateProfileRequest::default().is_empty());
        let update = UpdateProfileRequest {
            email: Some("new@example.com".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
