//! Avatar value validation
//!
//! Avatars are stored inline in the users table, either as a plain URL or
//! as a base64 `data:` URL. Only the latter is inspected: the payload must
//! decode and the decoded size is capped so a single row cannot balloon.

use base64::Engine;

use crate::models::validation::ValidationError;

/// Maximum decoded avatar size in bytes (5 MB)
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Validate an avatar value before storing it.
///
/// Plain URLs pass through untouched. A base64 `data:` URL must decode,
/// and its decoded payload must be at most [`MAX_AVATAR_BYTES`]. The
/// decoded bytes are discarded; the original string is what gets stored.
pub fn validate_avatar_url(url: &str) -> Result<(), ValidationError> {
    if !url.starts_with("data:") || !url.contains(";base64,") {
        return Ok(());
    }

    // Payload starts after the first comma, like the data-URL grammar says.
    let payload = match url.split_once(',') {
        Some((_, payload)) => payload,
        None => return Ok(()),
    };

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| ValidationError::InvalidFormat {
            field: "avatar_url",
            reason: "invalid base64 image payload",
        })?;

    if decoded.len() > MAX_AVATAR_BYTES {
        return Err(ValidationError::TooLarge {
            field: "avatar_url",
            max_bytes: MAX_AVATAR_BYTES,
        });
    }

    Ok(())
}
