//! User-visible notices shown in the status bar.

use crate::api::{api_error, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A dismissable message: confirmation of a completed action, or an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Short description of a failed request for an error notice.
///
/// Uses the server's own message when it sent one, otherwise `fallback`.
/// Timeouts and connection failures get their own wording.
pub fn describe_error(err: &anyhow::Error, fallback: &str) -> String {
    match api_error(err) {
        Some(e) if e.is_timeout() => "Request timed out. Please try again.".to_string(),
        Some(e) if e.is_connect() => {
            "Unable to connect to server. Check your connection.".to_string()
        }
        Some(ApiError::Unauthorized) => "Session expired. Please log in again.".to_string(),
        Some(e) => e
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_describe_error_prefers_server_message() {
        let err: anyhow::Error = ApiError::Rejected("Event already exists".to_string()).into();
        let err = err.context("Failed to create event");
        assert_eq!(describe_error(&err, "Failed to create event"), "Event already exists");
    }

    #[test]
    fn test_describe_error_falls_back() {
        let err: anyhow::Error = ApiError::NotFound("no body".to_string()).into();
        assert_eq!(describe_error(&err, "Could not save work"), "Could not save work");

        let plain = anyhow::anyhow!("boom");
        assert_eq!(describe_error(&plain, "Failed to save attendance"), "Failed to save attendance");
    }

    #[test]
    fn test_describe_error_unauthorized() {
        let err: Result<(), ApiError> = Err(ApiError::Unauthorized);
        let err = err.context("Failed to load roster").unwrap_err();
        assert_eq!(describe_error(&err, "x"), "Session expired. Please log in again.");
    }

    #[test]
    fn test_notice_kinds() {
        assert!(Notice::error("Error", "Failed").is_error());
        assert!(!Notice::info("Saved", "Done").is_error());
    }
}
