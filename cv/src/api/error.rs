//! API error types

use thiserror::Error;

/// Maximum number of body characters kept in a status error message
const BODY_PREVIEW_LIMIT: usize = 512;

/// Errors that can occur during Checkvist API calls
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a status error from a non-2xx response body
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: preview_body(body),
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidResponse(_) | ApiError::Json(_) => None,
        }
    }

    /// Check if the credentials were rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ApiError::from_status(502, "bad gateway");
        assert_eq!(err.to_string(), "API error 502: bad gateway");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_empty_body_preview() {
        let err = ApiError::from_status(500, "   \n");
        assert!(err.to_string().contains("<empty body>"));
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(BODY_PREVIEW_LIMIT + 10);
        match ApiError::from_status(500, &body) {
            ApiError::Status { message, .. } => {
                assert!(message.ends_with("..."));
                assert_eq!(message.len(), BODY_PREVIEW_LIMIT + 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(ApiError::from_status(403, "").is_unauthorized());
        assert!(!ApiError::from_status(404, "").is_unauthorized());
        assert!(!ApiError::InvalidResponse("bad".to_string()).is_unauthorized());
    }
}
