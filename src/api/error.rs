//! API error taxonomy and server error-detail extraction.

use serde::Deserialize;

/// Error payload the backend attaches to rejected requests.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors from outbound API calls.
///
/// `Unauthorized` is reserved for the global expiry policy on
/// authenticated calls; a 401 from the login endpoint itself surfaces
/// as `Rejected` so bad credentials never tear down the session.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("Could not reach the server: {0}")]
    Transport(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Malformed response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message for display next to a form.
    ///
    /// Server rejections surface the backend's `detail` string; when the
    /// server gives none, the caller's generic fallback is used instead.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { detail, .. } if !detail.is_empty() => detail.clone(),
            ApiError::Rejected { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }

    /// Build a `Rejected` error from a non-success response, pulling the
    /// `detail` field out of the body when one is present.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_default();
        ApiError::Rejected { status, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_server_detail() {
        let err = ApiError::Rejected {
            status: 401,
            detail: "Incorrect username or password".into(),
        };
        assert_eq!(err.to_string(), "Incorrect username or password");
        assert_eq!(err.user_message("Login failed"), "Incorrect username or password");
    }

    #[test]
    fn rejected_without_detail_uses_fallback() {
        let err = ApiError::Rejected {
            status: 500,
            detail: String::new(),
        };
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn transport_errors_keep_their_message() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(
            err.user_message("Login failed"),
            "Could not reach the server: connection refused"
        );
    }
}
