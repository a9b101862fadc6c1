use thiserror::Error;

/// Failure of one call to the marketplace API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// The envelope came back with `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// The response did not have the shape we expect.
    #[error("unexpected response: {0}")]
    Schema(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text shown in the error toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error. Check your connection and try again.".into(),
            ApiError::Http { status: 401, .. } => "Your session has expired. Please sign in again.".into(),
            ApiError::Http { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Http { status, .. } => format!("Server error (HTTP {status})."),
            ApiError::Rejected { message } => message.clone(),
            ApiError::Schema(_) => "The server sent something we could not read.".into(),
            ApiError::Encode(_) => "Could not prepare the request.".into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_reads_as_expired_session() {
        let e = ApiError::Http { status: 401, message: "jwt expired".into() };
        assert_eq!(e.user_message(), "Your session has expired. Please sign in again.");
    }

    #[test]
    fn http_message_is_preferred_over_status() {
        let e = ApiError::Http { status: 422, message: "Campaign is closed".into() };
        assert_eq!(e.user_message(), "Campaign is closed");
        let e = ApiError::Http { status: 500, message: String::new() };
        assert_eq!(e.user_message(), "Server error (HTTP 500).");
    }
}
