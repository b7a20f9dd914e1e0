use kodisha_api::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors surfaced by feed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A backend fetch failed. The feed keeps its last-known-good contents;
    /// callers show [`FeedError::user_message`] and may retry.
    #[error("feed fetch failed: {0}")]
    Fetch(#[from] ApiError),
}

impl FeedError {
    /// The toast-ready message for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            FeedError::Fetch(api) => api.user_message(),
        }
    }
}
