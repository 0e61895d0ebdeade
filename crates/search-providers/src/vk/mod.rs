mod api;
mod mobile;
mod oauth;
mod parser;

pub use api::*;
pub use mobile::*;
pub use oauth::*;
pub use parser::{ApiError, ParseError};

#[derive(Debug, thiserror::Error)]
pub enum VkClientError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    ApiError(#[from] ApiError),
    #[error("OAuth exchange failed: {0}")]
    OAuthError(String),
    #[error("Session cookie contains characters not allowed in a header")]
    InvalidSessionCookie,
}

impl VkClientError {
    /// Returns true when VK refused the access token used for the request.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, VkClientError::ApiError(error) if error.is_authorization_failure())
    }
}

#[cfg(test)]
mod tests;
