use openai_api_rs::v1::error::APIError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to decode response body: {0}")]
    DecodeError(String),

    #[error("Failed to access the chat provider: {0}")]
    ProviderError(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            RelayError::DecodeError(error.to_string())
        } else {
            RelayError::HttpError(error.to_string())
        }
    }
}

impl From<APIError> for RelayError {
    fn from(error: APIError) -> Self {
        RelayError::ProviderError(error.to_string())
    }
}
