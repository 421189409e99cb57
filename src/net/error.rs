use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("client key is not configured")]
    NotConfigured,
}
