//! Error types for Tally

use thiserror::Error;

use crate::endpoints::Endpoint;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected status {status} from {endpoint}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("Simulated failure for {0}")]
    Simulated(Endpoint),
}

pub type Result<T> = std::result::Result<T, Error>;
