use std::time::Duration;

use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// Fetcher error
#[derive(Error, Debug)]
pub enum FetcherError {
    /// The API answered with a non success status
    #[error("Remote error: {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be decoded
    #[error("Parsing error: {0}")]
    Parse(String),

    /// The request did not settle in time
    #[error("Request {request} timed out after {timeout:?}")]
    Timeout { request: String, timeout: Duration },
}

/// Aggregation error
#[derive(Error, Debug)]
pub enum AggregationError {
    /// Waiting for the spawned fetch tasks failed
    #[error("Orchestration error: {0}")]
    Orchestration(String),
}

/// Configuration error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A repository was not given as `owner/name`
    #[error("Invalid repository '{0}', expected 'owner/name'")]
    InvalidRepository(String),
}
