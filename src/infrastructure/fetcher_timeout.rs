use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use log::warn;
use tokio::time::timeout;

use crate::{FetcherError, RepositoryFetcher, Request, Response, StdResult};

/// This struct is responsible for bounding the time a fetcher request may take.
pub struct FetcherTimeout {
    /// The fetcher to be bounded.
    fetcher: Arc<dyn RepositoryFetcher>,

    /// The maximum time a request may take.
    timeout: Duration,
}

impl FetcherTimeout {
    /// Creates a new `FetcherTimeout` instance with the given fetcher and timeout.
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }
}

#[async_trait::async_trait]
impl RepositoryFetcher for FetcherTimeout {
    /// Fails the request if it does not settle before the timeout.
    async fn fetch(&self, request: &Request) -> StdResult<Response> {
        match timeout(self.timeout, self.fetcher.fetch(request)).await {
            Ok(response) => response,
            Err(_) => {
                warn!("Request {request} timed out after {:?}", self.timeout);
                Err(anyhow!(FetcherError::Timeout {
                    request: request.to_string(),
                    timeout: self.timeout,
                }))
            }
        }
    }
}
