use crate::{Request, Response, StdResult};

/// A trait for fetching repository data from the API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryFetcher: Sync + Send {
    /// Fetches the payload answering a single request.
    async fn fetch(&self, request: &Request) -> StdResult<Response>;
}
