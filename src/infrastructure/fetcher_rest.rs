use std::time::Duration;

use anyhow::anyhow;
use log::debug;
use reqwest::{Client, header::ACCEPT};

use crate::{FetcherError, RepositoryFetcher, Request, Response, StdResult};

/// The REST production endpoint for GitHub.
pub const GITHUB_REST_ENDPOINT: &str = "https://api.github.com";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches repository data from the GitHub REST API.
pub struct RestFetcher {
    client: Client,
    endpoint: String,
}

impl RestFetcher {
    /// Creates a new `RestFetcher` instance for the given endpoint.
    pub fn try_new(endpoint: &str, timeout: Duration) -> StdResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RepositoryFetcher for RestFetcher {
    async fn fetch(&self, request: &Request) -> StdResult<Response> {
        let url = format!("{}{}", self.endpoint, request.path());
        debug!("Fetching {request} from {url}");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .query(&request.query())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(FetcherError::Status {
                url,
                status: status.as_u16(),
            }));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| anyhow!(FetcherError::Parse(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::{RepositoryRequest, RepositorySummary, UserRepositoriesRequest};

    use super::*;

    fn build_fetcher(server: &MockServer) -> RestFetcher {
        RestFetcher::try_new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetch_user_repositories() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users/alice/repos")
                    .query_param("sort", "updated")
                    .query_param("direction", "desc")
                    .query_param("per_page", "2");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!([
                        {
                            "id": 1,
                            "name": "a",
                            "full_name": "alice/a",
                            "svn_url": "https://github.com/alice/a",
                            "pushed_at": "2024-01-01"
                        },
                        {
                            "id": 2,
                            "name": "b",
                            "full_name": "alice/b",
                            "svn_url": "https://github.com/alice/b",
                            "pushed_at": "2024-03-01"
                        }
                    ]));
            })
            .await;
        let fetcher = build_fetcher(&server);
        let request = Request::UserRepositories(UserRepositoriesRequest::new("alice", 2));

        let response = fetcher.fetch(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            Response::Many(vec![
                Some(RepositorySummary::new(Some(1), "alice/a", Some("2024-01-01"))),
                Some(RepositorySummary::new(Some(2), "alice/b", Some("2024-03-01"))),
            ]),
            response
        );
    }

    #[tokio::test]
    async fn fetch_single_repository() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/bob/x");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "id": 3,
                        "name": "x",
                        "full_name": "bob/x",
                        "svn_url": "https://github.com/bob/x",
                        "pushed_at": null
                    }));
            })
            .await;
        let fetcher = build_fetcher(&server);
        let request = Request::Repository(RepositoryRequest::new("bob", "x"));

        let response = fetcher.fetch(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            Response::Single(RepositorySummary::new(Some(3), "bob/x", None)),
            response
        );
    }

    #[tokio::test]
    async fn fetch_fails_on_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/bob/missing");
                then.status(404)
                    .header("Content-Type", "application/json")
                    .json_body(json!({ "message": "Not Found" }));
            })
            .await;
        let fetcher = build_fetcher(&server);
        let request = Request::Repository(RepositoryRequest::new("bob", "missing"));

        let error = fetcher
            .fetch(&request)
            .await
            .expect_err("Fetch should fail on a 404 status");

        assert!(matches!(
            error.downcast_ref::<FetcherError>(),
            Some(FetcherError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn fetch_fails_on_undecodable_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/owner/repository");
                then.status(200).body("not json");
            })
            .await;
        let fetcher = build_fetcher(&server);

        let error = fetcher
            .fetch(&Request::dummy_repository())
            .await
            .expect_err("Fetch should fail on an undecodable body");

        assert!(matches!(
            error.downcast_ref::<FetcherError>(),
            Some(FetcherError::Parse(_))
        ));
    }
}
