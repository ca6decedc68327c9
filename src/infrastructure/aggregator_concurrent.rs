use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::{
    AggregateResult, AggregationError, FetchConfiguration, RepositoryAggregator,
    RepositoryCollector, RepositoryFetcher, StdResult,
};

/// An aggregator that issues every request concurrently and merges them once all have settled.
pub struct ConcurrentAggregator {
    /// The fetcher used for every request
    fetcher: Arc<dyn RepositoryFetcher>,
}

impl ConcurrentAggregator {
    /// Creates a new `ConcurrentAggregator` instance with the given fetcher.
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl RepositoryAggregator for ConcurrentAggregator {
    async fn aggregate(&self, configuration: &FetchConfiguration) -> StdResult<AggregateResult> {
        let requests = configuration.requests();
        if requests.is_empty() {
            info!("No repositories requested");
            return Ok(AggregateResult::default());
        }

        let handles = requests
            .into_iter()
            .map(|request| {
                let fetcher = Arc::clone(&self.fetcher);
                tokio::spawn(async move {
                    let response = fetcher.fetch(&request).await;
                    (request, response)
                })
            })
            .collect::<Vec<_>>();
        info!("Started {} requests", handles.len());

        let settled = join_all(handles)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AggregationError::Orchestration(e.to_string()))?;

        let mut collector = RepositoryCollector::default();
        for (request, response) in settled {
            match response {
                Ok(response) => {
                    debug!("Fetched {request}");
                    collector.collect(response);
                }
                Err(e) => {
                    warn!("Failed to fetch {request}: {e}");
                    collector.record_failure();
                }
            }
        }
        let result = collector.into_result();
        info!(
            "Aggregated {} repositories, partial failure: {}",
            result.repositories().len(),
            result.has_partial_failure()
        );

        Ok(result)
    }
}
