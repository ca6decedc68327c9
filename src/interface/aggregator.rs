use crate::{AggregateResult, FetchConfiguration, StdResult};

/// A trait for merging the repositories of several requests into one list.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryAggregator: Sync + Send {
    /// Fetches every repository the configuration asks for.
    ///
    /// Failures of individual requests are reported in the result; an error is
    /// only returned when the aggregation itself breaks.
    async fn aggregate(&self, configuration: &FetchConfiguration) -> StdResult<AggregateResult>;
}
