use std::collections::HashSet;

use log::warn;

use super::{RepositoryId, RepositorySummary, Response};

/// The merged outcome of one aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    /// Deduplicated repositories, most recently pushed first.
    pub(crate) repositories: Vec<RepositorySummary>,

    /// Whether at least one request failed.
    pub(crate) has_partial_failure: bool,
}

impl AggregateResult {
    /// Creates a new `AggregateResult`.
    pub fn new(repositories: Vec<RepositorySummary>, has_partial_failure: bool) -> Self {
        Self {
            repositories,
            has_partial_failure,
        }
    }

    /// Retrieves the repositories.
    pub fn repositories(&self) -> &[RepositorySummary] {
        &self.repositories
    }

    /// Returns `true` when at least one request failed.
    pub fn has_partial_failure(&self) -> bool {
        self.has_partial_failure
    }
}

/// Accumulates settled responses of one aggregation.
#[derive(Debug, Default)]
pub struct RepositoryCollector {
    repositories: Vec<RepositorySummary>,
    seen_ids: HashSet<RepositoryId>,
    has_partial_failure: bool,
}

impl RepositoryCollector {
    /// Adds the candidates of a successful response.
    ///
    /// Candidates with an already seen id are dropped. Candidates without an id
    /// are always kept.
    pub fn collect(&mut self, response: Response) {
        for repository in response.into_candidates() {
            match repository.id() {
                Some(id) => {
                    if self.seen_ids.insert(id) {
                        self.repositories.push(repository);
                    }
                }
                None => {
                    warn!("Repository without id found: {}", repository.key());
                    self.repositories.push(repository);
                }
            }
        }
    }

    /// Records that a request failed.
    pub fn record_failure(&mut self) {
        self.has_partial_failure = true;
    }

    /// Sorts the accumulated repositories and returns the result.
    pub fn into_result(mut self) -> AggregateResult {
        // Stable: ties keep their arrival order, missing timestamps (None) go last.
        self.repositories
            .sort_by(|a, b| b.pushed_at().cmp(&a.pushed_at()));

        AggregateResult::new(self.repositories, self.has_partial_failure)
    }
}
