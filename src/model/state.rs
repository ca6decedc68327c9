use std::fmt::Display;

use log::{error, info};
use tokio::sync::RwLock;

use super::{AggregateResult, RepositorySummary, StdResult};

/// Message shown when some requests failed but others may have succeeded.
pub const PARTIAL_FAILURE_MESSAGE: &str = "Some repositories could not be fetched.";

/// Message shown when the aggregation itself failed.
pub const UNEXPECTED_FAILURE_MESSAGE: &str =
    "An unexpected error occurred while fetching repositories.";

/// Message shown when nothing matched a non empty configuration.
pub const NO_RESULTS_MESSAGE: &str = "No projects found matching your criteria.";

/// Status of the project list, as observed by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectListStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// An aggregation is in flight.
    Loading,
    /// The last aggregation fully succeeded.
    Ready,
    /// The last aggregation succeeded but some requests failed.
    ReadyWithWarning,
    /// The last aggregation failed as a whole.
    Failed,
}

/// Identifies one invocation of the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationToken(u64);

#[derive(Debug, Default)]
struct ProjectListInner {
    generation: u64,
    status: ProjectListStatus,
    error_message: Option<String>,
    repositories: Vec<RepositorySummary>,
}

/// The observable state of the project list
#[derive(Debug, Default)]
pub struct ProjectListState {
    inner: RwLock<ProjectListInner>,
}

impl ProjectListState {
    /// Enters `Loading`, clears previous results and returns the token of the new invocation.
    pub async fn begin(&self) -> InvocationToken {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.status = ProjectListStatus::Loading;
        inner.error_message = None;
        inner.repositories.clear();

        InvocationToken(inner.generation)
    }

    /// Applies the result of an invocation.
    ///
    /// Returns `false` when a newer invocation started in between, in which case
    /// the result is discarded.
    pub async fn complete(
        &self,
        token: InvocationToken,
        result: StdResult<AggregateResult>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        if token.0 != inner.generation {
            info!(
                "Discarding result of invocation #{}, superseded by #{}",
                token.0, inner.generation
            );
            return false;
        }

        match result {
            Ok(result) => {
                inner.status = if result.has_partial_failure {
                    ProjectListStatus::ReadyWithWarning
                } else {
                    ProjectListStatus::Ready
                };
                inner.error_message = result
                    .has_partial_failure
                    .then(|| PARTIAL_FAILURE_MESSAGE.to_string());
                inner.repositories = result.repositories;
            }
            Err(e) => {
                error!("Unexpected error during fetch: {e}");
                inner.status = ProjectListStatus::Failed;
                inner.error_message = Some(UNEXPECTED_FAILURE_MESSAGE.to_string());
                inner.repositories.clear();
            }
        }

        true
    }

    /// Retrieves the current status.
    pub async fn status(&self) -> ProjectListStatus {
        self.inner.read().await.status
    }

    /// Returns `true` while an aggregation is in flight.
    pub async fn is_loading(&self) -> bool {
        self.status().await == ProjectListStatus::Loading
    }

    /// Retrieves the error message, if any.
    pub async fn error_message(&self) -> Option<String> {
        self.inner.read().await.error_message.clone()
    }

    /// Retrieves the current repositories.
    pub async fn repositories(&self) -> Vec<RepositorySummary> {
        self.inner.read().await.repositories.clone()
    }

    /// Takes a snapshot of the state for rendering.
    pub async fn view(
        &self,
        heading: &str,
        placeholders: usize,
        has_criteria: bool,
    ) -> ProjectListView {
        let inner = self.inner.read().await;

        ProjectListView {
            heading: heading.to_string(),
            status: inner.status,
            error_message: inner.error_message.clone(),
            repositories: inner.repositories.clone(),
            placeholders,
            has_criteria,
        }
    }
}

/// A snapshot of the project list, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListView {
    pub(crate) heading: String,
    pub(crate) status: ProjectListStatus,
    pub(crate) error_message: Option<String>,
    pub(crate) repositories: Vec<RepositorySummary>,
    pub(crate) placeholders: usize,
    pub(crate) has_criteria: bool,
}

impl Display for ProjectListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.heading)?;
        let is_loading = self.status == ProjectListStatus::Loading;
        if is_loading {
            writeln!(f, "Loading projects...")?;
        }
        if let Some(error_message) = &self.error_message {
            writeln!(f, "{error_message}")?;
        }

        if is_loading {
            for _ in 0..self.placeholders {
                writeln!(f, "  - ...")?;
            }
        } else if !self.repositories.is_empty() {
            for repository in &self.repositories {
                writeln!(f, "  - {repository}")?;
            }
        } else if self.error_message.is_none()
            && self.has_criteria
            && self.status != ProjectListStatus::Idle
        {
            writeln!(f, "{NO_RESULTS_MESSAGE}")?;
        }

        Ok(())
    }
}
