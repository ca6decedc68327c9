use std::sync::Arc;

use log::info;

use crate::{
    FetchConfiguration, ProjectListState, ProjectListStatus, ProjectListView,
    RepositoryAggregator,
};

/// The projects section: runs the aggregator and exposes its observable state.
pub struct ProjectList {
    aggregator: Arc<dyn RepositoryAggregator>,
    configuration: Arc<FetchConfiguration>,
    heading: String,
    state: Arc<ProjectListState>,
}

impl ProjectList {
    /// Creates a new `ProjectList` instance with the given aggregator and configuration.
    pub fn new(
        aggregator: Arc<dyn RepositoryAggregator>,
        configuration: Arc<FetchConfiguration>,
        heading: &str,
    ) -> Self {
        Self {
            aggregator,
            configuration,
            heading: heading.to_string(),
            state: Arc::new(ProjectListState::default()),
        }
    }

    /// Retrieves the observable state.
    pub fn state(&self) -> &ProjectListState {
        &self.state
    }

    /// Fetches the repositories again, from `Loading` to a terminal status.
    pub async fn refresh(&self) -> ProjectListStatus {
        let token = self.state.begin().await;
        info!(
            "Loading projects, expecting up to {} cards",
            self.configuration.placeholder_count()
        );
        let result = self.aggregator.aggregate(&self.configuration).await;
        self.state.complete(token, result).await;

        self.state.status().await
    }

    /// Takes a snapshot of the section for rendering.
    pub async fn view(&self) -> ProjectListView {
        self.state
            .view(
                &self.heading,
                self.configuration.placeholder_count(),
                !self.configuration.is_empty(),
            )
            .await
    }
}
