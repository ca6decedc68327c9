use serde::Deserialize;

use super::RepositorySummary;

/// A payload returned by the repositories API.
///
/// Listings come back as arrays and single repositories as objects.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Response {
    /// A listing of repositories, possibly containing `null` entries.
    Many(Vec<Option<RepositorySummary>>),

    /// A single repository.
    Single(RepositorySummary),
}

impl Response {
    /// Turns the payload into candidate repositories, skipping `null` entries.
    pub fn into_candidates(self) -> Vec<RepositorySummary> {
        match self {
            Response::Many(repositories) => repositories.into_iter().flatten().collect(),
            Response::Single(repository) => vec![repository],
        }
    }
}
