use std::{fmt::Display, ops::Deref};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// The identifier of a repository on GitHub.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepositoryId(pub u64);

impl Deref for RepositoryId {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary of a GitHub repository, as displayed on a project card.
///
/// Every field is optional: error payloads and partial objects still
/// deserialize, and are kept as id-less entries.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositorySummary {
    /// The identifier of the repository.
    pub(crate) id: Option<RepositoryId>,

    /// The short name of the repository.
    pub(crate) name: Option<String>,

    /// The `owner/name` of the repository.
    pub(crate) full_name: Option<String>,

    /// The description of the repository.
    pub(crate) description: Option<String>,

    /// The browse link of the repository.
    pub(crate) svn_url: Option<String>,

    /// The number of stars the repository has.
    pub(crate) stargazers_count: Option<u32>,

    /// The API link listing the languages of the repository.
    pub(crate) languages_url: Option<String>,

    /// The last push timestamp, as sent by the API.
    pub(crate) pushed_at: Option<String>,
}

impl RepositorySummary {
    /// Creates a new `RepositorySummary` with the given id, full name and push timestamp.
    pub fn new(id: Option<u64>, full_name: &str, pushed_at: Option<&str>) -> Self {
        let name = full_name.rsplit('/').next().unwrap_or(full_name);

        Self {
            id: id.map(RepositoryId),
            name: Some(name.to_string()),
            full_name: Some(full_name.to_string()),
            svn_url: Some(format!("https://github.com/{full_name}")),
            pushed_at: pushed_at.map(|pushed_at| pushed_at.to_string()),
            ..Default::default()
        }
    }

    /// Retrieves the repository id.
    pub fn id(&self) -> Option<RepositoryId> {
        self.id
    }

    /// Retrieves the repository name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Retrieves the repository full name.
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Retrieves the repository description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Retrieves the repository browse link.
    pub fn browse_url(&self) -> Option<&str> {
        self.svn_url.as_deref()
    }

    /// Retrieves the total stars of the repository.
    pub fn star_count(&self) -> Option<u32> {
        self.stargazers_count
    }

    /// Retrieves the languages API link of the repository.
    pub fn languages_url(&self) -> Option<&str> {
        self.languages_url.as_deref()
    }

    /// Retrieves the parsed push timestamp, `None` when missing or invalid.
    pub fn pushed_at(&self) -> Option<DateTime<Utc>> {
        let pushed_at = self.pushed_at.as_deref()?;
        if let Ok(pushed_at) = DateTime::parse_from_rfc3339(pushed_at) {
            return Some(pushed_at.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(pushed_at, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|date| date.and_utc())
    }

    /// Returns a key identifying the card: id, then full name, then name.
    pub fn key(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .or_else(|| self.full_name.clone())
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Creates a dummy `RepositorySummary` for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy(id: u64, pushed_at: &str) -> Self {
        Self::new(Some(id), &format!("owner/repository-{id}"), Some(pushed_at))
    }
}

impl Display for RepositorySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().unwrap_or("<unnamed>"))?;
        if let Some(stars) = self.stargazers_count {
            write!(f, " ★{stars}")?;
        }
        if let Some(pushed_at) = self.pushed_at() {
            write!(f, " (pushed {})", pushed_at.format("%Y-%m-%d"))?;
        }
        if let Some(description) = self.description() {
            write!(f, " - {description}")?;
        }
        if let Some(browse_url) = self.browse_url() {
            write!(f, " <{browse_url}>")?;
        }

        Ok(())
    }
}
