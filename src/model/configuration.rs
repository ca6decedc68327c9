use std::{fmt::Display, path::Path, str::FromStr};

use anyhow::Context;
use serde::Deserialize;

use super::{ConfigurationError, RepositoryRequest, Request, StdResult, UserRepositoriesRequest};

/// Number of placeholder cards shown while loading when nothing else can be estimated.
const MIN_PLACEHOLDER_CARDS: usize = 6;

const DEFAULT_HEADING: &str = "Recent Projects";

/// Repositories pinned for one user, fetched regardless of the per-user listing.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExplicitRepositories {
    /// The owner of the repositories.
    pub username: String,

    /// The names of the repositories.
    pub repo_names: Vec<String>,
}

impl ExplicitRepositories {
    /// Creates a new `ExplicitRepositories` for the given owner.
    pub fn new(username: &str, repo_names: &[&str]) -> Self {
        Self {
            username: username.to_string(),
            repo_names: repo_names.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// A repository given as `owner/name`, as accepted on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPath {
    /// The owner of the repository.
    pub owner: String,

    /// The name of the repository.
    pub name: String,
}

impl FromStr for RepositoryPath {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ConfigurationError::InvalidRepository(value.to_string())),
        }
    }
}

impl Display for RepositoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The projects section of the portfolio, as written in the configuration file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectsConfiguration {
    /// Whether the section is rendered at all.
    pub show: bool,

    /// The heading of the section.
    pub heading: String,

    /// Users whose most recently updated repositories are listed.
    pub usernames: Vec<String>,

    /// Number of repositories listed per user.
    pub items_per_user: u8,

    /// Repositories fetched individually.
    pub specific_repos: Vec<ExplicitRepositories>,
}

impl Default for ProjectsConfiguration {
    fn default() -> Self {
        Self {
            show: true,
            heading: DEFAULT_HEADING.to_string(),
            usernames: vec![],
            items_per_user: 0,
            specific_repos: vec![],
        }
    }
}

impl ProjectsConfiguration {
    /// Loads the configuration from a TOML file.
    pub fn from_file(path: &Path) -> StdResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))
    }

    /// Parses the configuration from a TOML document.
    pub fn from_toml(content: &str) -> StdResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Appends repositories given as `owner/name`, grouped by owner.
    pub fn add_repositories(&mut self, repositories: &[RepositoryPath]) {
        for repository in repositories {
            match self
                .specific_repos
                .iter_mut()
                .find(|explicit| explicit.username == repository.owner)
            {
                Some(explicit) => explicit.repo_names.push(repository.name.clone()),
                None => self.specific_repos.push(ExplicitRepositories {
                    username: repository.owner.clone(),
                    repo_names: vec![repository.name.clone()],
                }),
            }
        }
    }

    /// Builds the immutable input of the aggregator.
    pub fn fetch_configuration(&self) -> FetchConfiguration {
        FetchConfiguration::new(
            self.usernames.clone(),
            self.items_per_user,
            self.specific_repos.clone(),
        )
    }
}

/// Who is queried by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchConfiguration {
    /// Users queried for their most recently updated repositories, without duplicates.
    usernames: Vec<String>,

    /// Number of repositories listed per user, zero disables the listing.
    items_per_user: u8,

    /// Repositories fetched individually.
    explicit_repos: Vec<ExplicitRepositories>,
}

impl FetchConfiguration {
    /// Creates a new `FetchConfiguration`, dropping repeated user names.
    pub fn new(
        usernames: Vec<String>,
        items_per_user: u8,
        explicit_repos: Vec<ExplicitRepositories>,
    ) -> Self {
        let mut unique_usernames: Vec<String> = Vec::with_capacity(usernames.len());
        for username in usernames {
            if !unique_usernames.contains(&username) {
                unique_usernames.push(username);
            }
        }

        Self {
            usernames: unique_usernames,
            items_per_user,
            explicit_repos,
        }
    }

    /// Retrieves the queried user names.
    pub fn usernames(&self) -> &[String] {
        &self.usernames
    }

    /// Retrieves the number of repositories listed per user.
    pub fn items_per_user(&self) -> u8 {
        self.items_per_user
    }

    /// Retrieves the explicit repositories, flattened as `(owner, name)` pairs.
    pub fn explicit_repos(&self) -> impl Iterator<Item = (&str, &str)> {
        self.explicit_repos.iter().flat_map(|explicit| {
            explicit
                .repo_names
                .iter()
                .map(|name| (explicit.username.as_str(), name.as_str()))
        })
    }

    /// Returns `true` when the configuration asks for nothing.
    pub fn is_empty(&self) -> bool {
        self.requests().is_empty()
    }

    /// Returns the API requests implied by the configuration.
    pub fn requests(&self) -> Vec<Request> {
        let listings = self
            .usernames
            .iter()
            .filter(|_| self.items_per_user > 0)
            .map(|username| {
                Request::UserRepositories(UserRepositoriesRequest::new(
                    username,
                    self.items_per_user,
                ))
            });
        let explicit = self
            .explicit_repos()
            .map(|(owner, name)| Request::Repository(RepositoryRequest::new(owner, name)));

        listings.chain(explicit).collect()
    }

    /// Estimates how many cards will be shown, for placeholders while loading.
    pub fn placeholder_count(&self) -> usize {
        let estimated = self.usernames.len() * self.items_per_user as usize
            + self.explicit_repos().count();
        if estimated > 0 {
            estimated
        } else {
            MIN_PLACEHOLDER_CARDS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTFOLIO_TOML: &str = r#"
heading = "Recent Projects"
usernames = ["t-na10"]
items_per_user = 2

[[specific_repos]]
username = "t-na10"
repo_names = ["handwriting-generation", "marker"]

[[specific_repos]]
username = "sakurai-lab"
repo_names = ["nksn-thesis2024"]
"#;

    #[test]
    fn parse_toml_configuration() {
        let configuration = ProjectsConfiguration::from_toml(PORTFOLIO_TOML).unwrap();

        assert!(configuration.show);
        assert_eq!(vec!["t-na10".to_string()], configuration.usernames);
        assert_eq!(2, configuration.items_per_user);
        assert_eq!(
            vec![
                ExplicitRepositories::new("t-na10", &["handwriting-generation", "marker"]),
                ExplicitRepositories::new("sakurai-lab", &["nksn-thesis2024"]),
            ],
            configuration.specific_repos
        );
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let configuration = ProjectsConfiguration::from_toml("").unwrap();

        assert_eq!(ProjectsConfiguration::default(), configuration);
        assert_eq!("Recent Projects", configuration.heading);
    }

    #[test]
    fn parse_invalid_toml_fails() {
        ProjectsConfiguration::from_toml("items_per_user = \"many\"")
            .expect_err("Parsing should fail with a mistyped field");
    }

    #[test]
    fn parse_repository_path() {
        assert_eq!(
            RepositoryPath {
                owner: "bob".to_string(),
                name: "x".to_string()
            },
            "bob/x".parse::<RepositoryPath>().unwrap()
        );
        assert_eq!(
            Err(ConfigurationError::InvalidRepository("bob".to_string())),
            "bob".parse::<RepositoryPath>()
        );
        assert!("/x".parse::<RepositoryPath>().is_err());
        assert!("a/b/c".parse::<RepositoryPath>().is_err());
    }

    #[test]
    fn add_repositories_groups_by_owner() {
        let mut configuration = ProjectsConfiguration::from_toml(PORTFOLIO_TOML).unwrap();

        configuration.add_repositories(&[
            "sakurai-lab/paper-retrieval-qa-chat".parse().unwrap(),
            "bob/x".parse().unwrap(),
        ]);

        assert_eq!(
            vec![
                ExplicitRepositories::new("t-na10", &["handwriting-generation", "marker"]),
                ExplicitRepositories::new(
                    "sakurai-lab",
                    &["nksn-thesis2024", "paper-retrieval-qa-chat"]
                ),
                ExplicitRepositories::new("bob", &["x"]),
            ],
            configuration.specific_repos
        );
    }

    #[test]
    fn requests_lists_users_then_explicit_repositories() {
        let configuration = ProjectsConfiguration::from_toml(PORTFOLIO_TOML)
            .unwrap()
            .fetch_configuration();

        assert_eq!(
            vec![
                Request::UserRepositories(UserRepositoriesRequest::new("t-na10", 2)),
                Request::Repository(RepositoryRequest::new("t-na10", "handwriting-generation")),
                Request::Repository(RepositoryRequest::new("t-na10", "marker")),
                Request::Repository(RepositoryRequest::new("sakurai-lab", "nksn-thesis2024")),
            ],
            configuration.requests()
        );
    }

    #[test]
    fn requests_skip_listings_when_items_per_user_is_zero() {
        let configuration = FetchConfiguration::new(
            vec!["alice".to_string()],
            0,
            vec![ExplicitRepositories::new("bob", &["x"])],
        );

        assert_eq!(
            vec![Request::Repository(RepositoryRequest::new("bob", "x"))],
            configuration.requests()
        );
    }

    #[test]
    fn usernames_are_deduplicated() {
        let configuration = FetchConfiguration::new(
            vec!["alice".to_string(), "bob".to_string(), "alice".to_string()],
            1,
            vec![],
        );

        assert_eq!(&["alice".to_string(), "bob".to_string()], configuration.usernames());
        assert_eq!(2, configuration.requests().len());
    }

    #[test]
    fn empty_configuration() {
        let configuration = FetchConfiguration::default();

        assert!(configuration.is_empty());
        assert_eq!(6, configuration.placeholder_count());
    }

    #[test]
    fn placeholder_count_estimates_cards() {
        let configuration = ProjectsConfiguration::from_toml(PORTFOLIO_TOML)
            .unwrap()
            .fetch_configuration();

        assert_eq!(2 + 3, configuration.placeholder_count());
    }
}
