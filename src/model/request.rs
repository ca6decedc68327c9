use std::fmt::Display;

use serde::Serialize;

/// A request to the GitHub REST API
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Hash)]
pub enum Request {
    /// A request to list the most recently updated repositories of a user.
    UserRepositories(UserRepositoriesRequest),

    /// A request to fetch one repository by owner and name.
    Repository(RepositoryRequest),
}

impl Request {
    /// Returns the API path of the request, relative to the endpoint.
    pub fn path(&self) -> String {
        match self {
            Request::UserRepositories(request) => format!("/users/{}/repos", request.username),
            Request::Repository(request) => format!("/repos/{}/{}", request.owner, request.name),
        }
    }

    /// Returns the query parameters of the request.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Request::UserRepositories(request) => vec![
                ("sort", "updated".to_string()),
                ("direction", "desc".to_string()),
                ("per_page", request.per_page.to_string()),
            ],
            Request::Repository(_) => vec![],
        }
    }

    /// Creates a dummy `Repository` request for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy_repository() -> Self {
        Self::Repository(RepositoryRequest::new("owner", "repository"))
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::UserRepositories(request) => write!(f, "{}", request),
            Request::Repository(request) => write!(f, "{}", request),
        }
    }
}

/// A request listing the repositories of a user, most recently updated first
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Hash)]
pub struct UserRepositoriesRequest {
    /// The user name.
    pub(crate) username: String,

    /// The number of repositories to return.
    pub(crate) per_page: u8,
}

impl UserRepositoriesRequest {
    /// Creates a new `UserRepositoriesRequest` with the given user name and page size.
    pub fn new(username: &str, per_page: u8) -> Self {
        Self {
            username: username.to_string(),
            per_page,
        }
    }
}

impl Display for UserRepositoriesRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UserRepositoriesRequest: username={}, per_page={}",
            self.username, self.per_page
        )
    }
}

/// A request for a single repository
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Hash)]
pub struct RepositoryRequest {
    /// The owner of the repository.
    pub(crate) owner: String,

    /// The name of the repository.
    pub(crate) name: String,
}

impl RepositoryRequest {
    /// Creates a new `RepositoryRequest` with the given owner and name.
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }
}

impl Display for RepositoryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RepositoryRequest: {}/{}", self.owner, self.name)
    }
}
