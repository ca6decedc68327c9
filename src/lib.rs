//! Aggregates the GitHub repositories shown in the projects section of a portfolio.
//!
//! Repositories are fetched concurrently from the GitHub REST API, deduplicated by id
//! and sorted by last push, then exposed through [`ProjectList`].

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
