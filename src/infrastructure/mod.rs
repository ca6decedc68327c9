mod aggregator_concurrent;
mod fetcher_rest;
mod fetcher_timeout;
mod project_list;

pub use aggregator_concurrent::*;
pub use fetcher_rest::*;
pub use fetcher_timeout::*;
pub use project_list::*;
