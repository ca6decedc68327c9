use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use log::{debug, info};

use portfolio_projects::{
    ConcurrentAggregator, FetcherTimeout, GITHUB_REST_ENDPOINT, ProjectList,
    ProjectsConfiguration, RepositoryAggregator, RepositoryPath, RestFetcher, StdResult,
};

/// Command line arguments for the projects section
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// TOML file describing the projects section
    #[arg(short, long, env = "PORTFOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Heading of the section, overrides the configuration file
    #[arg(long)]
    heading: Option<String>,

    /// Users whose most recently updated repositories are listed, added to the configuration file
    #[arg(short, long, value_delimiter = ',')]
    usernames: Vec<String>,

    /// Number of repositories listed per user, overrides the configuration file
    #[arg(short, long)]
    items_per_user: Option<u8>,

    /// Repositories fetched individually as owner/name, added to the configuration file
    #[arg(short, long, value_delimiter = ',')]
    repos: Vec<RepositoryPath>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_ENDPOINT", default_value = GITHUB_REST_ENDPOINT)]
    api_endpoint: String,

    /// Maximum time in seconds a single request may take
    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    let args = Args::parse();
    let configuration = load_configuration(&args)?;
    debug!("Configuration: {configuration:?}");
    if !configuration.show {
        info!("Projects section is hidden, nothing to fetch");
        return Ok(());
    }

    let project_list = ProjectList::new(
        build_aggregator(&args)?,
        Arc::new(configuration.fetch_configuration()),
        &configuration.heading,
    );
    project_list.refresh().await;
    print!("{}", project_list.view().await);

    Ok(())
}

fn load_configuration(args: &Args) -> StdResult<ProjectsConfiguration> {
    let mut configuration = match &args.config {
        Some(path) => ProjectsConfiguration::from_file(path)?,
        None => ProjectsConfiguration::default(),
    };
    if let Some(heading) = &args.heading {
        configuration.heading = heading.to_owned();
    }
    if let Some(items_per_user) = args.items_per_user {
        configuration.items_per_user = items_per_user;
    }
    configuration.usernames.extend(args.usernames.iter().cloned());
    configuration.add_repositories(&args.repos);

    Ok(configuration)
}

fn build_aggregator(args: &Args) -> StdResult<Arc<dyn RepositoryAggregator>> {
    let timeout = Duration::from_secs(args.request_timeout_secs);
    let fetcher = Arc::new(FetcherTimeout::new(
        Arc::new(RestFetcher::try_new(&args.api_endpoint, timeout)?),
        timeout,
    ));

    Ok(Arc::new(ConcurrentAggregator::new(fetcher)))
}
