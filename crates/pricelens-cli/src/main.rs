use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pricelens_client::PriceApiClient;
use pricelens_core::{FilterSpec, PlatformFilter, SortKey};

mod crawl;
mod export;
mod render;
mod result;
mod view;

#[derive(Debug, Parser)]
#[command(name = "pricelens")]
#[command(about = "Multi-platform price comparison from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the crawlers the backend can run
    Crawlers,
    /// Crawl platforms for a keyword and show the combined results
    Crawl(CrawlArgs),
    /// Show a stored crawl result
    Result {
        /// Stored result (session) id
        id: u64,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Find products similar to one item of a stored result
    Compare {
        /// Stored result (session) id
        id: u64,
        /// 1-based position of the item in the filtered, sorted listing
        item: usize,
        /// Show every similar product instead of the first few
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Debug, Args)]
struct CrawlArgs {
    /// Search keyword
    keyword: String,
    /// Platform to crawl (repeatable); defaults to every available crawler
    #[arg(long = "platform", short = 'p')]
    platforms: Vec<String>,
    /// Products to fetch per platform (clamped to 1..=1000)
    #[arg(long)]
    max_products: Option<u32>,
    /// Lowest price the crawlers should accept
    #[arg(long)]
    min_price: Option<u64>,
    /// Highest price the crawlers should accept
    #[arg(long)]
    max_price: Option<u64>,
    /// Write the full response as JSON to the export directory
    #[arg(long)]
    export: bool,
    #[command(flatten)]
    view: ViewArgs,
}

/// Filter, sort, and page selection applied to a listing.
#[derive(Debug, Clone, Args)]
struct ViewArgs {
    /// Only show products from this platform id ("all" for every platform)
    #[arg(long)]
    only: Option<String>,
    /// Hide products cheaper than this
    #[arg(long)]
    filter_min: Option<f64>,
    /// Hide products more expensive than this
    #[arg(long)]
    filter_max: Option<f64>,
    /// price-asc, price-desc, name-asc, name-desc, or none
    #[arg(long)]
    sort: Option<String>,
    /// 1-based page to show
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl ViewArgs {
    fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            platform: self
                .only
                .as_deref()
                .map_or(PlatformFilter::All, PlatformFilter::parse),
            min_price: self.filter_min,
            max_price: self.filter_max,
        }
    }

    fn sort_key(&self, default: SortKey) -> SortKey {
        self.sort.as_deref().map_or(default, SortKey::from_key)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = pricelens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("pricelens: run `pricelens --help` for available commands");
        return Ok(());
    };

    tracing::debug!(config = ?config, "configuration loaded");
    let client = PriceApiClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?;

    match command {
        Commands::Crawlers => crawl::run_crawlers(&client).await?,
        Commands::Crawl(args) => crawl::run_crawl(&client, &config, args).await?,
        Commands::Result { id, view } => result::run_result(&client, &config, id, &view).await?,
        Commands::Compare {
            id,
            item,
            all,
            view,
        } => result::run_compare(&client, &config, id, item, all, &view).await?,
    }

    Ok(())
}
