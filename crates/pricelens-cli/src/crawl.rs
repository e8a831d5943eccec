//! `crawlers` and `crawl` command handlers.

use chrono::Utc;

use pricelens_client::PriceApiClient;
use pricelens_core::{display_name, AppConfig, CrawlRequest, ProductListProcessor, SortKey};

use crate::{export, view, CrawlArgs};

/// Print the crawler ids the backend can run.
///
/// # Errors
///
/// Returns an error if the backend reports a failure; transport failures
/// fall back to the default crawler list.
pub(crate) async fn run_crawlers(client: &PriceApiClient) -> anyhow::Result<()> {
    let crawlers = client.list_crawlers().await?;
    println!("{:<12}NAME", "ID");
    for id in &crawlers {
        println!("{id:<12}{}", display_name(id));
    }
    Ok(())
}

/// Run a crawl, then list the combined results.
///
/// When no platform is given every available crawler is used. Platforms that
/// fail are reported and skipped.
///
/// # Errors
///
/// Returns an error if the request is invalid, the crawl fails as a whole,
/// or the export cannot be written.
pub(crate) async fn run_crawl(
    client: &PriceApiClient,
    config: &AppConfig,
    args: CrawlArgs,
) -> anyhow::Result<()> {
    let platforms = if args.platforms.is_empty() {
        client.list_crawlers().await?
    } else {
        args.platforms
    };

    let request = CrawlRequest {
        keyword: args.keyword,
        platforms,
        max_products: args.max_products,
        min_price: args.min_price,
        max_price: args.max_price,
    }
    .validate()?;

    let report = client.start_crawl(&request).await?;
    let outcome = &report.outcome;

    for failure in &outcome.failures {
        eprintln!(
            "warning: {} failed: {}",
            display_name(&failure.platform),
            failure.reason
        );
    }
    println!(
        "「{}」: {} products from {} platforms (backend reported {})",
        request.keyword,
        outcome.products.len(),
        outcome.successful_platforms,
        outcome.total_reported
    );

    let mut processor = ProductListProcessor::new(config.page_size)?;
    processor.set_source(outcome.products.clone());
    view::print_listing(&mut processor, &args.view, SortKey::None);

    if args.export {
        let path = export::write_export(&config.export_dir, &request.keyword, &report.raw, Utc::now())?;
        println!("exported results to {}", path.display());
    }

    Ok(())
}
