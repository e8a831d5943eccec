//! `result` and `compare` command handlers for stored crawl results.

use pricelens_client::PriceApiClient;
use pricelens_core::{AppConfig, RelatedProducts, ResultSession, ResultSource, SortKey};

use crate::{render, view, ViewArgs};

/// Stored results open sorted by ascending price.
const STORED_RESULT_SORT: SortKey = SortKey::PriceAsc;

async fn load_session(
    client: &PriceApiClient,
    config: &AppConfig,
    id: u64,
) -> anyhow::Result<ResultSession> {
    let mut session = ResultSession::new(config.page_size)?;
    if !session.load_result(client, id, STORED_RESULT_SORT).await? {
        anyhow::bail!("result {id} was superseded while loading");
    }
    Ok(session)
}

/// Load a stored result and print the requested page.
///
/// # Errors
///
/// Returns an error if the result cannot be fetched.
pub(crate) async fn run_result(
    client: &PriceApiClient,
    config: &AppConfig,
    id: u64,
    args: &ViewArgs,
) -> anyhow::Result<()> {
    let mut session = load_session(client, config, id).await?;
    if let Some(keyword) = session.keyword() {
        println!("「{keyword}」 (result {id})");
    }
    view::print_listing(session.processor_mut(), args, STORED_RESULT_SORT);
    Ok(())
}

/// Find products similar to the `item`-th entry (1-based) of the filtered,
/// sorted listing of a stored result.
///
/// # Errors
///
/// Returns an error if the result cannot be fetched, `item` is out of range,
/// or the comparison request fails.
pub(crate) async fn run_compare(
    client: &PriceApiClient,
    config: &AppConfig,
    id: u64,
    item: usize,
    show_all: bool,
    args: &ViewArgs,
) -> anyhow::Result<()> {
    let mut session = load_session(client, config, id).await?;
    let processor = session.processor_mut();
    processor.apply_sort(args.sort_key(STORED_RESULT_SORT));
    processor.apply_filter(args.filter_spec());

    let matched = processor.filtered_len();
    let base = item
        .checked_sub(1)
        .and_then(|idx| processor.filtered().nth(idx))
        .map(|product| product.record.clone())
        .ok_or_else(|| anyhow::anyhow!("item {item} is out of range (1..={matched})"))?;

    let similar = client.fetch_similar_products(&base).await?;
    let mut related = RelatedProducts::new(base, similar);
    related.set_expanded(show_all);
    print!("{}", render::render_related(&related));
    Ok(())
}
