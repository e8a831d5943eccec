//! Applies the command-line view selection to a product listing.

use pricelens_core::{display_name, PriceSummary, ProductListProcessor, SortKey};

use crate::render;
use crate::ViewArgs;

/// Applies sort and filter from `args`, then prints the summary and the
/// requested page.
pub(crate) fn print_listing(
    processor: &mut ProductListProcessor,
    args: &ViewArgs,
    default_sort: SortKey,
) {
    processor.apply_sort(args.sort_key(default_sort));
    processor.apply_filter(args.filter_spec());

    let summary = PriceSummary::from_products(processor.source());
    print!("{}", render::render_summary(&summary));

    let platforms: Vec<String> = processor
        .platforms()
        .iter()
        .map(|p| format!("{} ({p})", display_name(p)))
        .collect();
    if !platforms.is_empty() {
        println!("platforms: {}", platforms.join(", "));
    }

    let view = processor.get_page(args.page);
    print!("{}", render::render_page(&view));
}
