//! Plain-text rendering of listings, summaries, and comparisons.

use std::fmt::Write as _;

use pricelens_core::price::group_thousands;
use pricelens_core::{
    display_name, format_display, split_currency_and_value, truncate_title, PageView,
    PriceClassification, PriceParts, PriceSummary, RawPrice, RelatedProducts, PRICE_UNKNOWN_LABEL,
};

const TITLE_WIDTH: usize = 48;
const RELATED_TITLE_WIDTH: usize = 36;

/// Display price as `"NT$ 1,520"`, or the unknown label.
pub(crate) fn price_cell(raw: Option<&RawPrice>) -> String {
    match split_currency_and_value(&format_display(raw)) {
        PriceParts::Split { currency, value } => format!("{currency} {value}"),
        PriceParts::Unknown => PRICE_UNKNOWN_LABEL.to_owned(),
    }
}

pub(crate) fn render_summary(summary: &PriceSummary) -> String {
    let mut out = format!(
        "total products: {}  platforms: {}\n",
        summary.total_products, summary.platform_count
    );
    if summary.priced_products > 0 {
        let _ = writeln!(
            out,
            "average: NT$ {}  range: NT$ {} - NT$ {}",
            group_thousands(summary.rounded_average()),
            group_thousands(summary.min_price),
            group_thousands(summary.max_price)
        );
    }
    out
}

pub(crate) fn render_page(view: &PageView<'_>) -> String {
    let meta = &view.meta;
    let mut out = String::new();

    if view.items.is_empty() {
        if meta.total_items == 0 {
            out.push_str("no products match the current filter\n");
        } else {
            let _ = writeln!(
                out,
                "page {} is empty ({} pages available)",
                meta.current_page, meta.total_pages
            );
        }
        return out;
    }

    let _ = writeln!(out, "{:<6}{:<12}{:<16}TITLE", "#", "PLATFORM", "PRICE");
    for (offset, product) in view.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<6}{:<12}{:<16}{}",
            meta.display_range_start + offset,
            display_name(product.platform()),
            price_cell(product.record.price.as_ref()),
            truncate_title(product.title(), TITLE_WIDTH)
        );
    }

    let _ = writeln!(
        out,
        "showing {}-{} of {} (page {}/{})",
        meta.display_range_start,
        meta.display_range_end,
        meta.total_items,
        meta.current_page,
        meta.total_pages
    );
    if meta.is_paginated() {
        out.push_str(&render_page_links(
            &meta.page_numbers,
            meta.current_page,
            meta.has_previous,
            meta.has_next,
        ));
    }
    out
}

fn render_page_links(pages: &[usize], current: usize, has_previous: bool, has_next: bool) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(pages.len() + 2);
    if has_previous {
        parts.push("<".to_owned());
    }
    parts.extend(pages.iter().map(|&p| {
        if p == current {
            format!("[{p}]")
        } else {
            p.to_string()
        }
    }));
    if has_next {
        parts.push(">".to_owned());
    }
    format!("pages: {}\n", parts.join(" "))
}

pub(crate) fn render_related(related: &RelatedProducts) -> String {
    let base = related.base();
    let similar = related.similar();
    let mut out = format!(
        "similar to: {} ({}, {})\n",
        truncate_title(base.title_or_empty(), TITLE_WIDTH),
        display_name(&base.platform),
        price_cell(base.price.as_ref())
    );

    if similar.total_candidates > 0 {
        let _ = writeln!(
            out,
            "matched {} of {} candidates",
            similar.total_matches, similar.total_candidates
        );
    }

    if related.is_empty() {
        let message = similar
            .message
            .as_deref()
            .unwrap_or("no similar products found");
        let _ = writeln!(out, "{message}");
        return out;
    }

    for entry in related.visible() {
        let product = &entry.product.record;
        let difference = entry.difference.map_or_else(String::new, |d| {
            match d.classification {
                PriceClassification::Negligible => "same price".to_owned(),
                PriceClassification::Higher | PriceClassification::Lower => {
                    format!("{} ({})", d.percent_text(), d.classification.as_str())
                }
            }
        });
        let _ = writeln!(
            out,
            "  {:<12}{:<16}{:<18}{}",
            display_name(&product.platform),
            price_cell(product.price.as_ref()),
            difference,
            truncate_title(product.title_or_empty(), RELATED_TITLE_WIDTH)
        );
    }

    let hidden = related.hidden_count();
    if hidden > 0 {
        let _ = writeln!(out, "  ... {hidden} more (use --all to show every match)");
    }
    out
}
