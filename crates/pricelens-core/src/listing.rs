//! Filter, sort, and paginate a product collection for rendering.
//!
//! [`ProductListProcessor`] owns the source collection for one result plus
//! the active filter/sort/page selection. The derived view is recomputed
//! from the source on every filter or sort change, so it never depends on
//! the order of earlier calls.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::CoreError;
use crate::product::{PricedProduct, ProductRecord};

/// Page size used by the result pages.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Number of page links shown on each side of the current page.
const PAGE_WINDOW_RADIUS: usize = 2;

/// Platform half of a [`FilterSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(String),
}

impl PlatformFilter {
    /// Parses a selector value; empty and `"all"` select every platform.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => PlatformFilter::All,
            other => PlatformFilter::Only(other.to_owned()),
        }
    }

    #[must_use]
    pub fn matches(&self, platform: &str) -> bool {
        match self {
            PlatformFilter::All => true,
            PlatformFilter::Only(wanted) => wanted == platform,
        }
    }
}

/// Platform and inclusive price-range predicate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    pub platform: PlatformFilter,
    /// Lower bound; `None` (or a non-finite value) means `0`.
    pub min_price: Option<f64>,
    /// Upper bound; `None` (or a non-finite value) means unbounded.
    pub max_price: Option<f64>,
}

impl FilterSpec {
    /// Effective `[min, max]` bounds with defaults applied.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let min = self.min_price.filter(|v| v.is_finite()).unwrap_or(0.0);
        let max = self
            .max_price
            .filter(|v| v.is_finite())
            .unwrap_or(f64::INFINITY);
        (min, max)
    }

    #[must_use]
    pub fn matches(&self, product: &PricedProduct) -> bool {
        let (min, max) = self.bounds();
        self.platform.matches(product.platform())
            && product.price_numeric >= min
            && product.price_numeric <= max
    }
}

/// Ordering applied to the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    /// Keep source order.
    #[default]
    None,
}

impl SortKey {
    /// Maps a selector key to a sort; unrecognized keys keep source order.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "name-asc" => SortKey::NameAsc,
            "name-desc" => SortKey::NameDesc,
            _ => SortKey::None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::None => "none",
        }
    }

    /// Comparator for a stable sort.
    #[must_use]
    pub fn compare(self, a: &PricedProduct, b: &PricedProduct) -> Ordering {
        match self {
            SortKey::PriceAsc => a.price_numeric.total_cmp(&b.price_numeric),
            SortKey::PriceDesc => b.price_numeric.total_cmp(&a.price_numeric),
            SortKey::NameAsc => locale_compare(a.title(), b.title()),
            SortKey::NameDesc => locale_compare(b.title(), a.title()),
            SortKey::None => Ordering::Equal,
        }
    }
}

/// Case-insensitive comparison with lowercase sorting before uppercase on
/// otherwise equal text. Non-Latin scripts compare by code point.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map_or_else(
                || a.len().cmp(&b.len()),
                |(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                },
            )
    })
}

/// Pagination metadata for one page of the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; `0` when there are no items.
    pub total_pages: usize,
    /// The requested page, stored as given even when out of range.
    pub current_page: usize,
    pub page_size: usize,
    /// 1-based index of the first item on the page; `0` for an empty page.
    pub display_range_start: usize,
    /// 1-based index of the last item on the page; `0` for an empty page.
    pub display_range_end: usize,
    /// Page links to expose: `current-2 ..= current+2`, clipped to
    /// `1 ..= total_pages`.
    pub page_numbers: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationMeta {
    /// Computes metadata for `current_page` over `total_items`.
    ///
    /// `page_size` must be positive; [`ProductListProcessor::new`] enforces
    /// this for every processor.
    #[must_use]
    pub fn compute(total_items: usize, page_size: usize, current_page: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size);
        let range = page_range(total_items, page_size, current_page);
        let (display_range_start, display_range_end) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };

        let first = current_page.saturating_sub(PAGE_WINDOW_RADIUS).max(1);
        let last = current_page
            .saturating_add(PAGE_WINDOW_RADIUS)
            .min(total_pages);

        Self {
            total_items,
            total_pages,
            current_page,
            page_size,
            display_range_start,
            display_range_end,
            page_numbers: (first..=last).collect(),
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }

    /// Whether a navigation control is worth rendering at all.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}

/// Index range of `page` within `total_items`; empty when out of range.
fn page_range(total_items: usize, page_size: usize, page: usize) -> std::ops::Range<usize> {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
        .filter(|start| *start < total_items)
    else {
        return 0..0;
    };
    let end = start.saturating_add(page_size).min(total_items);
    start..end
}

/// One rendered page: the slice of the filtered view plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub items: Vec<&'a PricedProduct>,
    pub meta: PaginationMeta,
}

/// Owns one result's products and the user's current filter/sort/page.
#[derive(Debug, Clone)]
pub struct ProductListProcessor {
    page_size: usize,
    source: Vec<PricedProduct>,
    platforms: Vec<String>,
    filter: FilterSpec,
    sort_key: SortKey,
    /// Indices into `source`, filtered and sorted.
    view: Vec<usize>,
    current_page: usize,
}

impl ProductListProcessor {
    /// Creates an empty processor.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPageSize`] when `page_size` is `0`.
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        if page_size == 0 {
            return Err(CoreError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_size,
            source: Vec::new(),
            platforms: Vec::new(),
            filter: FilterSpec::default(),
            sort_key: SortKey::default(),
            view: Vec::new(),
            current_page: 1,
        })
    }

    /// Replaces the source collection and parses every price.
    ///
    /// The platform option list is rebuilt, so the platform filter returns
    /// to "all"; the price range and sort key stay active. Resets to page 1.
    pub fn set_source(&mut self, products: Vec<ProductRecord>) {
        self.source = products.into_iter().map(PricedProduct::new).collect();

        self.platforms.clear();
        for product in &self.source {
            if !self.platforms.iter().any(|p| p == product.platform()) {
                self.platforms.push(product.platform().to_owned());
            }
        }

        self.filter.platform = PlatformFilter::All;
        self.current_page = 1;
        self.recompute();
        tracing::debug!(
            products = self.source.len(),
            platforms = self.platforms.len(),
            "product source replaced"
        );
    }

    /// Applies a new filter (re-sorting with the active key). Resets to page 1.
    pub fn apply_filter(&mut self, spec: FilterSpec) {
        self.filter = spec;
        self.current_page = 1;
        self.recompute();
    }

    /// Applies a new sort key to the filtered view. Resets to page 1.
    pub fn apply_sort(&mut self, key: SortKey) {
        self.sort_key = key;
        self.current_page = 1;
        self.recompute();
    }

    /// Clears the filter and applies `sort_key`. Resets to page 1.
    pub fn reset_filters(&mut self, sort_key: SortKey) {
        self.filter = FilterSpec::default();
        self.sort_key = sort_key;
        self.current_page = 1;
        self.recompute();
    }

    /// Moves to `page` without touching the filter or sort.
    ///
    /// The page is stored as given; out-of-range pages render empty.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Moves to `page` and returns its view.
    pub fn get_page(&mut self, page: usize) -> PageView<'_> {
        self.set_page(page);
        self.current_view()
    }

    /// View of the current page.
    #[must_use]
    pub fn current_view(&self) -> PageView<'_> {
        let range = page_range(self.view.len(), self.page_size, self.current_page);
        let items = self.view[range].iter().map(|&i| &self.source[i]).collect();
        PageView {
            items,
            meta: PaginationMeta::compute(self.view.len(), self.page_size, self.current_page),
        }
    }

    /// The filtered and sorted products, across all pages.
    pub fn filtered(&self) -> impl Iterator<Item = &PricedProduct> + '_ {
        self.view.iter().map(|&i| &self.source[i])
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    #[must_use]
    pub fn source(&self) -> &[PricedProduct] {
        &self.source
    }

    /// Distinct platforms in order of first appearance.
    #[must_use]
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    #[must_use]
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rebuilds the view from source order: filter, then stable sort.
    fn recompute(&mut self) {
        let source = &self.source;
        let filter = &self.filter;
        let mut view: Vec<usize> = (0..source.len())
            .filter(|&i| filter.matches(&source[i]))
            .collect();

        let key = self.sort_key;
        view.sort_by(|&a, &b| key.compare(&source[a], &source[b]));
        self.view = view;

        tracing::debug!(
            matched = self.view.len(),
            sort = key.as_str(),
            "product view recomputed"
        );
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
