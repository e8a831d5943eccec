//! Similar-product results and the comparison view built from them.

use serde::{Deserialize, Serialize};

use crate::price::{price_difference, PriceDifference};
use crate::product::ProductRecord;

/// Entries shown before the view is expanded.
pub const INITIAL_RELATED_COUNT: usize = 6;

/// One candidate returned by the similarity backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(flatten)]
    pub record: ProductRecord,
}

/// Fully materialized similarity payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimilarProducts {
    pub products: Vec<SimilarProduct>,
    pub total_candidates: u64,
    pub total_matches: u64,
    /// Informational note from the backend, e.g. when nothing was indexed.
    pub message: Option<String>,
}

/// A visible related product paired with its price relative to the base.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedEntry<'a> {
    pub product: &'a SimilarProduct,
    /// `None` when either price is unknown.
    pub difference: Option<PriceDifference>,
}

/// Comparison view for one base product.
#[derive(Debug, Clone)]
pub struct RelatedProducts {
    base: ProductRecord,
    similar: SimilarProducts,
    expanded: bool,
}

impl RelatedProducts {
    #[must_use]
    pub fn new(base: ProductRecord, similar: SimilarProducts) -> Self {
        Self {
            base,
            similar,
            expanded: false,
        }
    }

    #[must_use]
    pub fn base(&self) -> &ProductRecord {
        &self.base
    }

    #[must_use]
    pub fn similar(&self) -> &SimilarProducts {
        &self.similar
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.similar.products.is_empty()
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Number of entries currently visible.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        let total = self.similar.products.len();
        if self.expanded {
            total
        } else {
            total.min(INITIAL_RELATED_COUNT)
        }
    }

    /// Entries hidden until the view is expanded.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.similar.products.len() - self.visible_count()
    }

    #[must_use]
    pub fn visible(&self) -> Vec<RelatedEntry<'_>> {
        self.similar.products[..self.visible_count()]
            .iter()
            .map(|product| RelatedEntry {
                product,
                difference: price_difference(self.base.price.as_ref(), product.record.price.as_ref()),
            })
            .collect()
    }
}
