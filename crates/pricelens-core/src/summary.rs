use serde::Serialize;

use crate::product::PricedProduct;

/// Headline numbers for one result set.
///
/// Price statistics only consider products with a known (positive) price;
/// they are all `0.0` when no product has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub total_products: usize,
    pub platform_count: usize,
    pub priced_products: usize,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl PriceSummary {
    #[must_use]
    pub fn from_products<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a PricedProduct>,
    {
        let mut total_products = 0usize;
        let mut platforms: Vec<&str> = Vec::new();
        let mut prices: Vec<f64> = Vec::new();

        for product in products {
            total_products += 1;
            if !platforms.contains(&product.platform()) {
                platforms.push(product.platform());
            }
            if product.has_known_price() {
                prices.push(product.price_numeric);
            }
        }

        let (average_price, min_price, max_price) = if prices.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let average = prices.iter().sum::<f64>() / prices.len() as f64;
            let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (average, min, max)
        };

        Self {
            total_products,
            platform_count: platforms.len(),
            priced_products: prices.len(),
            average_price,
            min_price,
            max_price,
        }
    }

    /// Average rounded to the nearest whole currency unit.
    #[must_use]
    pub fn rounded_average(&self) -> f64 {
        self.average_price.round()
    }
}
