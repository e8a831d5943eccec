use serde::{Deserialize, Deserializer, Serialize};

use crate::price::parse_numeric;

/// A raw price exactly as the crawler backend stored it.
///
/// Platforms disagree on the shape: some return a JSON number, others a
/// display string such as `"NT$1,520"`, `"$ 499"`, `"¥88元"`, or a sentinel
/// like `"N/A"` / `"未知"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawPrice {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A product listing returned by a crawl or loaded from a stored result.
///
/// Only the fields the presentation core reads are typed; everything else
/// the backend sends is kept in `extra` so exports stay lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Raw price; `None` when the field is missing, `null`, or not a
    /// number/string.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<RawPrice>,

    /// Short platform id, e.g. `"pchome"` or `"yahoo"`; empty when the
    /// backend sent none.
    #[serde(default, deserialize_with = "deserialize_lenient_platform")]
    pub platform: String,

    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductRecord {
    /// Builds a record with only the core fields set.
    #[must_use]
    pub fn new(title: Option<&str>, price: Option<RawPrice>, platform: &str) -> Self {
        Self {
            title: title.map(str::to_owned),
            price,
            platform: platform.to_owned(),
            url: None,
            image_url: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Title with absent values treated as empty.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// A [`ProductRecord`] with its parsed numeric price attached.
///
/// `price_numeric` is never negative; `0.0` means the raw price could not be
/// parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedProduct {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub price_numeric: f64,
}

impl PricedProduct {
    #[must_use]
    pub fn new(record: ProductRecord) -> Self {
        let price_numeric = parse_numeric(record.price.as_ref());
        Self {
            record,
            price_numeric,
        }
    }

    #[must_use]
    pub fn platform(&self) -> &str {
        &self.record.platform
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.record.title_or_empty()
    }

    /// Returns `true` when the price parsed to a usable positive value.
    #[must_use]
    pub fn has_known_price(&self) -> bool {
        self.price_numeric > 0.0
    }
}

impl From<ProductRecord> for PricedProduct {
    fn from(record: ProductRecord) -> Self {
        Self::new(record)
    }
}

/// Accepts a JSON number or string; any other shape (bool, object, array,
/// `null`) degrades to `None` instead of failing the whole record.
fn deserialize_lenient_price<'de, D>(deserializer: D) -> Result<Option<RawPrice>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map(RawPrice::Number),
        Some(serde_json::Value::String(s)) => Some(RawPrice::Text(s)),
        _ => None,
    })
}

/// Accepts a JSON string; any other shape degrades to `None`.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

fn deserialize_lenient_platform<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_lenient_string(deserializer).map(Option::unwrap_or_default)
}
