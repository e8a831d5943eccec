//! Price normalization across the inconsistent formats crawlers return.
//!
//! Two views of every raw price are produced:
//! - a numeric value ([`parse_numeric`]) used for filtering, sorting, and
//!   comparison, where `0.0` means "unparseable";
//! - a display string ([`format_display`]) with a single canonical currency
//!   prefix, or the [`PRICE_UNKNOWN_LABEL`] sentinel.
//!
//! None of these functions fail: malformed input degrades to the sentinels.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::product::RawPrice;

/// Currency marker used in every formatted price.
pub const CANONICAL_CURRENCY: &str = "NT$";

/// Label shown for missing, sentinel, non-positive, or unparseable prices.
pub const PRICE_UNKNOWN_LABEL: &str = "價格未知";

/// Raw strings that mean "no price" regardless of anything else.
const UNKNOWN_SENTINELS: [&str; 2] = ["N/A", "未知"];

static REPEATED_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(NT\$)+").expect("valid currency prefix regex"));

static CURRENCY_SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"NT\$|[$￥¥元,\s]").expect("valid currency symbol regex"));

static DISPLAY_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(NT\$|\$|¥|￥)?\s*(.+)$").expect("valid display split regex")
});

/// A borrowed view of any raw price value a caller may hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceInput<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
}

impl<'a> From<&'a RawPrice> for PriceInput<'a> {
    fn from(raw: &'a RawPrice) -> Self {
        match raw {
            RawPrice::Number(n) => PriceInput::Number(*n),
            RawPrice::Text(s) => PriceInput::Text(s),
        }
    }
}

impl<'a> From<Option<&'a RawPrice>> for PriceInput<'a> {
    fn from(raw: Option<&'a RawPrice>) -> Self {
        raw.map_or(PriceInput::Missing, PriceInput::from)
    }
}

impl<'a> From<&'a str> for PriceInput<'a> {
    fn from(text: &'a str) -> Self {
        PriceInput::Text(text)
    }
}

impl<'a> From<&'a String> for PriceInput<'a> {
    fn from(text: &'a String) -> Self {
        PriceInput::Text(text)
    }
}

impl From<f64> for PriceInput<'_> {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl<'a> PriceInput<'a> {
    /// Text form of the value, or `None` when it is falsy (missing, empty,
    /// zero, or NaN).
    fn truthy_text(self) -> Option<Cow<'a, str>> {
        match self {
            PriceInput::Missing => None,
            PriceInput::Text(s) if s.is_empty() => None,
            PriceInput::Text(s) => Some(Cow::Borrowed(s)),
            PriceInput::Number(n) if n == 0.0 || n.is_nan() => None,
            PriceInput::Number(n) => Some(Cow::Owned(n.to_string())),
        }
    }
}

/// Parses any raw price into a non-negative number.
///
/// Every character other than ASCII digits and `.` is removed, then the
/// longest leading decimal number is parsed. Returns `0.0` for missing or
/// empty input and whenever nothing parseable (or nothing finite) remains.
#[must_use]
pub fn parse_numeric<'a>(raw: impl Into<PriceInput<'a>>) -> f64 {
    let Some(text) = raw.into().truthy_text() else {
        return 0.0;
    };

    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match parse_float_prefix(&digits) {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Formats a raw price for display, e.g. `"NT$NT$1,520"` → `"NT$ 1,520"`.
///
/// Returns [`PRICE_UNKNOWN_LABEL`] for empty input, the `"N/A"` / `"未知"`
/// sentinels, and any value that does not parse to a positive finite number.
#[must_use]
pub fn format_display<'a>(raw: impl Into<PriceInput<'a>>) -> String {
    let Some(text) = raw.into().truthy_text() else {
        return PRICE_UNKNOWN_LABEL.to_owned();
    };
    if UNKNOWN_SENTINELS.contains(&&*text) {
        return PRICE_UNKNOWN_LABEL.to_owned();
    }

    let collapsed = REPEATED_PREFIX_RE.replace(&text, CANONICAL_CURRENCY);
    let without_symbols = CURRENCY_SYMBOL_RE.replace_all(&collapsed, "");
    // The sign survives here so negative amounts land in the unknown bucket.
    let numeric_text: String = without_symbols
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match parse_float_prefix(&numeric_text) {
        Some(value) if value.is_finite() && value > 0.0 => {
            format!("{CANONICAL_CURRENCY} {}", group_thousands(value))
        }
        _ => PRICE_UNKNOWN_LABEL.to_owned(),
    }
}

/// A display price split into independently styled parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceParts {
    /// The price is unknown; render [`PRICE_UNKNOWN_LABEL`] as a single label.
    Unknown,
    Split { currency: String, value: String },
}

/// Splits a string produced by [`format_display`] into currency and value.
///
/// Recognized prefixes are `NT$`, `$`, `¥`, and `￥` (upper-cased in the
/// output); when none is present the currency defaults to
/// [`CANONICAL_CURRENCY`].
#[must_use]
pub fn split_currency_and_value(formatted: &str) -> PriceParts {
    if formatted.is_empty() || formatted == PRICE_UNKNOWN_LABEL {
        return PriceParts::Unknown;
    }

    let Some(caps) = DISPLAY_SPLIT_RE.captures(formatted) else {
        return PriceParts::Unknown;
    };

    let currency = caps
        .get(1)
        .map_or_else(|| CANONICAL_CURRENCY.to_owned(), |m| m.as_str().to_uppercase());
    let value = caps.get(2).map_or("", |m| m.as_str()).to_owned();

    PriceParts::Split { currency, value }
}

/// How a compared price relates to the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceClassification {
    /// `|delta| < 1`: equal within rounding.
    Negligible,
    Higher,
    Lower,
}

impl PriceClassification {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PriceClassification::Negligible => "negligible",
            PriceClassification::Higher => "higher",
            PriceClassification::Lower => "lower",
        }
    }
}

/// Difference between a candidate price and a base price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceDifference {
    /// `compare - base`.
    pub delta: f64,
    /// `delta / base * 100`, rounded to one decimal place.
    pub percent: f64,
    pub classification: PriceClassification,
}

impl PriceDifference {
    /// Signed percentage with one decimal, e.g. `"+20.0%"` or `"-5.3%"`.
    /// The `+` follows the sign of `delta`, so a tiny increase reads `"+0.0%"`.
    #[must_use]
    pub fn percent_text(&self) -> String {
        if self.delta > 0.0 {
            format!("+{:.1}%", self.percent)
        } else {
            format!("{:.1}%", self.percent)
        }
    }
}

/// Compares two raw prices.
///
/// Returns `None` when either side parses to `0.0`, since no comparison is
/// meaningful against an unknown price.
#[must_use]
pub fn price_difference<'a, 'b>(
    base: impl Into<PriceInput<'a>>,
    compare: impl Into<PriceInput<'b>>,
) -> Option<PriceDifference> {
    let base = parse_numeric(base);
    let compare = parse_numeric(compare);
    if base == 0.0 || compare == 0.0 {
        return None;
    }

    let delta = compare - base;
    let percent = (delta / base * 1000.0).round() / 10.0;
    let classification = if delta.abs() < 1.0 {
        PriceClassification::Negligible
    } else if delta > 0.0 {
        PriceClassification::Higher
    } else {
        PriceClassification::Lower
    };

    Some(PriceDifference {
        delta,
        percent,
        classification,
    })
}

/// Formats an amount with `,` thousands grouping and up to three fraction
/// digits, trailing zeros trimmed: `1520.0` → `"1,520"`, `999.5` → `"999.5"`,
/// `-1234.0` → `"-1,234"`.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let sign = if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Parses the longest leading decimal number in `text`: an optional `-`,
/// digits, and at most one `.`. Requires at least one digit.
///
/// `"1.520.00"` → `1.52`, `"12-3"` → `12`, `"."` → `None`.
fn parse_float_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut digits = 0usize;
    let mut seen_dot = false;

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
