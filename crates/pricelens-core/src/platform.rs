/// Crawlers assumed available when the backend cannot be asked.
pub const DEFAULT_CRAWLERS: [&str; 4] = ["pchome", "yahoo", "carrefour", "routn"];

const UNKNOWN_PLATFORM_LABEL: &str = "未知平台";

/// Human-readable name for a platform id.
///
/// Known ids are matched case-insensitively; anything else is upper-cased.
#[must_use]
pub fn display_name(platform: &str) -> String {
    let known = match platform.to_lowercase().as_str() {
        "pchome" => Some("PChome"),
        "yahoo" => Some("Yahoo購物"),
        "carrefour" => Some("家樂福"),
        "routn" => Some("露天拍賣"),
        _ => None,
    };

    match known {
        Some(name) => name.to_owned(),
        None if platform.is_empty() => UNKNOWN_PLATFORM_LABEL.to_owned(),
        None => platform.to_uppercase(),
    }
}
