use super::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// -----------------------------------------------------------------------
// parse_numeric
// -----------------------------------------------------------------------

#[test]
fn parse_numeric_strips_currency_and_separators() {
    assert_close(parse_numeric("NT$1,520"), 1520.0);
    assert_close(parse_numeric("$ 499"), 499.0);
    assert_close(parse_numeric("¥88元"), 88.0);
    assert_close(parse_numeric("￥1,234.50"), 1234.5);
}

#[test]
fn parse_numeric_handles_duplicated_prefix() {
    assert_close(parse_numeric("NT$NT$1520"), 1520.0);
}

#[test]
fn parse_numeric_returns_zero_for_sentinels_and_empty() {
    assert_close(parse_numeric(""), 0.0);
    assert_close(parse_numeric("N/A"), 0.0);
    assert_close(parse_numeric("未知"), 0.0);
    assert_close(parse_numeric(PriceInput::Missing), 0.0);
    assert_close(parse_numeric(None::<&RawPrice>), 0.0);
}

#[test]
fn parse_numeric_accepts_numbers() {
    assert_close(parse_numeric(1520.0), 1520.0);
    assert_close(parse_numeric(0.0), 0.0);
    assert_close(parse_numeric(f64::NAN), 0.0);
    assert_close(parse_numeric(f64::INFINITY), 0.0);
}

#[test]
fn parse_numeric_never_negative() {
    assert_close(parse_numeric("-250"), 250.0);
    assert_close(parse_numeric(-250.0), 250.0);
}

#[test]
fn parse_numeric_stops_at_second_decimal_point() {
    assert_close(parse_numeric("1.520.00"), 1.52);
}

#[test]
fn parse_numeric_returns_zero_for_lone_dot() {
    assert_close(parse_numeric("."), 0.0);
    assert_close(parse_numeric("NT$."), 0.0);
}

#[test]
fn parse_numeric_returns_zero_for_overflowing_digits() {
    let huge = "9".repeat(400);
    assert_close(parse_numeric(huge.as_str()), 0.0);
}

#[test]
fn parse_numeric_is_idempotent_on_its_output() {
    for raw in ["NT$1,520", "", "N/A", "NT$NT$1520", "12.5元", "abc", "1.2.3"] {
        let once = parse_numeric(raw);
        let twice = parse_numeric(once.to_string().as_str());
        assert_close(twice, once);
    }
}

#[test]
fn parse_numeric_reads_raw_price_variants() {
    let text = RawPrice::from("NT$ 2,000");
    let number = RawPrice::from(35.5);
    assert_close(parse_numeric(&text), 2000.0);
    assert_close(parse_numeric(Some(&number)), 35.5);
}

// -----------------------------------------------------------------------
// format_display
// -----------------------------------------------------------------------

#[test]
fn format_display_unknown_for_missing_values() {
    assert_eq!(format_display(0.0), PRICE_UNKNOWN_LABEL);
    assert_eq!(format_display(PriceInput::Missing), PRICE_UNKNOWN_LABEL);
    assert_eq!(format_display(""), PRICE_UNKNOWN_LABEL);
    assert_eq!(format_display("未知"), PRICE_UNKNOWN_LABEL);
    assert_eq!(format_display("N/A"), PRICE_UNKNOWN_LABEL);
}

#[test]
fn format_display_unknown_for_non_positive_or_garbage() {
    assert_eq!(format_display("NT$0"), PRICE_UNKNOWN_LABEL);
    assert_eq!(format_display("-100"), PRICE_UNKNOWN_LABEL);
    assert_eq!(format_display("call for price"), PRICE_UNKNOWN_LABEL);
}

#[test]
fn format_display_collapses_repeated_prefix() {
    assert_eq!(format_display("NT$NT$1520"), "NT$ 1,520");
    assert_eq!(format_display("NT$NT$NT$1,520"), "NT$ 1,520");
}

#[test]
fn format_display_canonicalizes_other_currencies() {
    assert_eq!(format_display("$1234567"), "NT$ 1,234,567");
    assert_eq!(format_display("¥ 88 元"), "NT$ 88");
    assert_eq!(format_display("￥1,000"), "NT$ 1,000");
}

#[test]
fn format_display_formats_numbers() {
    assert_eq!(format_display(1520.0), "NT$ 1,520");
    assert_eq!(format_display(999.5), "NT$ 999.5");
}

#[test]
fn format_display_keeps_up_to_three_fraction_digits() {
    assert_eq!(format_display("12.3456"), "NT$ 12.346");
    assert_eq!(format_display("12.50"), "NT$ 12.5");
}

// -----------------------------------------------------------------------
// split_currency_and_value
// -----------------------------------------------------------------------

#[test]
fn split_formatted_price() {
    assert_eq!(
        split_currency_and_value(&format_display("NT$1,520")),
        PriceParts::Split {
            currency: "NT$".to_owned(),
            value: "1,520".to_owned(),
        }
    );
}

#[test]
fn split_unknown_label_is_signalled() {
    assert_eq!(
        split_currency_and_value(PRICE_UNKNOWN_LABEL),
        PriceParts::Unknown
    );
    assert_eq!(split_currency_and_value(""), PriceParts::Unknown);
}

#[test]
fn split_defaults_currency_when_absent() {
    assert_eq!(
        split_currency_and_value("1,520"),
        PriceParts::Split {
            currency: "NT$".to_owned(),
            value: "1,520".to_owned(),
        }
    );
}

#[test]
fn split_recognizes_other_prefixes_case_insensitively() {
    assert_eq!(
        split_currency_and_value("nt$ 99"),
        PriceParts::Split {
            currency: "NT$".to_owned(),
            value: "99".to_owned(),
        }
    );
    assert_eq!(
        split_currency_and_value("¥500"),
        PriceParts::Split {
            currency: "¥".to_owned(),
            value: "500".to_owned(),
        }
    );
}

// -----------------------------------------------------------------------
// price_difference
// -----------------------------------------------------------------------

#[test]
fn price_difference_higher() {
    let diff = price_difference("NT$1000", "NT$1200").expect("both prices known");
    assert_close(diff.delta, 200.0);
    assert_close(diff.percent, 20.0);
    assert_eq!(diff.classification, PriceClassification::Higher);
    assert_eq!(diff.percent_text(), "+20.0%");
}

#[test]
fn price_difference_lower() {
    let diff = price_difference("NT$1,500", "$1,000").expect("both prices known");
    assert_close(diff.delta, -500.0);
    assert_close(diff.percent, -33.3);
    assert_eq!(diff.classification, PriceClassification::Lower);
    assert_eq!(diff.percent_text(), "-33.3%");
}

#[test]
fn price_difference_negligible_within_one() {
    let diff = price_difference("NT$1000", "NT$999.5").expect("both prices known");
    assert_close(diff.delta, -0.5);
    assert_eq!(diff.classification, PriceClassification::Negligible);
    assert_eq!(diff.classification.as_str(), "negligible");
}

#[test]
fn price_difference_tiny_increase_keeps_plus_sign() {
    let diff = price_difference("NT$100000", "NT$100002").expect("both prices known");
    assert_eq!(diff.classification, PriceClassification::Higher);
    assert_close(diff.percent, 0.0);
    assert_eq!(diff.percent_text(), "+0.0%");
}

#[test]
fn price_difference_tiny_decrease_has_no_plus_sign() {
    let diff = price_difference("NT$100002", "NT$100000").expect("both prices known");
    assert_eq!(diff.classification, PriceClassification::Lower);
    assert!(!diff.percent_text().starts_with('+'));
}

#[test]
fn price_difference_none_when_either_unknown() {
    assert!(price_difference("N/A", "NT$1200").is_none());
    assert!(price_difference("NT$1000", "").is_none());
    assert!(price_difference(PriceInput::Missing, 100.0).is_none());
}

// -----------------------------------------------------------------------
// helpers
// -----------------------------------------------------------------------

#[test]
fn group_thousands_inserts_separators() {
    assert_eq!(group_thousands(1.0), "1");
    assert_eq!(group_thousands(999.0), "999");
    assert_eq!(group_thousands(1000.0), "1,000");
    assert_eq!(group_thousands(123_456_789.25), "123,456,789.25");
}

#[test]
fn group_thousands_groups_digits_after_the_sign() {
    assert_eq!(group_thousands(-123.0), "-123");
    assert_eq!(group_thousands(-1234.5), "-1,234.5");
    assert_eq!(group_thousands(-1_234_567.0), "-1,234,567");
    assert_eq!(group_thousands(-0.0), "0");
}

#[test]
fn parse_float_prefix_edge_cases() {
    assert_eq!(parse_float_prefix("12-3"), Some(12.0));
    assert_eq!(parse_float_prefix("-5"), Some(-5.0));
    assert_eq!(parse_float_prefix(".5"), Some(0.5));
    assert_eq!(parse_float_prefix("5."), Some(5.0));
    assert_eq!(parse_float_prefix("-"), None);
    assert_eq!(parse_float_prefix(""), None);
}
