use decimal_format::{DecimalFormatter, DecimalSymbols, ParseMode, ParseResult, ParsedNumber};

fn formatter(pattern: &str) -> DecimalFormatter {
    DecimalFormatter::new(pattern, DecimalSymbols::default()).unwrap()
}

fn expect_number(result: ParseResult) -> (ParsedNumber, usize) {
    match result {
        ParseResult::Number { value, end } => (value, end),
        ParseResult::Failure { error_index } => {
            panic!("expected a number, failed at {}", error_index)
        }
    }
}

#[test]
fn test_partial_parse_consumes_prefix_of_text() {
    let fmt = formatter("#,##0");
    let (value, end) = expect_number(fmt.parse("123abc", 0));
    assert_eq!(value, ParsedNumber::Long(123));
    assert_eq!(end, 3);
}

#[test]
fn test_unmatched_start_is_failure() {
    let fmt = formatter("#,##0");
    assert_eq!(fmt.parse("abc", 0), ParseResult::Failure { error_index: 0 });
    assert_eq!(fmt.parse("abc", 1), ParseResult::Failure { error_index: 1 });
}

#[test]
fn test_start_offset() {
    let fmt = formatter("#,##0");
    let (value, end) = expect_number(fmt.parse("xx123", 2));
    assert_eq!(value, ParsedNumber::Long(123));
    assert_eq!(end, 5);
}

#[test]
fn test_strict_grouping() {
    let fmt = formatter("#,##0");
    let (value, end) = expect_number(fmt.parse("1,234,567", 0));
    assert_eq!(value, ParsedNumber::Long(1234567));
    assert_eq!(end, 9);

    // An implausible group stops before the separator
    let (value, end) = expect_number(fmt.parse("1,23", 0));
    assert_eq!(value, ParsedNumber::Long(1));
    assert_eq!(end, 1);

    let (value, end) = expect_number(fmt.parse("1,234,56", 0));
    assert_eq!(value, ParsedNumber::Long(1234));
    assert_eq!(end, 5);
}

#[test]
fn test_secondary_grouping_parse() {
    let fmt = formatter("#,##,##0");
    let (value, end) = expect_number(fmt.parse("12,34,567", 0));
    assert_eq!(value, ParsedNumber::Long(1234567));
    assert_eq!(end, 9);
}

#[test]
fn test_separators_rejected_without_grouping() {
    let fmt = formatter("0.00");
    let (value, end) = expect_number(fmt.parse("1,234", 0));
    assert_eq!(value, ParsedNumber::Long(1));
    assert_eq!(end, 1);
}

#[test]
fn test_decimal_and_narrowing() {
    let fmt = formatter("#,##0.###");
    let (value, _) = expect_number(fmt.parse("1.5", 0));
    assert_eq!(value, ParsedNumber::Double(1.5));

    // Integral after scale resolution collapses to Long
    let (value, _) = expect_number(fmt.parse("1.00", 0));
    assert_eq!(value, ParsedNumber::Long(1));

    let (value, _) = expect_number(fmt.parse("9223372036854775807", 0));
    assert_eq!(value, ParsedNumber::Long(i64::MAX));
}

#[test]
fn test_negative_forms() {
    let fmt = formatter("0.00");
    let (value, _) = expect_number(fmt.parse("-5", 0));
    assert_eq!(value, ParsedNumber::Long(-5));

    let fmt = formatter("#,##0;(#,##0)");
    let (value, end) = expect_number(fmt.parse("(1,234)", 0));
    assert_eq!(value, ParsedNumber::Long(-1234));
    assert_eq!(end, 7);
}

#[test]
fn test_percent_divides_multiplier_out() {
    let fmt = formatter("#,##0%");
    let (value, end) = expect_number(fmt.parse("50%", 0));
    assert_eq!(value, ParsedNumber::Double(0.5));
    assert_eq!(end, 3);

    // Strict parsing requires the suffix
    assert_eq!(fmt.parse("50", 0), ParseResult::Failure { error_index: 0 });
}

#[test]
fn test_lenient_suffix_and_whitespace() {
    let mut fmt = formatter("#,##0%");
    fmt.set_lenient_parse(true);
    let (value, end) = expect_number(fmt.parse("  50", 0));
    assert_eq!(value, ParsedNumber::Double(0.5));
    assert_eq!(end, 4);
}

#[test]
fn test_exponent() {
    let fmt = formatter("#,##0.###");
    let (value, end) = expect_number(fmt.parse("1.5E3", 0));
    assert_eq!(value, ParsedNumber::Long(1500));
    assert_eq!(end, 5);

    let (value, _) = expect_number(fmt.parse("2E-2", 0));
    assert_eq!(value, ParsedNumber::Double(0.02));

    // A bare exponent separator is not consumed
    let (value, end) = expect_number(fmt.parse("12E", 0));
    assert_eq!(value, ParsedNumber::Long(12));
    assert_eq!(end, 2);
}

#[test]
fn test_integer_only() {
    let fmt = formatter("#,##0.###");
    let (value, end) = expect_number(fmt.parse_with_mode("3.14", 0, ParseMode::IntegerOnly));
    assert_eq!(value, ParsedNumber::Long(3));
    assert_eq!(end, 1);

    let mut fmt = formatter("#,##0.###");
    fmt.set_parse_integer_only(true);
    let (value, end) = expect_number(fmt.parse("3.14", 0));
    assert_eq!(value, ParsedNumber::Long(3));
    assert_eq!(end, 1);
}

#[test]
fn test_special_literals() {
    let fmt = formatter("0.00");
    let (value, end) = expect_number(fmt.parse("∞", 0));
    assert_eq!(value, ParsedNumber::Double(f64::INFINITY));
    assert_eq!(end, 1);

    let (value, end) = expect_number(fmt.parse("-∞", 0));
    assert_eq!(value, ParsedNumber::Double(f64::NEG_INFINITY));
    assert_eq!(end, 2);

    let (value, end) = expect_number(fmt.parse("NaN", 0));
    match value {
        ParsedNumber::Double(v) => assert!(v.is_nan()),
        other => panic!("expected NaN, got {:?}", other),
    }
    assert_eq!(end, 3);

    // Case-sensitive
    assert_eq!(fmt.parse("nan", 0), ParseResult::Failure { error_index: 0 });
}

#[test]
fn test_big_decimal_mode_preserves_digits() {
    let fmt = formatter("#,##0.###");
    let (value, _) = expect_number(fmt.parse_with_mode("1.50", 0, ParseMode::BigDecimal));
    assert_eq!(
        value,
        ParsedNumber::Decimal {
            negative: false,
            unscaled: "150".to_string(),
            scale: 2,
        }
    );

    let (value, _) = expect_number(fmt.parse_with_mode("1.5E2", 0, ParseMode::BigDecimal));
    assert_eq!(
        value,
        ParsedNumber::Decimal {
            negative: false,
            unscaled: "15".to_string(),
            scale: -1,
        }
    );
}

#[test]
fn test_localized_digit_recognition() {
    let symbols = decimal_format::locale::symbols_for("ar_EG").unwrap();
    let fmt = DecimalFormatter::new("#,##0", symbols).unwrap();
    let (value, end) = expect_number(fmt.parse("١٢٣", 0));
    assert_eq!(value, ParsedNumber::Long(123));
    assert_eq!(end, 3);

    // Strict mode sticks to the symbol table's shape family
    assert_eq!(fmt.parse("123", 0), ParseResult::Failure { error_index: 0 });
    let mut lenient = formatter("#,##0");
    lenient.set_lenient_parse(true);
    lenient.set_symbols(decimal_format::locale::symbols_for("ar_EG").unwrap());
    let (value, _) = expect_number(lenient.parse("123", 0));
    assert_eq!(value, ParsedNumber::Long(123));
}

#[test]
fn test_monetary_separators() {
    let symbols = decimal_format::locale::symbols_for("de_DE").unwrap();
    let fmt = DecimalFormatter::new("¤#,##0.00", symbols).unwrap();
    let (value, end) = expect_number(fmt.parse("€1.234,50", 0));
    assert_eq!(value, ParsedNumber::Double(1234.5));
    assert_eq!(end, 9);
}

#[test]
fn test_suffix_decides_sign_on_prefix_tie() {
    let fmt = formatter("0.00;0.00-");
    let (value, end) = expect_number(fmt.parse("5-", 0));
    assert_eq!(value, ParsedNumber::Long(-5));
    assert_eq!(end, 2);

    let (value, end) = expect_number(fmt.parse("5", 0));
    assert_eq!(value, ParsedNumber::Long(5));
    assert_eq!(end, 1);
}

#[test]
fn test_round_trip_through_format() {
    let fmt = formatter("#,##0.##");
    for value in [0.5, 12.25, -1234.5, 1000000.0] {
        let text = fmt.format_f64(value).text;
        let (parsed, end) = expect_number(fmt.parse(&text, 0));
        assert_eq!(end, text.chars().count(), "consumed all of {:?}", text);
        let back = match parsed {
            ParsedNumber::Long(v) => v as f64,
            ParsedNumber::Double(v) => v,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(back, value);
    }
}
