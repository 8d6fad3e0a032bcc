use decimal_format::{DecimalFormatter, DecimalSymbols, FormatError, RoundingMode};

fn formatter(pattern: &str) -> DecimalFormatter {
    DecimalFormatter::new(pattern, DecimalSymbols::default()).unwrap()
}

#[test]
fn test_fraction_digit_clamping() {
    let mut fmt = formatter("0.00");
    assert_eq!(fmt.minimum_fraction_digits(), 2);

    fmt.set_maximum_fraction_digits(1);
    assert_eq!(fmt.minimum_fraction_digits(), 1);
    assert_eq!(fmt.format_f64(1.0).text, "1.0");

    fmt.set_minimum_fraction_digits(3);
    assert_eq!(fmt.maximum_fraction_digits(), 3);
    assert_eq!(fmt.format_f64(1.0).text, "1.000");
}

#[test]
fn test_integer_digit_clamping() {
    let mut fmt = formatter("0");
    fmt.set_minimum_integer_digits(4);
    assert_eq!(fmt.format_i64(7).text, "0007");
    fmt.set_maximum_integer_digits(2);
    assert_eq!(fmt.minimum_integer_digits(), 2);
}

#[test]
fn test_multiplier_validation() {
    let mut fmt = formatter("0.00");
    assert!(matches!(
        fmt.set_multiplier(0),
        Err(FormatError::InvalidArgument(_))
    ));
    assert!(matches!(
        fmt.set_multiplier(-5),
        Err(FormatError::InvalidArgument(_))
    ));
    fmt.set_multiplier(100).unwrap();
    assert_eq!(fmt.format_f64(0.5).text, "50.00");
}

#[test]
fn test_rounding_increment_validation() {
    let mut fmt = formatter("0.00");
    assert!(fmt.set_rounding(RoundingMode::HalfUp, -1.0).is_err());
    assert!(fmt.set_rounding(RoundingMode::HalfUp, f64::NAN).is_err());
    assert!(fmt.set_rounding(RoundingMode::HalfUp, 0.0).is_ok());
}

#[test]
fn test_absent_versus_empty_affix() {
    let mut fmt = formatter("0.00");
    assert_eq!(fmt.negative_prefix(), None);

    fmt.set_negative_prefix(Some(""));
    assert_eq!(fmt.negative_prefix(), Some(""));
    assert_eq!(fmt.format_i64(-5).text, "5.00");

    // Setting back to absent reverts to the pattern-derived default
    fmt.set_negative_prefix(None);
    assert_eq!(fmt.negative_prefix(), None);
    assert_eq!(fmt.format_i64(-5).text, "-5.00");
}

#[test]
fn test_positive_override_leaves_negative_derivation_alone() {
    let mut fmt = formatter("0.00");
    fmt.set_positive_prefix(Some("+"));
    assert_eq!(fmt.format_i64(5).text, "+5.00");
    assert_eq!(fmt.format_i64(-5).text, "-5.00");
}

#[test]
fn test_pattern_cache_invalidation() {
    let mut fmt = formatter("0.00");
    // Re-applying the active pattern is a no-op
    fmt.apply_pattern("0.00").unwrap();
    assert_eq!(fmt.format_f64(1.0).text, "1.00");

    // A mutation invalidates the cache, so the same text recompiles and
    // resets the mutated attribute
    fmt.set_minimum_fraction_digits(5);
    assert_eq!(fmt.format_f64(1.0).text, "1.00000");
    fmt.apply_pattern("0.00").unwrap();
    assert_eq!(fmt.minimum_fraction_digits(), 2);
    assert_eq!(fmt.format_f64(1.0).text, "1.00");
}

#[test]
fn test_apply_pattern_replaces_configuration() {
    let mut fmt = formatter("0.00");
    fmt.apply_pattern("#,##0%").unwrap();
    assert_eq!(fmt.multiplier(), 100);
    assert_eq!(fmt.format_f64(0.5).text, "50%");

    assert!(fmt.apply_pattern("0.0.0").is_err());
}

#[test]
fn test_localized_pattern_application() {
    let symbols = decimal_format::locale::symbols_for("de_DE").unwrap();
    let mut fmt = DecimalFormatter::new("0", symbols).unwrap();
    fmt.apply_localized_pattern("#.##0,00").unwrap();
    assert_eq!(fmt.format_f64(1234.5).text, "1.234,50");
}

#[test]
fn test_clone_independence() {
    let mut original = formatter("0.00");
    let clone = original.clone();

    original.set_minimum_fraction_digits(4);
    original.set_positive_prefix(Some(">"));
    assert_eq!(clone.minimum_fraction_digits(), 2);
    assert_eq!(clone.positive_prefix(), None);
    assert_eq!(clone.format_f64(1.0).text, "1.00");
    assert_eq!(original.format_f64(1.0).text, ">1.0000");
}

#[test]
fn test_clone_cache_is_copied_by_value() {
    let original = formatter("0.00");
    let mut clone = original.clone();
    // Mutating the clone's configuration must not disturb the original's
    // cached pattern
    clone.set_minimum_fraction_digits(5);
    clone.apply_pattern("0.00").unwrap();
    assert_eq!(clone.minimum_fraction_digits(), 2);
    assert_eq!(original.format_f64(1.0).text, "1.00");
}

#[test]
fn test_symbol_replacement_keeps_spec() {
    let mut fmt = formatter("#,##0.00");
    fmt.set_symbols(decimal_format::locale::symbols_for("de_DE").unwrap());
    assert_eq!(fmt.format_f64(1234.5).text, "1.234,50");
    assert_eq!(fmt.grouping_size(), 3);
}

#[test]
fn test_describe_mentions_pattern() {
    let fmt = formatter("#,##0.00");
    let summary = fmt.describe();
    assert!(summary.contains("#,##0.00"), "got {}", summary);
    assert!(summary.contains("groupingSize=3"), "got {}", summary);
}

#[test]
fn test_to_pattern_reflects_overrides() {
    let mut fmt = formatter("0.00");
    fmt.set_positive_prefix(Some("$"));
    assert_eq!(fmt.to_pattern(), "$0.00");
}
