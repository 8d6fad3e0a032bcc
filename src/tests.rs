use crate::error::FormatError;
use crate::pattern::{compile, to_pattern};
use crate::types::*;

fn invariant(pattern: &str) -> crate::spec::FormatSpec {
    compile(pattern, &DecimalSymbols::default(), false).unwrap()
}

#[test]
fn test_simple_pattern() {
    let spec = invariant("0.00");
    assert_eq!(spec.minimum_integer_digits(), 1);
    assert_eq!(spec.minimum_fraction_digits(), 2);
    assert_eq!(spec.maximum_fraction_digits(), 2);
    assert!(!spec.grouping_used());
    assert_eq!(spec.multiplier(), 1);
    assert!(!spec.decimal_separator_always_shown());
}

#[test]
fn test_grouping_derivation() {
    let spec = invariant("#,##0.###");
    assert_eq!(spec.grouping_size(), 3);
    assert_eq!(spec.secondary_grouping_size(), 0);
    assert!(spec.grouping_used());
    assert_eq!(spec.minimum_fraction_digits(), 0);
    assert_eq!(spec.maximum_fraction_digits(), 3);

    let spec = invariant("#,##,##0");
    assert_eq!(spec.grouping_size(), 3);
    assert_eq!(spec.secondary_grouping_size(), 2);
}

#[test]
fn test_negative_subpattern_affixes() {
    let spec = invariant("#,##0.00;(#,##0.00)");
    assert_eq!(
        spec.negative_prefix_parts(),
        Some(&[AffixPart::Literal("(".to_string())][..])
    );
    assert_eq!(
        spec.negative_suffix_parts(),
        Some(&[AffixPart::Literal(")".to_string())][..])
    );

    let spec = invariant("0.00;-0.00");
    assert_eq!(spec.negative_prefix_parts(), Some(&[AffixPart::MinusSign][..]));

    let spec = invariant("0.00");
    assert_eq!(spec.negative_prefix_parts(), None);
}

#[test]
fn test_multiplier_from_affix() {
    let spec = invariant("#,##0%");
    assert_eq!(spec.multiplier(), 100);
    assert_eq!(spec.positive_suffix_parts(), &[AffixPart::Percent][..]);

    let spec = invariant("0‰");
    assert_eq!(spec.multiplier(), 1000);
}

#[test]
fn test_currency_affixes() {
    let spec = invariant("¤#,##0.00");
    assert!(spec.is_monetary());
    assert_eq!(spec.positive_prefix_parts(), &[AffixPart::CurrencySymbol][..]);

    let spec = invariant("¤¤ #,##0.00");
    assert_eq!(
        spec.positive_prefix_parts(),
        &[AffixPart::CurrencyIso, AffixPart::Literal(" ".to_string())][..]
    );
}

#[test]
fn test_quoted_affix_literals() {
    let spec = invariant("'x''y'0");
    assert_eq!(
        spec.positive_prefix_parts(),
        &[AffixPart::Literal("x'y".to_string())][..]
    );

    // A doubled quote outside quoted text is one literal quote
    let spec = invariant("''0");
    assert_eq!(
        spec.positive_prefix_parts(),
        &[AffixPart::Literal("'".to_string())][..]
    );
}

#[test]
fn test_decimal_always_shown() {
    let spec = invariant("0.");
    assert!(spec.decimal_separator_always_shown());
    assert_eq!(spec.maximum_fraction_digits(), 0);
}

#[test]
fn test_exponent_clause() {
    let spec = invariant("0.###E0");
    assert_eq!(spec.exponent_digit_count(), 1);
    assert_eq!(spec.maximum_integer_digits(), 1);
    assert_eq!(spec.maximum_fraction_digits(), 3);

    let spec = invariant("00.##E+00");
    assert_eq!(spec.exponent_digit_count(), 2);
    assert!(spec.exponent_sign_always_shown());
}

#[test]
fn test_pad_specification() {
    let spec = invariant("*x#,##0.00");
    assert_eq!(spec.pad_character(), 'x');
    assert_eq!(spec.pad_position(), PadPosition::BeforePrefix);
    assert_eq!(spec.format_width(), 8);
}

#[test]
fn test_syntax_errors() {
    let symbols = DecimalSymbols::default();
    let bad = [
        "0.0.0",   // two decimal separators
        "0#",      // optional digit after required digit, integer part
        "0.#0",    // required digit after optional digit, fraction part
        "'x0",     // unbalanced quote
        "0;0;0",   // three sub-patterns
        ",00",     // zero-width leading group
        "#,,##0",  // adjacent grouping separators
        "abc",     // no digit placeholders
        "#,##0,",  // trailing grouping separator
    ];
    for pattern in bad {
        let result = compile(pattern, &symbols, false);
        assert!(
            matches!(result, Err(FormatError::PatternSyntax { .. })),
            "expected syntax error for {:?}, got {:?}",
            pattern,
            result
        );
    }
}

#[test]
fn test_localized_compilation() {
    let de = crate::locale::symbols_for("de_DE").unwrap();
    let spec = compile("#.##0,00", &de, true).unwrap();
    assert_eq!(spec.grouping_size(), 3);
    assert_eq!(spec.minimum_fraction_digits(), 2);

    // The same text is not a valid invariant pattern with two decimals
    assert!(compile("#.##0,00.0", &de, true).is_err());
}

#[test]
fn test_pattern_round_trip() {
    for pattern in [
        "#,##0.00",
        "#,##,##0",
        "0.00;(0.00)",
        "#,##0%",
        "¤#,##0.00",
        "0.###E0",
        "0.",
    ] {
        let symbols = DecimalSymbols::default();
        let spec = compile(pattern, &symbols, false).unwrap();
        let rendered = to_pattern(&spec, &symbols, false);
        let recompiled = compile(&rendered, &symbols, false).unwrap();
        assert_eq!(
            spec, recompiled,
            "round trip changed the spec for {:?} (rendered {:?})",
            pattern, rendered
        );
    }
    assert_eq!(to_pattern(&invariant("#,##0.00"), &DecimalSymbols::default(), false), "#,##0.00");
}

#[test]
fn test_localized_round_trip() {
    let de = crate::locale::symbols_for("de_DE").unwrap();
    let spec = compile("#,##0.00", &de, false).unwrap();
    let localized = to_pattern(&spec, &de, true);
    assert_eq!(localized, "#.##0,00");
    let back = compile(&localized, &de, true).unwrap();
    assert_eq!(spec, back);
}
