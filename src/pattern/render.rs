use crate::pattern::grammar::PatternChars;
use crate::spec::FormatSpec;
use crate::types::{AffixPart, DecimalSymbols, PadPosition};

// Caps for pathological attribute values so serialization stays bounded;
// anything a pattern can express is far below these.
const MAX_EMITTED_INTEGER: u32 = 340;
const MAX_EMITTED_FRACTION: u32 = 340;

/// Serialize a spec back to pattern text.
///
/// The result recompiles to an equivalent spec; it is not guaranteed to be
/// byte-identical to the pattern the spec came from when that pattern
/// carried redundant characters.
pub fn to_pattern(spec: &FormatSpec, symbols: &DecimalSymbols, localized: bool) -> String {
    let chars = if localized {
        PatternChars::localized(symbols)
    } else {
        PatternChars::invariant()
    };
    let mut out = String::new();
    let pad_active = spec.format_width > 0;

    if pad_active && spec.pad_position == PadPosition::BeforePrefix {
        push_pad(&mut out, &chars, spec);
    }
    append_affix(
        &mut out,
        &chars,
        spec.positive_prefix_override.as_deref(),
        &spec.positive_prefix,
    );
    if pad_active && spec.pad_position == PadPosition::AfterPrefix {
        push_pad(&mut out, &chars, spec);
    }
    let body = numeric_body(spec, &chars);
    out.push_str(&body);
    if pad_active && spec.pad_position == PadPosition::BeforeSuffix {
        push_pad(&mut out, &chars, spec);
    }
    append_affix(
        &mut out,
        &chars,
        spec.positive_suffix_override.as_deref(),
        &spec.positive_suffix,
    );
    if pad_active && spec.pad_position == PadPosition::AfterSuffix {
        push_pad(&mut out, &chars, spec);
    }

    let explicit_negative = spec.negative_prefix.is_some()
        || spec.negative_suffix.is_some()
        || spec.negative_prefix_override.is_some()
        || spec.negative_suffix_override.is_some();
    if explicit_negative {
        out.push(chars.separator);
        let derived_prefix;
        let neg_prefix: &[AffixPart] = match &spec.negative_prefix {
            Some(parts) => parts,
            None => {
                let mut parts = vec![AffixPart::MinusSign];
                parts.extend(spec.positive_prefix.iter().cloned());
                derived_prefix = parts;
                &derived_prefix
            }
        };
        append_affix(
            &mut out,
            &chars,
            spec.negative_prefix_override.as_deref(),
            neg_prefix,
        );
        out.push_str(&body);
        let neg_suffix: &[AffixPart] = match &spec.negative_suffix {
            Some(parts) => parts,
            None => &spec.positive_suffix,
        };
        append_affix(
            &mut out,
            &chars,
            spec.negative_suffix_override.as_deref(),
            neg_suffix,
        );
    }
    out
}

fn push_pad(out: &mut String, chars: &PatternChars, spec: &FormatSpec) {
    out.push(chars.pad);
    out.push(spec.pad_char);
}

fn numeric_body(spec: &FormatSpec, chars: &PatternChars) -> String {
    let mut body = String::new();
    let g1 = u32::from(spec.grouping_size);
    let g2 = u32::from(spec.secondary_grouping_size);
    let grouped = spec.grouping_used && g1 > 0;
    let min_int = spec.min_integer_digits.min(MAX_EMITTED_INTEGER);
    let total = if grouped {
        let span = if g2 > 0 { g1 + g2 + 1 } else { g1 + 1 };
        span.max(min_int + 1)
    } else {
        min_int.max(1)
    };
    let g2eff = if g2 > 0 { g2 } else { g1 };
    for p in (0..total.min(MAX_EMITTED_INTEGER)).rev() {
        body.push(if p < min_int { chars.zero } else { chars.digit });
        if grouped && p > 0 && p >= g1 && (p - g1) % g2eff == 0 {
            body.push(chars.group);
        }
    }
    let max_frac = spec.max_fraction_digits.min(MAX_EMITTED_FRACTION);
    let min_frac = spec.min_fraction_digits.min(max_frac);
    if max_frac > 0 {
        body.push(chars.decimal);
        for i in 0..max_frac {
            body.push(if i < min_frac { chars.zero } else { chars.digit });
        }
    } else if spec.decimal_always_shown {
        body.push(chars.decimal);
    }
    if spec.exponent_digits > 0 {
        body.push_str(&chars.exponent);
        if spec.exponent_always_signed {
            body.push(chars.plus);
        }
        for _ in 0..spec.exponent_digits {
            body.push(chars.zero);
        }
    }
    body
}

fn append_affix(
    out: &mut String,
    chars: &PatternChars,
    override_text: Option<&str>,
    parts: &[AffixPart],
) {
    if let Some(text) = override_text {
        append_literal(out, chars, text);
        return;
    }
    for part in parts {
        match part {
            AffixPart::Literal(text) => append_literal(out, chars, text),
            AffixPart::MinusSign => out.push(chars.minus),
            AffixPart::PlusSign => out.push(chars.plus),
            AffixPart::Percent => out.push(chars.percent),
            AffixPart::PerMille => out.push(chars.per_mille),
            AffixPart::CurrencySymbol => out.push('¤'),
            AffixPart::CurrencyIso => out.push_str("¤¤"),
        }
    }
}

/// Literal affix text, quoted when it contains anything the grammar would
/// otherwise interpret.
fn append_literal(out: &mut String, chars: &PatternChars, text: &str) {
    if text.is_empty() {
        return;
    }
    let needs_quote = text.chars().any(|c| {
        c == chars.zero
            || c == chars.digit
            || c == chars.group
            || c == chars.decimal
            || c == chars.separator
            || c == chars.percent
            || c == chars.per_mille
            || c == chars.minus
            || c == chars.plus
            || c == chars.pad
            || c == '¤'
            || c == '\''
    });
    if needs_quote {
        out.push('\'');
        for c in text.chars() {
            if c == '\'' {
                out.push_str("''");
            } else {
                out.push(c);
            }
        }
        out.push('\'');
    } else {
        out.push_str(text);
    }
}
