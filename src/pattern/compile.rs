use winnow::Parser;
use winnow::combinator::{opt, repeat};

use crate::error::FormatError;
use crate::pattern::grammar::{self, CoreToken, PatternChars};
use crate::spec::{FormatSpec, UNBOUNDED_INTEGER_DIGITS};
use crate::types::{AffixPart, DecimalSymbols, PadPosition};

/// One parsed sub-pattern. For the negative sub-pattern only the affixes are
/// meaningful; its numeric portion is still checked for well-formedness.
#[derive(Debug, Default)]
struct SubPattern {
    pad: Option<(char, PadPosition)>,
    prefix: Vec<AffixPart>,
    core: Vec<CoreToken>,
    exponent: Option<(u8, bool)>,
    suffix: Vec<AffixPart>,
    body_chars: usize,
}

/// What the numeric portion of a sub-pattern implies for the spec
#[derive(Debug, Default)]
struct CoreInfo {
    min_integer: u32,
    integer_placeholders: u32,
    min_fraction: u32,
    max_fraction: u32,
    has_decimal: bool,
    grouping_size: u32,
    secondary_grouping_size: u32,
}

/// Compile a pattern string against a symbol table.
///
/// With `localized` set, the special characters are the symbol table's own
/// instead of the invariant ASCII set; the currency sign and the quote are
/// the same in both modes.
pub fn compile(
    pattern: &str,
    symbols: &DecimalSymbols,
    localized: bool,
) -> Result<FormatSpec, FormatError> {
    let chars = if localized {
        PatternChars::localized(symbols)
    } else {
        PatternChars::invariant()
    };
    let mut input = pattern;
    let positive = parse_subpattern(pattern, &chars, &mut input)?;
    let mut negative = None;
    if let Some(rest) = input.strip_prefix(chars.separator) {
        input = rest;
        negative = Some(parse_subpattern(pattern, &chars, &mut input)?);
    }
    if !input.is_empty() {
        return Err(syntax_err(
            pattern,
            input,
            "too many sub-patterns or trailing characters",
        ));
    }
    build_spec(positive, negative)
}

fn parse_subpattern(
    full: &str,
    chars: &PatternChars,
    input: &mut &str,
) -> Result<SubPattern, FormatError> {
    let mut sub = SubPattern::default();

    if let Some(pad) = try_pad(chars, input) {
        sub.pad = Some((pad, PadPosition::BeforePrefix));
    }
    let body_start = input.len();
    let mut pads_in_body = 0usize;

    sub.prefix = repeat(0.., grammar::affix_part(chars))
        .parse_next(input)
        .unwrap_or_default();

    if let Some(pad) = try_pad(chars, input) {
        if sub.pad.is_some() {
            return Err(syntax_err(full, input, "multiple pad specifications"));
        }
        sub.pad = Some((pad, PadPosition::AfterPrefix));
        pads_in_body += 1;
    }

    let core_result: Result<Vec<CoreToken>, winnow::error::ErrMode<winnow::error::ContextError>> =
        repeat(1.., grammar::core_token(chars)).parse_next(input);
    sub.core = match core_result {
        Ok(core) => core,
        Err(_) => {
            let message = if input.starts_with('\'') {
                "unbalanced quote"
            } else {
                "sub-pattern has no digit placeholders"
            };
            return Err(syntax_err(full, input, message));
        }
    };

    sub.exponent = opt(grammar::exponent_spec(chars))
        .parse_next(input)
        .unwrap_or(None);

    if let Some(pad) = try_pad(chars, input) {
        if sub.pad.is_some() {
            return Err(syntax_err(full, input, "multiple pad specifications"));
        }
        sub.pad = Some((pad, PadPosition::BeforeSuffix));
        pads_in_body += 1;
    }

    sub.suffix = repeat(0.., grammar::affix_part(chars))
        .parse_next(input)
        .unwrap_or_default();

    if let Some(pad) = try_pad(chars, input) {
        if sub.pad.is_some() {
            return Err(syntax_err(full, input, "multiple pad specifications"));
        }
        sub.pad = Some((pad, PadPosition::AfterSuffix));
        pads_in_body += 1;
    }

    // Unterminated quoted text in an affix leaves the opening quote behind.
    if input.starts_with('\'') {
        return Err(syntax_err(full, input, "unbalanced quote"));
    }

    // Width of the sub-pattern body: consumed chars minus quotes and pad
    // specifications, the way a pad-aware pattern defines its target width.
    let start_off = full.len() - body_start;
    let end_off = full.len() - input.len();
    let body = &full[start_off..end_off];
    sub.body_chars = body
        .chars()
        .filter(|&c| c != '\'')
        .count()
        .saturating_sub(pads_in_body * 2);

    Ok(sub)
}

fn try_pad(chars: &PatternChars, input: &mut &str) -> Option<char> {
    opt(grammar::pad_spec(chars)).parse_next(input).unwrap_or(None)
}

fn analyze_core(core: &[CoreToken]) -> Result<CoreInfo, FormatError> {
    let mut info = CoreInfo::default();
    let mut int_zero_seen = false;
    let mut frac_digit_seen = false;
    let mut digits_since_group: u32 = 0;
    let mut group_runs: Vec<u32> = Vec::new();

    for token in core {
        match token {
            CoreToken::Decimal => {
                if info.has_decimal {
                    return Err(core_err("multiple decimal separators", core));
                }
                if !group_runs.is_empty() && digits_since_group == 0 {
                    return Err(core_err("grouping separator adjacent to decimal", core));
                }
                info.has_decimal = true;
            }
            CoreToken::Group => {
                if info.has_decimal {
                    return Err(core_err("grouping separator in fraction part", core));
                }
                if digits_since_group == 0 {
                    return Err(core_err("zero-width digit group", core));
                }
                group_runs.push(digits_since_group);
                digits_since_group = 0;
            }
            CoreToken::Zero => {
                if info.has_decimal {
                    if frac_digit_seen {
                        return Err(core_err(
                            "required digit after optional digit in fraction part",
                            core,
                        ));
                    }
                    info.min_fraction += 1;
                    info.max_fraction += 1;
                } else {
                    int_zero_seen = true;
                    info.min_integer += 1;
                    info.integer_placeholders += 1;
                    digits_since_group += 1;
                }
            }
            CoreToken::Digit => {
                if info.has_decimal {
                    frac_digit_seen = true;
                    info.max_fraction += 1;
                } else {
                    if int_zero_seen {
                        return Err(core_err(
                            "optional digit after required digit in integer part",
                            core,
                        ));
                    }
                    info.integer_placeholders += 1;
                    digits_since_group += 1;
                }
            }
        }
    }

    if !group_runs.is_empty() {
        if digits_since_group == 0 {
            return Err(core_err("trailing grouping separator", core));
        }
        info.grouping_size = digits_since_group;
        if group_runs.len() >= 2 {
            let between = *group_runs.last().unwrap_or(&0);
            if between != info.grouping_size {
                info.secondary_grouping_size = between;
            }
        }
    }

    Ok(info)
}

fn build_spec(
    positive: SubPattern,
    negative: Option<SubPattern>,
) -> Result<FormatSpec, FormatError> {
    let info = analyze_core(&positive.core)?;
    if let Some(neg) = &negative {
        analyze_core(&neg.core)?;
    }

    let mut spec = FormatSpec::default();
    spec.positive_prefix = positive.prefix;
    spec.positive_suffix = positive.suffix;
    if let Some(neg) = negative {
        spec.negative_prefix = Some(neg.prefix);
        spec.negative_suffix = Some(neg.suffix);
    }

    spec.min_integer_digits = info.min_integer;
    spec.min_fraction_digits = info.min_fraction;
    spec.max_fraction_digits = info.max_fraction;
    spec.decimal_always_shown = info.has_decimal && info.max_fraction == 0;
    spec.grouping_size = info.grouping_size.min(255) as u8;
    spec.secondary_grouping_size = info.secondary_grouping_size.min(255) as u8;
    spec.grouping_used = spec.grouping_size > 0;

    if let Some((digits, signed)) = positive.exponent {
        spec.exponent_digits = digits;
        spec.exponent_always_signed = signed;
        spec.max_integer_digits = info.integer_placeholders.max(1);
    } else {
        spec.max_integer_digits = UNBOUNDED_INTEGER_DIGITS;
    }

    let affix_parts = spec
        .positive_prefix
        .iter()
        .chain(spec.positive_suffix.iter())
        .chain(spec.negative_prefix.iter().flatten())
        .chain(spec.negative_suffix.iter().flatten());
    let mut multiplier = 1;
    let mut monetary = false;
    for part in affix_parts {
        match part {
            AffixPart::PerMille => multiplier = 1000,
            AffixPart::Percent => {
                if multiplier == 1 {
                    multiplier = 100;
                }
            }
            AffixPart::CurrencySymbol | AffixPart::CurrencyIso => monetary = true,
            _ => {}
        }
    }
    spec.multiplier = multiplier;
    spec.monetary = monetary;

    if let Some((pad, position)) = positive.pad {
        spec.pad_char = pad;
        spec.pad_position = position;
        spec.format_width = positive.body_chars;
    }

    Ok(spec)
}

fn syntax_err(full: &str, rest: &str, message: &str) -> FormatError {
    let consumed = full.len() - rest.len();
    let offset = full[..consumed].chars().count();
    let fragment: String = if rest.is_empty() {
        full.to_string()
    } else {
        rest.chars().take(16).collect()
    };
    FormatError::PatternSyntax {
        message: message.to_string(),
        fragment,
        offset,
    }
}

fn core_err(message: &str, core: &[CoreToken]) -> FormatError {
    let fragment: String = core
        .iter()
        .map(|t| match t {
            CoreToken::Zero => '0',
            CoreToken::Digit => '#',
            CoreToken::Group => ',',
            CoreToken::Decimal => '.',
        })
        .collect();
    FormatError::PatternSyntax {
        message: message.to_string(),
        fragment,
        offset: 0,
    }
}
