//! Text recognition engine
//!
//! Walks input text against the effective affixes, digit shapes and
//! separators of a spec + symbol table pair. Recognition is incremental: the
//! first character that cannot extend a valid number ends the parse with
//! success and a short consumed length. Only a completely unmatched start is
//! a failure, and it reports the start offset.

use crate::formatter::engine::affix_text;
use crate::spec::FormatSpec;
use crate::types::{DecimalSymbols, ParseMode, ParseResult, ParsedNumber};

/// State checkpoint taken before consuming a grouping separator, so an
/// implausible group can roll the parse back to the last valid boundary.
struct GroupSnapshot {
    at: usize,
    digits_len: usize,
}

/// Parse `text` beginning at char offset `start`.
pub fn parse(
    text: &str,
    start: usize,
    spec: &FormatSpec,
    symbols: &DecimalSymbols,
    mode: ParseMode,
) -> ParseResult {
    let chars: Vec<char> = text.chars().collect();
    if start > chars.len() {
        return ParseResult::Failure { error_index: start };
    }
    let lenient = spec.lenient_parse;
    let mut i = start;
    if lenient {
        while i < chars.len() && (chars[i].is_whitespace() || chars[i] == spec.pad_char) {
            i += 1;
        }
    }

    // NaN is recognized bare and case-sensitively, ahead of any affix.
    if matches_at(&chars, i, &symbols.nan) {
        let end = i + symbols.nan.chars().count();
        return ParseResult::Number {
            value: ParsedNumber::Double(f64::NAN),
            end,
        };
    }

    let pos_prefix = affix_text(spec, symbols, false, true);
    let neg_prefix = affix_text(spec, symbols, true, true);
    let pos_suffix = affix_text(spec, symbols, false, false);
    let neg_suffix = affix_text(spec, symbols, true, false);

    let pos_pre = match_affix(&chars, i, &pos_prefix);
    let neg_pre = match_affix(&chars, i, &neg_prefix);
    let (mut pos_live, mut neg_live) = (pos_pre.is_some(), neg_pre.is_some());
    if !pos_live && !neg_live {
        return ParseResult::Failure { error_index: start };
    }
    let p = pos_pre.unwrap_or(0);
    let n = neg_pre.unwrap_or(0);
    // Longest prefix wins; an exact tie is settled by the suffix later.
    if pos_live && neg_live {
        if p > n {
            neg_live = false;
        } else if n > p {
            pos_live = false;
        }
    }
    i += if pos_live { p } else { n };

    if matches_at(&chars, i, &symbols.infinity) {
        i += symbols.infinity.chars().count();
        let Some((negative, end)) =
            resolve_suffix(&chars, i, pos_live, neg_live, &pos_suffix, &neg_suffix, lenient)
        else {
            return ParseResult::Failure { error_index: start };
        };
        let value = if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return ParseResult::Number {
            value: ParsedNumber::Double(value),
            end,
        };
    }

    let integer_only = spec.parse_integer_only || mode == ParseMode::IntegerOnly;
    let group_sep = if spec.monetary {
        symbols.monetary_grouping_separator
    } else {
        symbols.grouping_separator
    };
    let dec_sep = if spec.monetary {
        symbols.monetary_decimal_separator
    } else {
        symbols.decimal_separator
    };
    let digit_of = |c: char| -> Option<u8> {
        symbols.digit_value(c).or_else(|| {
            if lenient {
                c.to_digit(10).map(|d| d as u8)
            } else {
                None
            }
        })
    };

    let mut digits = String::new();
    let mut frac_len: usize = 0;
    let mut seen_decimal = false;
    let mut snapshots: Vec<GroupSnapshot> = Vec::new();

    while i < chars.len() {
        let c = chars[i];
        if let Some(d) = digit_of(c) {
            if seen_decimal {
                frac_len += 1;
            }
            digits.push((b'0' + d) as char);
            i += 1;
        } else if !seen_decimal && c == group_sep && spec.grouping_used && !digits.is_empty() {
            let next_is_digit = i + 1 < chars.len() && digit_of(chars[i + 1]).is_some();
            if !next_is_digit {
                break;
            }
            snapshots.push(GroupSnapshot {
                at: i,
                digits_len: digits.len(),
            });
            i += 1;
        } else if !seen_decimal && c == dec_sep {
            if integer_only {
                break;
            }
            let next_is_digit = i + 1 < chars.len() && digit_of(chars[i + 1]).is_some();
            if digits.is_empty() && !next_is_digit {
                break;
            }
            seen_decimal = true;
            i += 1;
        } else {
            break;
        }
    }

    // Strict parsing only keeps separators whose groups are plausible under
    // the configured sizes; an implausible tail unwinds to the last boundary
    // where the consumed text was still a valid number.
    if !lenient && !snapshots.is_empty() {
        let g1 = usize::from(spec.grouping_size);
        let g2 = {
            let s = usize::from(spec.secondary_grouping_size);
            if s > 0 { s } else { g1 }
        };
        while let Some(last) = snapshots.last() {
            let int_len = digits.len() - frac_len;
            let mut ok = g1 > 0 && int_len - last.digits_len == g1;
            if ok {
                for pair in snapshots.windows(2) {
                    if pair[1].digits_len - pair[0].digits_len != g2 {
                        ok = false;
                        break;
                    }
                }
            }
            if ok {
                let first = snapshots[0].digits_len;
                if first == 0 || first > g2 {
                    ok = false;
                }
            }
            if ok {
                break;
            }
            if let Some(snap) = snapshots.pop() {
                i = snap.at;
                digits.truncate(snap.digits_len);
                frac_len = 0;
                seen_decimal = false;
            }
        }
    }

    let mut exponent: i32 = 0;
    if !integer_only && !digits.is_empty() && matches_at(&chars, i, &symbols.exponent_separator) {
        let mut j = i + symbols.exponent_separator.chars().count();
        let mut exp_negative = false;
        if j < chars.len() {
            if chars[j] == symbols.minus_sign {
                exp_negative = true;
                j += 1;
            } else if chars[j] == symbols.plus_sign {
                j += 1;
            }
        }
        let mut magnitude: i64 = 0;
        let mut count = 0;
        while j < chars.len() {
            let Some(d) = digit_of(chars[j]) else { break };
            magnitude = (magnitude * 10 + i64::from(d)).min(1_000_000);
            count += 1;
            j += 1;
        }
        if count > 0 {
            exponent = if exp_negative {
                -(magnitude as i32)
            } else {
                magnitude as i32
            };
            i = j;
        }
    }

    if digits.is_empty() {
        return ParseResult::Failure { error_index: start };
    }

    let Some((negative, end)) =
        resolve_suffix(&chars, i, pos_live, neg_live, &pos_suffix, &neg_suffix, lenient)
    else {
        return ParseResult::Failure { error_index: start };
    };

    let mut scale = frac_len as i32 - exponent;
    let unscaled = digits;
    // The multiplier divides out exactly as a scale shift when it is a
    // power of ten; anything else goes through double division.
    let mut double_fallback = None;
    if spec.multiplier != 1 {
        match pow10_exponent(spec.multiplier) {
            Some(k) => scale += k,
            None => {
                let raw = numeric_f64(negative, &unscaled, scale);
                double_fallback = Some(raw / f64::from(spec.multiplier));
            }
        }
    }

    let value = if let Some(v) = double_fallback {
        ParsedNumber::Double(v)
    } else if mode == ParseMode::BigDecimal {
        ParsedNumber::Decimal {
            negative,
            unscaled,
            scale,
        }
    } else {
        narrow(negative, &unscaled, scale)
    };
    ParseResult::Number { value, end }
}

/// Pick the sign whose suffix matches, preferring the longer suffix match
/// and positive on a tie. In lenient mode a missing suffix is accepted.
fn resolve_suffix(
    chars: &[char],
    at: usize,
    pos_live: bool,
    neg_live: bool,
    pos_suffix: &str,
    neg_suffix: &str,
    lenient: bool,
) -> Option<(bool, usize)> {
    let pos_m = if pos_live {
        match_affix(chars, at, pos_suffix)
    } else {
        None
    };
    let neg_m = if neg_live {
        match_affix(chars, at, neg_suffix)
    } else {
        None
    };
    match (pos_m, neg_m) {
        (Some(p), Some(n)) => {
            if n > p {
                Some((true, at + n))
            } else {
                Some((false, at + p))
            }
        }
        (Some(p), None) => Some((false, at + p)),
        (None, Some(n)) => Some((true, at + n)),
        (None, None) => {
            if lenient {
                Some((!pos_live, at))
            } else {
                None
            }
        }
    }
}

/// Collapse a parsed digit string to `Long` when it is integral and fits,
/// `Double` otherwise.
fn narrow(negative: bool, unscaled: &str, scale: i32) -> ParsedNumber {
    let len = unscaled.len() as i32;
    let integral = if scale <= 0 {
        true
    } else if scale >= len {
        unscaled.bytes().all(|b| b == b'0')
    } else {
        unscaled.bytes().skip((len - scale) as usize).all(|b| b == b'0')
    };
    if integral {
        let integer_part = if scale >= len {
            "0"
        } else if scale > 0 {
            &unscaled[..(len - scale) as usize]
        } else {
            unscaled
        };
        if let Ok(mut magnitude) = integer_part.parse::<i128>() {
            let mut shift = (-scale).max(0);
            let mut overflow = false;
            while shift > 0 {
                match magnitude.checked_mul(10) {
                    Some(m) => magnitude = m,
                    None => {
                        overflow = true;
                        break;
                    }
                }
                shift -= 1;
            }
            if !overflow {
                let signed = if negative { -magnitude } else { magnitude };
                if signed >= i128::from(i64::MIN) && signed <= i128::from(i64::MAX) {
                    return ParsedNumber::Long(signed as i64);
                }
            }
        }
    }
    ParsedNumber::Double(numeric_f64(negative, unscaled, scale))
}

fn numeric_f64(negative: bool, unscaled: &str, scale: i32) -> f64 {
    let text = format!(
        "{}{}e{}",
        if negative { "-" } else { "" },
        unscaled,
        i64::from(-scale)
    );
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn pow10_exponent(multiplier: i32) -> Option<i32> {
    let mut m = multiplier;
    let mut k = 0;
    while m > 1 {
        if m % 10 != 0 {
            return None;
        }
        m /= 10;
        k += 1;
    }
    Some(k)
}

fn matches_at(chars: &[char], at: usize, literal: &str) -> bool {
    if literal.is_empty() {
        return false;
    }
    let mut j = at;
    for c in literal.chars() {
        if j >= chars.len() || chars[j] != c {
            return false;
        }
        j += 1;
    }
    true
}

/// Length of the affix in chars if it matches at `at`; the empty affix
/// matches trivially.
fn match_affix(chars: &[char], at: usize, affix: &str) -> Option<usize> {
    let mut j = at;
    for c in affix.chars() {
        if j >= chars.len() || chars[j] != c {
            return None;
        }
        j += 1;
    }
    Some(j - at)
}
