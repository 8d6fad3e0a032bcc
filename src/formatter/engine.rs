use crate::decimal::DigitSequence;
use crate::spec::{FormatSpec, UNBOUNDED_INTEGER_DIGITS};
use crate::types::{AffixPart, DecimalSymbols, FieldKind, FieldSpan, Formatted, PadPosition};

// Bound on digit counts that can come out of attribute setters, so a
// pathological min/max never makes rendering unbounded.
const DIGIT_CAP: u32 = 1_000_000;

/// Output accumulator: text, running char length, and the span list.
struct SpanSink {
    text: String,
    chars: usize,
    spans: Vec<FieldSpan>,
}

impl SpanSink {
    fn new() -> Self {
        SpanSink {
            text: String::new(),
            chars: 0,
            spans: Vec::new(),
        }
    }

    fn push(&mut self, c: char) {
        self.text.push(c);
        self.chars += 1;
    }

    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.chars += s.chars().count();
    }

    fn mark(&self) -> usize {
        self.chars
    }

    fn tag(&mut self, kind: FieldKind, start: usize) {
        if self.chars > start {
            self.spans.push(FieldSpan {
                kind,
                start,
                end: self.chars,
            });
        }
    }

    fn finish(self) -> Formatted {
        Formatted {
            text: self.text,
            spans: self.spans,
        }
    }
}

fn cap(value: u32) -> i32 {
    value.min(DIGIT_CAP) as i32
}

/// Render a captured value through the full pipeline: multiplier, increment
/// rounding, digit-count rounding, digit split, grouping, affixes, padding.
pub(crate) fn render(value: DigitSequence, spec: &FormatSpec, symbols: &DecimalSymbols) -> Formatted {
    let negative = value.negative;
    let mut digits = value;
    if spec.multiplier > 1 {
        digits.multiply_int(spec.multiplier as u32);
    }
    if spec.rounding_increment > 0.0 {
        let increment = DigitSequence::from_f64(spec.rounding_increment);
        digits.round_to_increment(&increment, spec.rounding_mode);
    }
    if spec.exponent_digits > 0 {
        return render_scientific(digits, negative, spec, symbols);
    }
    if spec.significant_digits_used {
        digits.round_significant(cap(spec.max_significant_digits).max(1), spec.rounding_mode);
    } else {
        digits.round_fraction(cap(spec.max_fraction_digits), spec.rounding_mode);
    }
    // Modulo window on excess integer digits, active only when the maximum
    // was explicitly lowered below the unbounded default.
    if spec.max_integer_digits < UNBOUNDED_INTEGER_DIGITS
        && digits.decimal_at > spec.max_integer_digits as i32
    {
        let drop = (digits.decimal_at - spec.max_integer_digits as i32) as usize;
        let n = drop.min(digits.digits.len());
        digits.digits.drain(..n);
        digits.decimal_at = spec.max_integer_digits as i32;
    }
    render_body(&digits, negative, None, spec, symbols)
}

fn render_scientific(
    mut digits: DigitSequence,
    negative: bool,
    spec: &FormatSpec,
    symbols: &DecimalSymbols,
) -> Formatted {
    let int_shown = cap(spec.min_integer_digits).max(1);
    let significant = if spec.significant_digits_used {
        cap(spec.max_significant_digits).max(1)
    } else {
        int_shown + cap(spec.max_fraction_digits)
    };
    digits.round_significant(significant.max(1), spec.rounding_mode);
    let exponent = if digits.is_zero() {
        0
    } else {
        let e = digits.decimal_at - int_shown;
        digits.decimal_at = int_shown;
        e
    };
    render_body(&digits, negative, Some(exponent), spec, symbols)
}

fn render_body(
    digits: &DigitSequence,
    negative: bool,
    exponent: Option<i32>,
    spec: &FormatSpec,
    symbols: &DecimalSymbols,
) -> Formatted {
    let mut sink = SpanSink::new();
    expand_affix(&mut sink, spec, symbols, negative, true);
    let prefix_end = sink.mark();

    let min_int = if spec.significant_digits_used {
        1
    } else {
        cap(spec.min_integer_digits).max(1)
    };
    let int_count = digits.decimal_at.max(0).max(min_int) as usize;
    let g1 = i32::from(spec.grouping_size);
    let g2 = {
        let s = i32::from(spec.secondary_grouping_size);
        if s > 0 { s } else { g1 }
    };
    let grouping_on = spec.grouping_used && g1 > 0 && exponent.is_none();
    let group_sep = if spec.monetary {
        symbols.monetary_grouping_separator
    } else {
        symbols.grouping_separator
    };
    let decimal_sep = if spec.monetary {
        symbols.monetary_decimal_separator
    } else {
        symbols.decimal_separator
    };

    let integer_span_slot = sink.spans.len();
    let int_start = sink.mark();
    for p in (0..int_count).rev() {
        let index = digits.decimal_at - 1 - p as i32;
        sink.push(symbols.digit_char(digits.digit_at(index)));
        let place = p as i32;
        if grouping_on && p > 0 && place >= g1 && (place - g1) % g2 == 0 {
            let m = sink.mark();
            sink.push(group_sep);
            sink.tag(FieldKind::GroupingSeparator, m);
        }
    }
    // The integer span covers digits and embedded separators; keep it ahead
    // of the separator spans so the list stays ordered by start offset.
    sink.spans.insert(
        integer_span_slot,
        FieldSpan {
            kind: FieldKind::Integer,
            start: int_start,
            end: sink.mark(),
        },
    );

    let present = digits.fraction_digit_count().min(DIGIT_CAP);
    let frac_count = if spec.significant_digits_used {
        let min_sig = cap(spec.min_significant_digits).max(1) as u32;
        let shown = digits.digits.len().max(1) as u32;
        present + min_sig.saturating_sub(shown)
    } else {
        present.max(spec.min_fraction_digits.min(DIGIT_CAP))
    } as usize;

    if frac_count > 0 || spec.decimal_always_shown {
        let m = sink.mark();
        sink.push(decimal_sep);
        sink.tag(FieldKind::DecimalSeparator, m);
    }
    if frac_count > 0 {
        let m = sink.mark();
        for i in 0..frac_count {
            let index = digits.decimal_at + i as i32;
            sink.push(symbols.digit_char(digits.digit_at(index)));
        }
        sink.tag(FieldKind::Fraction, m);
    }

    if let Some(exp) = exponent {
        let m = sink.mark();
        sink.push_str(&symbols.exponent_separator);
        sink.tag(FieldKind::ExponentSymbol, m);
        if exp < 0 {
            let m = sink.mark();
            sink.push(symbols.minus_sign);
            sink.tag(FieldKind::ExponentSign, m);
        } else if spec.exponent_always_signed {
            let m = sink.mark();
            sink.push(symbols.plus_sign);
            sink.tag(FieldKind::ExponentSign, m);
        }
        let m = sink.mark();
        let mut magnitude = exp.unsigned_abs();
        let mut exp_digits: Vec<u8> = Vec::new();
        while magnitude > 0 {
            exp_digits.push((magnitude % 10) as u8);
            magnitude /= 10;
        }
        if exp_digits.is_empty() {
            exp_digits.push(0);
        }
        while exp_digits.len() < spec.exponent_digits as usize {
            exp_digits.push(0);
        }
        for &d in exp_digits.iter().rev() {
            sink.push(symbols.digit_char(d));
        }
        sink.tag(FieldKind::Exponent, m);
    }

    let suffix_start = sink.mark();
    expand_affix(&mut sink, spec, symbols, negative, false);

    apply_padding(&mut sink, spec, prefix_end, suffix_start);
    sink.finish()
}

/// NaN renders as the bare symbol; affixes do not apply, padding does.
pub(crate) fn render_nan(spec: &FormatSpec, symbols: &DecimalSymbols) -> Formatted {
    let mut sink = SpanSink::new();
    let m = sink.mark();
    sink.push_str(&symbols.nan);
    sink.tag(FieldKind::Integer, m);
    let end = sink.mark();
    apply_padding(&mut sink, spec, 0, end);
    sink.finish()
}

/// Infinity renders inside the sign-appropriate affixes.
pub(crate) fn render_infinity(
    negative: bool,
    spec: &FormatSpec,
    symbols: &DecimalSymbols,
) -> Formatted {
    let mut sink = SpanSink::new();
    expand_affix(&mut sink, spec, symbols, negative, true);
    let prefix_end = sink.mark();
    sink.push_str(&symbols.infinity);
    sink.tag(FieldKind::Integer, prefix_end);
    let suffix_start = sink.mark();
    expand_affix(&mut sink, spec, symbols, negative, false);
    apply_padding(&mut sink, spec, prefix_end, suffix_start);
    sink.finish()
}

fn apply_padding(sink: &mut SpanSink, spec: &FormatSpec, prefix_end: usize, suffix_start: usize) {
    if spec.format_width == 0 || sink.chars >= spec.format_width {
        return;
    }
    let missing = spec.format_width - sink.chars;
    let at_char = match spec.pad_position {
        PadPosition::BeforePrefix => 0,
        PadPosition::AfterPrefix => prefix_end,
        PadPosition::BeforeSuffix => suffix_start,
        PadPosition::AfterSuffix => sink.chars,
    };
    let at_byte = sink
        .text
        .char_indices()
        .nth(at_char)
        .map(|(b, _)| b)
        .unwrap_or(sink.text.len());
    let padding: String = std::iter::repeat(spec.pad_char).take(missing).collect();
    sink.text.insert_str(at_byte, &padding);
    sink.chars += missing;
    for span in &mut sink.spans {
        if span.start >= at_char {
            span.start += missing;
            span.end += missing;
        } else if span.end > at_char {
            span.end += missing;
        }
    }
}

fn expand_affix(
    sink: &mut SpanSink,
    spec: &FormatSpec,
    symbols: &DecimalSymbols,
    negative: bool,
    is_prefix: bool,
) {
    let override_text = match (negative, is_prefix) {
        (false, true) => spec.positive_prefix_override.as_deref(),
        (false, false) => spec.positive_suffix_override.as_deref(),
        (true, true) => spec.negative_prefix_override.as_deref(),
        (true, false) => spec.negative_suffix_override.as_deref(),
    };
    if let Some(text) = override_text {
        sink.push_str(text);
        return;
    }
    if negative {
        if is_prefix {
            match &spec.negative_prefix {
                Some(parts) => expand_parts(sink, parts, symbols),
                None => {
                    // Auto-derived negative form: minus sign + positive prefix.
                    expand_parts(sink, &[AffixPart::MinusSign], symbols);
                    expand_parts(sink, &spec.positive_prefix, symbols);
                }
            }
        } else {
            match &spec.negative_suffix {
                Some(parts) => expand_parts(sink, parts, symbols),
                None => expand_parts(sink, &spec.positive_suffix, symbols),
            }
        }
    } else if is_prefix {
        expand_parts(sink, &spec.positive_prefix, symbols);
    } else {
        expand_parts(sink, &spec.positive_suffix, symbols);
    }
}

fn expand_parts(sink: &mut SpanSink, parts: &[AffixPart], symbols: &DecimalSymbols) {
    for part in parts {
        match part {
            AffixPart::Literal(text) => sink.push_str(text),
            AffixPart::MinusSign => {
                let m = sink.mark();
                sink.push(symbols.minus_sign);
                sink.tag(FieldKind::Sign, m);
            }
            AffixPart::PlusSign => {
                let m = sink.mark();
                sink.push(symbols.plus_sign);
                sink.tag(FieldKind::Sign, m);
            }
            AffixPart::Percent => {
                let m = sink.mark();
                sink.push(symbols.percent);
                sink.tag(FieldKind::Percent, m);
            }
            AffixPart::PerMille => {
                let m = sink.mark();
                sink.push(symbols.per_mille);
                sink.tag(FieldKind::PerMille, m);
            }
            AffixPart::CurrencySymbol => {
                let m = sink.mark();
                sink.push_str(&symbols.currency_symbol);
                sink.tag(FieldKind::Currency, m);
            }
            AffixPart::CurrencyIso => {
                let m = sink.mark();
                sink.push_str(&symbols.international_currency_symbol);
                sink.tag(FieldKind::Currency, m);
            }
        }
    }
}

/// Plain-text expansion of an effective affix, used for parse matching.
pub(crate) fn affix_text(
    spec: &FormatSpec,
    symbols: &DecimalSymbols,
    negative: bool,
    is_prefix: bool,
) -> String {
    let mut sink = SpanSink::new();
    expand_affix(&mut sink, spec, symbols, negative, is_prefix);
    sink.text
}
