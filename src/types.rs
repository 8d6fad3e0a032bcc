//! Type definitions for the decimal formatting engine
//!
//! This module defines the symbol table, the enums shared between the
//! pattern compiler, the formatting engine and the parsing engine, and the
//! field-span types produced by formatting.

/// Locale-specific characters and strings used by both formatting and
/// parsing. One instance per configured locale context.
///
/// The digit shapes are the ten consecutive code points starting at
/// `zero_digit`, so `zero_digit = '٠'` selects the Arabic-Indic digits.
/// Instances are plain data; replacing a formatter's symbols wholesale never
/// invalidates its compiled pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalSymbols {
    /// Separator between integer and fraction digits
    pub decimal_separator: char,
    /// Separator between digit groups in the integer part
    pub grouping_separator: char,
    /// Decimal separator used when the pattern contains a currency sign
    pub monetary_decimal_separator: char,
    /// Grouping separator used when the pattern contains a currency sign
    pub monetary_grouping_separator: char,
    /// Separates the positive and negative sub-patterns
    pub pattern_separator: char,
    /// Percent sign, also the pattern character selecting a x100 multiplier
    pub percent: char,
    /// Per-mille sign, also the pattern character selecting a x1000 multiplier
    pub per_mille: char,
    /// Digit zero; digit `d` renders as `zero_digit + d`
    pub zero_digit: char,
    /// The optional-digit placeholder in patterns
    pub digit: char,
    pub minus_sign: char,
    pub plus_sign: char,
    /// Separator between mantissa and exponent, usually `E`
    pub exponent_separator: String,
    pub infinity: String,
    pub nan: String,
    /// Local currency symbol substituted for a single currency sign
    pub currency_symbol: String,
    /// ISO code substituted for a doubled currency sign
    pub international_currency_symbol: String,
    /// Escape introducing a pad character in patterns
    pub pad_escape: char,
}

impl Default for DecimalSymbols {
    fn default() -> Self {
        DecimalSymbols {
            decimal_separator: '.',
            grouping_separator: ',',
            monetary_decimal_separator: '.',
            monetary_grouping_separator: ',',
            pattern_separator: ';',
            percent: '%',
            per_mille: '‰',
            zero_digit: '0',
            digit: '#',
            minus_sign: '-',
            plus_sign: '+',
            exponent_separator: "E".to_string(),
            infinity: "∞".to_string(),
            nan: "NaN".to_string(),
            currency_symbol: "$".to_string(),
            international_currency_symbol: "USD".to_string(),
            pad_escape: '*',
        }
    }
}

impl DecimalSymbols {
    /// The glyph for digit value `d` (0..=9) in this symbol table's shape family
    pub fn digit_char(&self, d: u8) -> char {
        char::from_u32(self.zero_digit as u32 + u32::from(d)).unwrap_or('0')
    }

    /// The digit value of `c` if it belongs to this shape family
    pub fn digit_value(&self, c: char) -> Option<u8> {
        let delta = (c as u32).wrapping_sub(self.zero_digit as u32);
        if delta <= 9 { Some(delta as u8) } else { None }
    }
}

/// One piece of a pattern-derived affix
#[derive(Debug, Clone, PartialEq)]
pub enum AffixPart {
    /// Literal text emitted as-is
    Literal(String),
    /// The symbol table's minus sign
    MinusSign,
    /// The symbol table's plus sign
    PlusSign,
    /// Percent glyph
    Percent,
    /// Per-mille glyph
    PerMille,
    /// Local currency symbol
    CurrencySymbol,
    /// International (ISO) currency symbol
    CurrencyIso,
}

/// How a value is rounded before digit rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
    /// Toward zero
    Down,
    /// Away from zero
    Up,
    /// To the nearest neighbor, ties to the even last digit
    HalfEven,
    /// To the nearest neighbor, ties toward zero
    HalfDown,
    /// To the nearest neighbor, ties away from zero
    HalfUp,
}

/// Where pad characters are inserted when a format width is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadPosition {
    BeforePrefix,
    AfterPrefix,
    BeforeSuffix,
    AfterSuffix,
}

/// What kind of numeric value a parse call should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Collapse to the narrowest native type, `i64` when possible
    Native,
    /// Preserve the exact digit sequence and scale
    BigDecimal,
    /// Stop at the decimal separator
    IntegerOnly,
}

/// The semantic component a span of formatted output belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Fraction,
    DecimalSeparator,
    ExponentSymbol,
    ExponentSign,
    Exponent,
    GroupingSeparator,
    Currency,
    Percent,
    PerMille,
    Sign,
}

/// A tagged char range over the output of one format call
///
/// `start..end` are char offsets, `end` exclusive. Several spans may share a
/// kind; grouping separators produce one span each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub kind: FieldKind,
    pub start: usize,
    pub end: usize,
}

/// The result of one format call: output text plus its field spans
#[derive(Debug, Clone, PartialEq)]
pub struct Formatted {
    pub text: String,
    pub spans: Vec<FieldSpan>,
}

impl Formatted {
    /// A fresh forward-only reader over the span list. Any number of cursors
    /// may read the same list independently.
    pub fn cursor(&self) -> FieldCursor<'_> {
        FieldCursor {
            spans: &self.spans,
            next: 0,
            current: None,
        }
    }

    /// First span of the given kind, by linear scan
    pub fn span_of(&self, kind: FieldKind) -> Option<&FieldSpan> {
        self.spans.iter().find(|s| s.kind == kind)
    }
}

/// Forward-only cursor over a span list
///
/// Call `advance` until it returns `false`; `current` is the span the last
/// successful `advance` moved onto.
#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    spans: &'a [FieldSpan],
    next: usize,
    current: Option<&'a FieldSpan>,
}

impl<'a> FieldCursor<'a> {
    /// Move to the next span; `false` once the list is exhausted
    pub fn advance(&mut self) -> bool {
        if self.next < self.spans.len() {
            self.current = Some(&self.spans[self.next]);
            self.next += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    pub fn current(&self) -> Option<&'a FieldSpan> {
        self.current
    }
}

/// A successfully parsed numeric value
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedNumber {
    /// Integral and in `i64` range
    Long(i64),
    /// Everything else representable as a double, including ±infinity and NaN
    Double(f64),
    /// Exact digit sequence, trailing zeros preserved. The value is
    /// `unscaled * 10^-scale` with the given sign.
    Decimal {
        negative: bool,
        unscaled: String,
        scale: i32,
    },
}

/// Outcome of a parse call
///
/// Consuming some characters and stopping at an unparsable tail is success
/// with a short `end`; only a completely unmatched start is a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// `end` is the char offset one past the last consumed character
    Number { value: ParsedNumber, end: usize },
    /// Nothing numeric at the start offset; `error_index` is that offset
    Failure { error_index: usize },
}

impl ParseResult {
    /// The parsed value, if any
    pub fn value(&self) -> Option<&ParsedNumber> {
        match self {
            ParseResult::Number { value, .. } => Some(value),
            ParseResult::Failure { .. } => None,
        }
    }
}
