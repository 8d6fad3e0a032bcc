//! Decimal formatting module
//!
//! The `DecimalFormatter` owns one compiled `FormatSpec` and one symbol
//! table and exposes the whole surface: pattern application with a cheap
//! repeated-application cache, validated attribute access, formatting of
//! integers, doubles and exact decimals, and parsing.

pub(crate) mod engine;

use crate::decimal::DigitSequence;
use crate::error::FormatError;
use crate::locale;
use crate::parse;
use crate::pattern;
use crate::spec::FormatSpec;
use crate::types::{
    DecimalSymbols, Formatted, PadPosition, ParseMode, ParseResult, RoundingMode,
};

/// A pattern-driven, locale-aware decimal formatter and parser.
///
/// One instance owns one configuration; formatting and parsing take `&self`
/// and are freely parallel across distinct instances. For concurrent use of
/// one configuration, clone it: clones are deep and share nothing, including
/// the last-applied-pattern cache.
///
/// # Examples
/// ```
/// use decimal_format::{DecimalFormatter, DecimalSymbols};
///
/// let fmt = DecimalFormatter::new("#,##0.00", DecimalSymbols::default()).unwrap();
/// assert_eq!(fmt.format_f64(1234.5).text, "1,234.50");
/// assert_eq!(fmt.format_i64(-7).text, "-7.00");
/// ```
#[derive(Debug, Clone)]
pub struct DecimalFormatter {
    spec: FormatSpec,
    symbols: DecimalSymbols,
    /// The last pattern given to `apply_pattern`, kept so repeated
    /// applications of the same pattern skip recompilation. Any attribute
    /// mutation clears it.
    last_pattern: Option<String>,
}

impl DecimalFormatter {
    /// Compile `pattern` (invariant form) against the given symbols.
    pub fn new(pattern: &str, symbols: DecimalSymbols) -> Result<Self, FormatError> {
        let spec = pattern::compile(pattern, &symbols, false)?;
        Ok(DecimalFormatter {
            spec,
            symbols,
            last_pattern: Some(pattern.to_string()),
        })
    }

    /// Formatter for a registered locale, using its symbols and default
    /// decimal pattern.
    pub fn for_locale(locale_id: &str) -> Result<Self, FormatError> {
        let symbols = locale::symbols_for(locale_id).ok_or_else(|| {
            FormatError::InvalidArgument(format!("unknown locale '{}'", locale_id))
        })?;
        let pattern = locale::decimal_pattern_for(locale_id).ok_or_else(|| {
            FormatError::InvalidArgument(format!("no default pattern for '{}'", locale_id))
        })?;
        Self::new(&pattern, symbols)
    }

    /// The compiled configuration (read-only; mutate through the setters).
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    pub fn symbols(&self) -> &DecimalSymbols {
        &self.symbols
    }

    /// Replace the symbol table wholesale. The compiled pattern stays valid;
    /// placeholders resolve against the new symbols from now on.
    pub fn set_symbols(&mut self, symbols: DecimalSymbols) {
        self.symbols = symbols;
        self.touch();
    }

    /// Apply an invariant pattern. Re-applying the pattern that is already
    /// active is a no-op; this makes repeated application cheap.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<(), FormatError> {
        if self.last_pattern.as_deref() == Some(pattern) {
            return Ok(());
        }
        self.spec = pattern::compile(pattern, &self.symbols, false)?;
        self.last_pattern = Some(pattern.to_string());
        Ok(())
    }

    /// Apply a pattern written with the symbol table's own characters.
    /// Always recompiles.
    pub fn apply_localized_pattern(&mut self, pattern: &str) -> Result<(), FormatError> {
        self.spec = pattern::compile(pattern, &self.symbols, true)?;
        self.last_pattern = None;
        Ok(())
    }

    /// Serialize the current configuration as an invariant pattern. The
    /// result recompiles to an equivalent configuration.
    pub fn to_pattern(&self) -> String {
        pattern::to_pattern(&self.spec, &self.symbols, false)
    }

    pub fn to_localized_pattern(&self) -> String {
        pattern::to_pattern(&self.spec, &self.symbols, true)
    }

    pub fn format_i64(&self, value: i64) -> Formatted {
        engine::render(DigitSequence::from_i64(value), &self.spec, &self.symbols)
    }

    /// Format a double. Finite values are first converted to their shortest
    /// exact decimal form; NaN and the infinities render as the symbol
    /// table's literal strings.
    pub fn format_f64(&self, value: f64) -> Formatted {
        if value.is_nan() {
            return engine::render_nan(&self.spec, &self.symbols);
        }
        if value.is_infinite() {
            return engine::render_infinity(value < 0.0, &self.spec, &self.symbols);
        }
        engine::render(DigitSequence::from_f64(value), &self.spec, &self.symbols)
    }

    /// Format an exact decimal given as sign, unscaled digit string and
    /// scale; the value is `unscaled * 10^-scale`. Rendering is digit for
    /// digit, with no binary floating-point intermediate.
    ///
    /// # Examples
    /// ```
    /// use decimal_format::{DecimalFormatter, DecimalSymbols};
    ///
    /// let fmt = DecimalFormatter::new("#,##0.00", DecimalSymbols::default()).unwrap();
    /// let out = fmt.format_decimal(false, "12345678901234567890123", 2).unwrap();
    /// assert_eq!(out.text, "123,456,789,012,345,678,901.23");
    /// ```
    pub fn format_decimal(
        &self,
        negative: bool,
        unscaled: &str,
        scale: i32,
    ) -> Result<Formatted, FormatError> {
        let digits = DigitSequence::from_unscaled(negative, unscaled, scale)?;
        Ok(engine::render(digits, &self.spec, &self.symbols))
    }

    /// Parse text starting at char offset `start`, collapsing to the
    /// narrowest native type.
    pub fn parse(&self, text: &str, start: usize) -> ParseResult {
        parse::parse(text, start, &self.spec, &self.symbols, ParseMode::Native)
    }

    /// Parse with an explicit result mode.
    pub fn parse_with_mode(&self, text: &str, start: usize, mode: ParseMode) -> ParseResult {
        parse::parse(text, start, &self.spec, &self.symbols, mode)
    }

    /// Update the local currency symbol and the ISO code together.
    pub fn set_currency(&mut self, symbol: &str, iso_code: &str) {
        self.symbols.currency_symbol = symbol.to_string();
        self.symbols.international_currency_symbol = iso_code.to_string();
        self.spec.currency_code = Some(iso_code.to_string());
        self.touch();
    }

    /// Resolve `iso_code` through the currency registry and apply it. For a
    /// monetary pattern this also pins the fraction digits to the currency's
    /// conventional count. Unknown codes fail with `InvalidArgument`.
    pub fn set_currency_code(&mut self, iso_code: &str) -> Result<(), FormatError> {
        let info = locale::currency_info(iso_code).ok_or_else(|| {
            FormatError::InvalidArgument(format!("unknown currency code '{}'", iso_code))
        })?;
        self.set_currency(&info.symbol, iso_code);
        if self.spec.monetary {
            self.spec.set_minimum_fraction_digits(info.fraction_digits);
            self.spec.set_maximum_fraction_digits(info.fraction_digits);
        }
        Ok(())
    }

    /// One-line diagnostic summary of the active configuration.
    pub fn describe(&self) -> String {
        format!(
            "DecimalFormatter[\"{}\", groupingSize={}, multiplier={}, minIntegerDigits={}, maxFractionDigits={}, grouping={}]",
            self.to_pattern(),
            self.spec.grouping_size,
            self.spec.multiplier,
            self.spec.min_integer_digits,
            self.spec.max_fraction_digits,
            self.spec.grouping_used,
        )
    }

    fn touch(&mut self) {
        self.last_pattern = None;
    }

    // Attribute surface. Every mutation invalidates the pattern cache so a
    // later apply_pattern call with the same text recompiles.

    pub fn minimum_integer_digits(&self) -> u32 {
        self.spec.minimum_integer_digits()
    }

    pub fn set_minimum_integer_digits(&mut self, value: u32) {
        self.spec.set_minimum_integer_digits(value);
        self.touch();
    }

    pub fn maximum_integer_digits(&self) -> u32 {
        self.spec.maximum_integer_digits()
    }

    pub fn set_maximum_integer_digits(&mut self, value: u32) {
        self.spec.set_maximum_integer_digits(value);
        self.touch();
    }

    pub fn minimum_fraction_digits(&self) -> u32 {
        self.spec.minimum_fraction_digits()
    }

    pub fn set_minimum_fraction_digits(&mut self, value: u32) {
        self.spec.set_minimum_fraction_digits(value);
        self.touch();
    }

    pub fn maximum_fraction_digits(&self) -> u32 {
        self.spec.maximum_fraction_digits()
    }

    pub fn set_maximum_fraction_digits(&mut self, value: u32) {
        self.spec.set_maximum_fraction_digits(value);
        self.touch();
    }

    pub fn minimum_significant_digits(&self) -> u32 {
        self.spec.minimum_significant_digits()
    }

    pub fn set_minimum_significant_digits(&mut self, value: u32) {
        self.spec.set_minimum_significant_digits(value);
        self.touch();
    }

    pub fn maximum_significant_digits(&self) -> u32 {
        self.spec.maximum_significant_digits()
    }

    pub fn set_maximum_significant_digits(&mut self, value: u32) {
        self.spec.set_maximum_significant_digits(value);
        self.touch();
    }

    pub fn significant_digits_used(&self) -> bool {
        self.spec.significant_digits_used()
    }

    pub fn set_significant_digits_used(&mut self, used: bool) {
        self.spec.set_significant_digits_used(used);
        self.touch();
    }

    pub fn grouping_size(&self) -> u8 {
        self.spec.grouping_size()
    }

    pub fn set_grouping_size(&mut self, size: u8) {
        self.spec.set_grouping_size(size);
        self.touch();
    }

    pub fn secondary_grouping_size(&self) -> u8 {
        self.spec.secondary_grouping_size()
    }

    pub fn set_secondary_grouping_size(&mut self, size: u8) {
        self.spec.set_secondary_grouping_size(size);
        self.touch();
    }

    pub fn grouping_used(&self) -> bool {
        self.spec.grouping_used()
    }

    pub fn set_grouping_used(&mut self, used: bool) {
        self.spec.set_grouping_used(used);
        self.touch();
    }

    pub fn multiplier(&self) -> i32 {
        self.spec.multiplier()
    }

    pub fn set_multiplier(&mut self, value: i32) -> Result<(), FormatError> {
        self.spec.set_multiplier(value)?;
        self.touch();
        Ok(())
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.spec.rounding_mode()
    }

    pub fn rounding_increment(&self) -> f64 {
        self.spec.rounding_increment()
    }

    /// Set the rounding mode together with the increment quantum; zero
    /// disables increment rounding.
    pub fn set_rounding(&mut self, mode: RoundingMode, increment: f64) -> Result<(), FormatError> {
        self.spec.set_rounding(mode, increment)?;
        self.touch();
        Ok(())
    }

    pub fn decimal_separator_always_shown(&self) -> bool {
        self.spec.decimal_separator_always_shown()
    }

    pub fn set_decimal_separator_always_shown(&mut self, shown: bool) {
        self.spec.set_decimal_separator_always_shown(shown);
        self.touch();
    }

    pub fn parse_integer_only(&self) -> bool {
        self.spec.parse_integer_only()
    }

    pub fn set_parse_integer_only(&mut self, only: bool) {
        self.spec.set_parse_integer_only(only);
        self.touch();
    }

    pub fn lenient_parse(&self) -> bool {
        self.spec.lenient_parse()
    }

    pub fn set_lenient_parse(&mut self, lenient: bool) {
        self.spec.set_lenient_parse(lenient);
        self.touch();
    }

    pub fn format_width(&self) -> usize {
        self.spec.format_width()
    }

    pub fn set_format_width(&mut self, width: usize) {
        self.spec.set_format_width(width);
        self.touch();
    }

    pub fn pad_character(&self) -> char {
        self.spec.pad_character()
    }

    pub fn set_pad_character(&mut self, pad: char) {
        self.spec.set_pad_character(pad);
        self.touch();
    }

    pub fn pad_position(&self) -> PadPosition {
        self.spec.pad_position()
    }

    pub fn set_pad_position(&mut self, position: PadPosition) {
        self.spec.set_pad_position(position);
        self.touch();
    }

    /// Explicit positive prefix; `None` when absent. While absent the
    /// pattern-derived prefix applies at format time.
    pub fn positive_prefix(&self) -> Option<&str> {
        self.spec.positive_prefix()
    }

    /// `Some` overrides the pattern-derived prefix; `None` reverts to it.
    pub fn set_positive_prefix(&mut self, value: Option<&str>) {
        self.spec.set_positive_prefix(value);
        self.touch();
    }

    pub fn positive_suffix(&self) -> Option<&str> {
        self.spec.positive_suffix()
    }

    pub fn set_positive_suffix(&mut self, value: Option<&str>) {
        self.spec.set_positive_suffix(value);
        self.touch();
    }

    pub fn negative_prefix(&self) -> Option<&str> {
        self.spec.negative_prefix()
    }

    pub fn set_negative_prefix(&mut self, value: Option<&str>) {
        self.spec.set_negative_prefix(value);
        self.touch();
    }

    pub fn negative_suffix(&self) -> Option<&str> {
        self.spec.negative_suffix()
    }

    pub fn set_negative_suffix(&mut self, value: Option<&str>) {
        self.spec.set_negative_suffix(value);
        self.touch();
    }
}
