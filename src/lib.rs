//! Locale-aware decimal number formatting and parsing.
//!
//! A compact pattern language (`#,##0.00;(#,##0.00)`) compiled against a
//! symbol table drives both directions: rendering integers, doubles and
//! arbitrary-precision decimals to text with field-span annotations, and
//! recognizing text back into numbers with partial-parse semantics.

pub mod error;
pub mod formatter;
pub mod locale;
pub mod parse;
pub mod pattern;
pub mod spec;
pub mod types;

mod decimal;

pub use error::FormatError;
pub use formatter::DecimalFormatter;
pub use spec::FormatSpec;
pub use types::{
    AffixPart, DecimalSymbols, FieldCursor, FieldKind, FieldSpan, Formatted, PadPosition,
    ParseMode, ParseResult, ParsedNumber, RoundingMode,
};

#[cfg(test)]
mod tests;
