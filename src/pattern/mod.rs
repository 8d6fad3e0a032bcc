//! Pattern compilation module
//!
//! This module turns pattern strings like `#,##0.00;(#,##0.00)` into a
//! `FormatSpec` and serializes specs back to pattern text. The grammar is
//! interpreted either with the invariant ASCII characters or, for localized
//! patterns, with the characters of a symbol table.

mod grammar;
mod compile;
mod render;

pub use compile::compile;
pub use render::to_pattern;
