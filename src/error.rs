//! Error types shared across the crate
//!
//! Pattern compilation surfaces `PatternSyntax` with the offending fragment;
//! attribute validation surfaces `InvalidArgument`. A failed parse of input
//! text is not an error at all, see `ParseResult`.

use std::fmt;

/// Error type for pattern compilation and attribute validation
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The pattern string is malformed. Carries the offending fragment and
    /// the char offset at which compilation stopped.
    PatternSyntax {
        message: String,
        fragment: String,
        offset: usize,
    },
    /// An attribute value is out of range or a lookup came back empty
    InvalidArgument(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::PatternSyntax {
                message,
                fragment,
                offset,
            } => {
                write!(f, "syntax error: {} at offset {}: '{}'", message, offset, fragment)
            }
            FormatError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}
