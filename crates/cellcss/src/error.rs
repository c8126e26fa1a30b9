//! Error types for stylesheet parsing.
//!
//! Parsing entry points that callers invoke directly (a whole stylesheet, a
//! colour string, a media condition) return these errors. The lenient paths
//! used while rendering (inline `style` attributes, presentational
//! attributes) never surface them; bad declarations are dropped instead.

use thiserror::Error;

/// Errors that can occur while parsing style sheets and values.
///
/// # Examples
///
/// ```rust
/// use cellcss::parser::parse_stylesheet;
///
/// // An unterminated block is a syntax error
/// let result = parse_stylesheet("p { color: red;");
/// assert!(result.is_err());
/// ```
#[derive(Error, Debug)]
pub enum CssError {
    /// Invalid CSS syntax was encountered during parsing.
    #[error("CSS syntax error: {0}")]
    InvalidSyntax(String),

    /// A value could not be interpreted for the given property.
    #[error("invalid value for `{property}`: {value}")]
    InvalidValue { property: String, value: String },

    /// An I/O error occurred while reading a stylesheet file.
    #[error("I/O error reading stylesheet")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CssError>;
