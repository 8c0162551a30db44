//! The value shapes a form field can hold.
//!
//! Every field carries exactly one of three shapes: text, number, or flag.
//! The untagged serde representation keeps configuration blobs and exported
//! documents natural (`"hello"`, `42`, `true`) rather than wrapping each
//! value in a variant object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single form field value.
///
/// Variant order matters for untagged deserialization: booleans and numbers
/// are tried before the catch-all string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A checkbox state.
    Flag(bool),
    /// A numeric input.
    Number(f64),
    /// Any text-shaped input (text, url, email, select, color, date).
    Text(String),
}

impl FieldValue {
    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag content, if this is a flag.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this value counts as empty for validation purposes.
    ///
    /// Only whitespace-only text is empty; a number or flag is always a
    /// deliberate value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Flag(_) => false,
        }
    }

    /// Renders the value as the string that lands in generated markup.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Flag(b) => b.to_string(),
        }
    }
}

/// Formats a number without a trailing `.0` for whole values.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}
