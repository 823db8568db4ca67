//! # Unknown-Path Formatting
//!
//! A path is built incrementally while the walker descends the document:
//! mapping access appends `.<key>`, sequence access appends `[<index>]`.
//! The root prefix is empty, so every top-level key starts with a `.`
//! separator that is stripped when the path is reported.
//!
//! Keys are appended verbatim. A key that itself contains `.` or `[` is not
//! escaped, which matches how the paths read in configuration errors.

use std::fmt;

/// A reported unknown path such as `size.xs` or `triggers[1].repoz`.
pub type UnknownPath = String;

const FIELD_SEPARATOR: char = '.';

/// The path of the document node currently being walked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathPrefix(String);

impl PathPrefix {
    /// The empty prefix of the document root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Prefix for the value under mapping key `key`.
    pub fn field(&self, key: &str) -> Self {
        let mut path = String::with_capacity(self.0.len() + key.len() + 1);
        path.push_str(&self.0);
        path.push(FIELD_SEPARATOR);
        path.push_str(key);
        Self(path)
    }

    /// Prefix for the element at `index` of a sequence.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Returns true for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw prefix, including any leading separator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path as reported to callers: the leading `.` separator removed.
    pub fn to_reported(&self) -> UnknownPath {
        self.0
            .strip_prefix(FIELD_SEPARATOR)
            .unwrap_or(&self.0)
            .to_string()
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
