//! Error codes for all grammar-build diagnostics.
//!
//! Each code is a unique identifier (e.g. `E2003`) with the first digit
//! indicating the build phase that raised it. Codes are stable across
//! releases so callers can match on them.

use std::fmt;

/// Error codes for all grammar-build diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: rule construction (combinator misuse)
/// - E1xxx: normalization
/// - E2xxx: names and namespace
/// - E3xxx: document structure
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Rule construction (E0xxx)
    /// Combinator called with the wrong number of rule arguments
    E0001,
    /// Missing precedence value
    E0002,
    /// Invalid alias target
    E0003,

    // Normalization (E1xxx)
    /// Value is not a recognizable rule
    E1001,
    /// Undefined symbol
    E1002,

    // Names and namespace (E2xxx)
    /// Name does not match the identifier grammar
    E2001,
    /// Name declared more than once
    E2002,
    /// Referenced name not in the namespace
    E2003,
    /// Alias used as a supertype
    E2004,
    /// External rule's symbol name differs from its declaring key
    E2005,

    // Document structure (E3xxx)
    /// Section content has the wrong shape
    E3001,
    /// Grammar has no rules
    E3002,
    /// Conflict set with fewer than two members
    E3003,
}

impl ErrorCode {
    /// The code as its stable string form.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
