//! The per-build error accumulator.
//!
//! In the accumulate-and-degrade posture every validator reports into one
//! shared [`ErrorLog`] and substitutes a documented fallback instead of
//! aborting. The log preserves report order; callers inspect it as a batch
//! once the build returns and decide whether a non-empty log is a failure.

use std::fmt;

use crate::{Diagnostic, Severity};

/// Ordered collection of diagnostics from one grammar build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorLog {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl ErrorLog {
    /// Create an empty log.
    pub fn new() -> Self {
        ErrorLog::default()
    }

    /// Append a diagnostic, preserving report order.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of diagnostics with [`Severity::Error`].
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether any error-severity diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Total number of diagnostics, warnings included.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Iterate only error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Consume the log, yielding the diagnostics in report order.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} errors:", self.error_count)?;
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ErrorLog {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}
