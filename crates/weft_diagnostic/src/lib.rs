//! Diagnostic system for grammar-build error reporting.
//!
//! A grammar build either aborts on its first error (fail-fast posture) or
//! collects everything it finds and still returns a document (accumulate
//! posture). This crate provides the pieces both postures share:
//! - [`ErrorCode`] - stable, searchable codes for every failure class
//! - [`Diagnostic`] - one structured error record with a builder API
//! - [`ErrorLog`] - the ordered per-build accumulator
//!
//! The log is created fresh for each build call and never escapes it, so
//! independent builds on different threads cannot interfere.

mod diagnostic;
mod error_code;
mod log;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use log::ErrorLog;
