//! Heuristic delimiter and quote-character detection.
//!
//! Detection operates on a bounded sample of the input (see [`bounded_sample`])
//! and uses character-frequency statistics only; it never runs the full
//! parser. Both detectors are pure functions: they never fail, returning
//! `None` when no confident candidate exists and leaving the fallback
//! decision (comma, double-quote) to the caller.

mod chunk;
mod lines;
mod quote;
mod separator;

pub use chunk::{DEFAULT_SAMPLE_LIMIT, bounded_sample};
pub use quote::detect_quote;
pub use separator::{VarianceScore, detect_separator};

/// Default delimiter candidates, most common first.
pub const DEFAULT_SEPARATORS: &[u8] = b"\t;,:|#";

/// Default quote-character candidates.
pub const DEFAULT_QUOTES: &[u8] = b"\"'`";
