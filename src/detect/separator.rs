//! Delimiter detection by per-character occurrence variance.
//!
//! A column delimiter appears the same number of times on nearly every
//! record (once per field boundary), so of all characters in the sample it
//! has the lowest occurrence variance across logical lines. All statistics
//! use ×100 scaled integer arithmetic with truncating division, so detection
//! results are bit-for-bit comparable across platforms.

use super::chunk::bounded_sample;
use super::lines::split_sample_lines;
use crate::parser::DEFAULT_QUOTE;

/// Statistics window: ASCII codes 0..=126.
const STAT_WINDOW: usize = 127;

/// Scale factor for integer mean/variance arithmetic.
const SCALE: i64 = 100;

/// Variance assigned to characters that cannot be a delimiter (absent, or
/// mean below one occurrence per line). Sorts last.
const VARIANCE_SENTINEL: i64 = 100_000_000;

/// Per-line (or aggregate) occurrence counts for ASCII codes 0..=126.
#[derive(Debug, Clone, Copy)]
struct CharCounts {
    counts: [i64; STAT_WINDOW],
}

impl CharCounts {
    const fn zeroed() -> Self {
        Self {
            counts: [0; STAT_WINDOW],
        }
    }

    /// Count the characters of one line, also feeding the aggregate table.
    /// Bytes outside the statistics window are skipped.
    fn tally(&mut self, line: &str, total: &mut CharCounts) {
        for &b in line.as_bytes() {
            let idx = b as usize;
            if idx >= STAT_WINDOW {
                continue;
            }
            self.counts[idx] += 1;
            total.counts[idx] += 1;
        }
    }
}

/// Variance ranking entry for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarianceScore {
    /// Scaled variance of per-line occurrence counts (lower is better).
    pub variance: i64,
    /// Scaled mean occurrences per line (`100 × total / lines`).
    pub mean: i64,
    /// The character.
    pub ch: u8,
}

impl VarianceScore {
    /// Whether this character qualifies as a delimiter candidate at all.
    pub const fn qualifies(&self) -> bool {
        self.variance < VARIANCE_SENTINEL
    }
}

/// Rank every character in the statistics window by ascending occurrence
/// variance over `lines`.
fn rank_by_variance(lines: &[String]) -> Vec<VarianceScore> {
    let line_count = lines.len() as i64;
    let mut total = CharCounts::zeroed();
    let mut per_line = Vec::with_capacity(lines.len());
    for line in lines {
        let mut counts = CharCounts::zeroed();
        counts.tally(line, &mut total);
        per_line.push(counts);
    }

    let mut mean = [0i64; STAT_WINDOW];
    if line_count > 0 {
        for i in 0..STAT_WINDOW {
            mean[i] = SCALE * total.counts[i] / line_count;
        }
    }

    let mut variance = [0i64; STAT_WINDOW];
    for counts in &per_line {
        for i in 0..STAT_WINDOW {
            let dev = SCALE * counts.counts[i] - mean[i];
            variance[i] += dev * dev;
        }
    }
    for i in 0..STAT_WINDOW {
        if total.counts[i] == 0 {
            variance[i] = VARIANCE_SENTINEL;
        } else if line_count > 0 {
            variance[i] /= line_count;
        }
    }

    let mut scores: Vec<VarianceScore> = (0..STAT_WINDOW)
        .map(|i| VarianceScore {
            // A mean below one occurrence per line disqualifies the
            // character outright.
            variance: if mean[i] < SCALE {
                VARIANCE_SENTINEL
            } else {
                variance[i]
            },
            mean: mean[i],
            ch: i as u8,
        })
        .collect();

    scores.sort_by_key(|s| s.variance);
    scores
}

/// Guess the field delimiter from a text sample.
///
/// Ranks every ASCII code 0..=126 by occurrence variance over the sample's
/// logical lines, filters the ranking down to `candidates` (rank order
/// preserved), and returns the best-ranked candidate. Returns `None` when no
/// candidate qualifies, leaving the fallback choice to the caller.
///
/// `quote` is the (possibly already detected) quote character used by the
/// logical line splitter; `None` falls back to the double quote.
pub fn detect_separator(
    sample: &str,
    candidates: &[u8],
    quote: Option<u8>,
    sample_limit: usize,
) -> Option<u8> {
    let sample = bounded_sample(sample, sample_limit);
    let quote = quote.unwrap_or(DEFAULT_QUOTE);

    let lines = split_sample_lines(sample, candidates, quote);
    if lines.is_empty() {
        return None;
    }

    let ranked = rank_by_variance(&lines);
    ranked
        .iter()
        .find(|score| candidates.contains(&score.ch))
        .filter(|score| score.qualifies())
        .map(|score| score.ch)
}
