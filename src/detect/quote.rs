//! Quote-character detection by adjacency scoring.

use super::chunk::bounded_sample;

/// Guess the quote character from a text sample.
///
/// Scans the sample sequentially and scores each candidate quote by how
/// often it sits next to a candidate separator or a line boundary: a quote
/// immediately after a separator, or a separator/line terminator immediately
/// after a quote, both count. Not the most reliable signal, but cheap, and
/// wrong guesses only cost detection accuracy, never data.
///
/// Returns the highest-scoring candidate (earliest in `quotes` on a tie), or
/// `None` if no candidate ever scored.
pub fn detect_quote(
    sample: &str,
    separators: &[u8],
    quotes: &[u8],
    sample_limit: usize,
) -> Option<u8> {
    let sample = bounded_sample(sample, sample_limit);

    let mut scores = vec![0usize; quotes.len()];
    let mut prev_sep = false;
    let mut prev_quote: Option<usize> = None;

    for &b in sample.as_bytes() {
        let quote_idx = quotes.iter().position(|&q| q == b);

        if separators.contains(&b) {
            if let Some(prev) = prev_quote {
                scores[prev] += 1;
            }
            prev_sep = true;
            prev_quote = quote_idx;
        } else {
            if let Some(idx) = quote_idx {
                if prev_sep {
                    scores[idx] += 1;
                }
            } else if let Some(prev) = prev_quote {
                if b == b'\n' || b == b'\r' {
                    scores[prev] += 1;
                }
            }
            prev_sep = false;
            prev_quote = quote_idx;
        }
    }

    let mut best: Option<usize> = None;
    let mut best_score = 0usize;
    for (idx, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best = Some(idx);
        }
    }

    best.map(|idx| quotes[idx])
}
