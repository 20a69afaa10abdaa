//! Bounded sample selection for detection.

/// Default cap on how much of the input participates in detection.
pub const DEFAULT_SAMPLE_LIMIT: usize = 1_000_000;

/// How far past the limit we look for a line terminator.
const TERMINATOR_SEARCH_WINDOW: usize = 1_000;

/// Return a prefix of `buffer` of roughly `limit` bytes for detection.
///
/// When truncation occurs, the cut point is extended forward by up to
/// [`TERMINATOR_SEARCH_WINDOW`] bytes to the next line terminator (the
/// terminator itself is excluded), so statistics are never computed on a
/// line cut mid-way. If no terminator is found in the window, the cut falls
/// back to the nearest char boundary at or before `limit`.
pub fn bounded_sample(buffer: &str, limit: usize) -> &str {
    if buffer.len() <= limit {
        return buffer;
    }

    let bytes = buffer.as_bytes();
    let window_end = buffer.len().min(limit + TERMINATOR_SEARCH_WINDOW);
    for i in limit..window_end {
        if bytes[i] == b'\n' || bytes[i] == b'\r' {
            return &buffer[..i];
        }
    }

    let mut end = limit;
    while !buffer.is_char_boundary(end) {
        end -= 1;
    }
    &buffer[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_buffer_when_under_limit() {
        let data = "a,b,c\n1,2,3\n";
        assert_eq!(bounded_sample(data, 1_000_000), data);
        assert_eq!(bounded_sample(data, data.len()), data);
    }

    #[test]
    fn test_extends_to_line_terminator() {
        let data = "aaaa,bbbb\ncccc,dddd\neeee,ffff\n";
        // Limit falls inside the second line; the cut lands on its
        // terminator.
        let sample = bounded_sample(data, 12);
        assert_eq!(sample, "aaaa,bbbb\ncccc,dddd");
    }

    #[test]
    fn test_terminator_excluded() {
        let data = "ab\ncd\nef";
        let sample = bounded_sample(data, 4);
        assert!(!sample.ends_with('\n'));
        assert_eq!(sample, "ab\ncd");
    }

    #[test]
    fn test_hard_cut_without_terminator() {
        let data = "x".repeat(5_000);
        let sample = bounded_sample(&data, 2_000);
        // No terminator within the window: cut at the limit.
        assert_eq!(sample.len(), 2_000);
    }

    #[test]
    fn test_hard_cut_respects_char_boundary() {
        let data = "é".repeat(1_500); // 2 bytes per char
        let sample = bounded_sample(&data, 2_001);
        assert_eq!(sample.len(), 2_000);
        assert!(sample.chars().all(|c| c == 'é'));
    }
}
