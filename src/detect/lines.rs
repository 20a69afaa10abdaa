//! Logical line splitting for detection.
//!
//! This is a lightweight heuristic, used only by the detectors: lines broken
//! by an embedded newline inside a quoted value are re-merged so statistics
//! run on record boundaries rather than raw line breaks. Possible wrong
//! merges only skew the sample slightly and are acceptable here; the parser
//! itself never uses this splitter.

/// Split `sample` into raw lines on `\n`, ignoring `\r` entirely.
fn split_raw_lines(sample: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(bytecount::count(sample.as_bytes(), b'\n') + 1);
    let mut buf = String::new();

    for ch in sample.chars() {
        match ch {
            '\r' => {}
            '\n' => {
                lines.push(std::mem::take(&mut buf));
            }
            _ => buf.push(ch),
        }
    }
    if !buf.is_empty() {
        lines.push(buf);
    }

    lines
}

/// Split `sample` into logical lines.
///
/// A raw line that contains no candidate separator, or that contains the
/// quote character before the first candidate separator, is treated as the
/// continuation of the previous logical line (re-joined with `\n`).
pub(crate) fn split_sample_lines(sample: &str, separators: &[u8], quote: u8) -> Vec<String> {
    let raw = split_raw_lines(sample);
    let mut merged: Vec<String> = Vec::with_capacity(raw.len());

    for line in raw {
        let sep_pos = line.bytes().position(|b| separators.contains(&b));
        let continuation = match sep_pos {
            None => true,
            Some(sep_pos) => match line.bytes().position(|b| b == quote) {
                // Quote before the first separator: the line starts inside a
                // multi-line quoted value.
                Some(quote_pos) => quote_pos < sep_pos,
                None => false,
            },
        };

        match merged.last_mut() {
            Some(prev) if continuation => {
                prev.push('\n');
                prev.push_str(&line);
            }
            _ => merged.push(line),
        }
    }

    merged
}
