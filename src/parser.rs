//! Diagnostic CSV tokenizer/parser.
//!
//! Parsing never fails: every malformed construct is recorded as a
//! [`ParseError`] in the result and the parser recovers, so the worst case is
//! a result with many errors but still as much structured data as could be
//! salvaged.

use std::fmt;
use std::mem;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';
/// Default quote character.
pub const DEFAULT_QUOTE: u8 = b'"';

/// Kind of a recoverable parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Quoting was opened but never properly closed before end of input.
    UnclosedQuote,
    /// Non-whitespace content between a closing quote and the next
    /// delimiter or line end.
    InvalidCharAfterQuote,
    /// A row's field count differs from the first row's (strict mode only).
    InconsistentColumns,
    /// A quote character appeared where the field already has content.
    InvalidQuoteUsage,
}

impl ParseErrorKind {
    /// Display name of this error kind.
    pub const fn name(&self) -> &'static str {
        match self {
            ParseErrorKind::UnclosedQuote => "UnclosedQuote",
            ParseErrorKind::InvalidCharAfterQuote => "InvalidCharAfterQuote",
            ParseErrorKind::InconsistentColumns => "InconsistentColumns",
            ParseErrorKind::InvalidQuoteUsage => "InvalidQuoteUsage",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recoverable error recorded during parsing.
///
/// Line and column are 1-based and computed from the original buffer
/// position, independent of any later CR suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Human-readable description.
    pub message: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column within that line.
    pub column: usize,
}

impl fmt::Display for ParseError {
    /// Renders as `<line>:<column>: <KindName>: <message>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line, self.column, self.kind, self.message
        )
    }
}

/// Result of a single `parse` call: rows and the errors encountered, both in
/// input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Parsed rows; order is significant and preserved from the input.
    pub rows: Vec<Vec<String>>,
    /// Recoverable errors in the order encountered.
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if no rows were produced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if parsing recorded no errors.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenizer state. Explicit states rather than boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Default state, outside quotes.
    ScanningField,
    /// Between an opening quote and its closing quote.
    InsideQuotedField,
    /// Between a closing quote and the next delimiter/line end.
    AfterClosingQuote,
}

/// Configurable CSV parser.
///
/// Configuration is fixed for the lifetime of the instance and shared
/// read-only across `parse` calls; all per-call state lives on the call
/// stack, so one instance may serve concurrent calls.
///
/// # Example
///
/// ```
/// use csv_scout::CsvParser;
///
/// let mut parser = CsvParser::new();
/// parser.delimiter(b';').strict(false);
///
/// let result = parser.parse("a;b\nc;d\n");
/// assert_eq!(result.rows, vec![vec!["a", "b"], vec!["c", "d"]]);
/// assert!(result.errors.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
    quote: u8,
    strict: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvParser {
    /// Create a parser with the default configuration: comma delimiter,
    /// double-quote, strict mode on.
    pub const fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote: DEFAULT_QUOTE,
            strict: true,
        }
    }

    /// Set the field delimiter.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character.
    pub fn quote(&mut self, quote: u8) -> &mut Self {
        self.quote = quote;
        self
    }

    /// Enable or disable strict mode (flag rows whose field count differs
    /// from the first row's).
    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// Parse `content` into rows plus recoverable errors.
    ///
    /// All error kinds are non-fatal: offending rows are kept, never
    /// dropped, and parsing always runs to the end of the buffer.
    pub fn parse(&self, content: &str) -> ParseResult {
        let bytes = content.as_bytes();
        let mut run = Run::new(self.strict);

        while run.pos < bytes.len() {
            let c = bytes[run.pos];
            match run.state {
                State::InsideQuotedField => {
                    if c == self.quote {
                        if bytes.get(run.pos + 1) == Some(&self.quote) {
                            // Doubled quote: one literal quote character.
                            run.field.push(self.quote);
                            run.pos += 1;
                        } else {
                            run.state = State::AfterClosingQuote;
                            run.quote_end = run.pos;
                        }
                    } else {
                        // Delimiters and line terminators are literal here.
                        run.field.push(c);
                    }
                }
                State::AfterClosingQuote => match c {
                    c if c == self.delimiter => {
                        run.push_field();
                        run.last_was_delimiter = true;
                    }
                    b' ' | b'\t' => {}
                    b'\r' | b'\n' => {
                        run.end_row();
                        run.skip_terminator_run(bytes);
                    }
                    _ => {
                        run.add_error_at(
                            run.quote_end,
                            ParseErrorKind::InvalidCharAfterQuote,
                            "Invalid character after closing quote".to_string(),
                        );
                        // Recover by discarding everything up to the next
                        // delimiter or line end.
                        while run.pos + 1 < bytes.len()
                            && bytes[run.pos + 1] != self.delimiter
                            && bytes[run.pos + 1] != b'\r'
                            && bytes[run.pos + 1] != b'\n'
                        {
                            run.pos += 1;
                        }
                    }
                },
                State::ScanningField => {
                    if c == self.quote {
                        if run.field.iter().all(|&b| b == b' ' || b == b'\t') {
                            run.state = State::InsideQuotedField;
                            run.was_quoted = true;
                            run.field.clear();
                        } else {
                            run.add_error(
                                ParseErrorKind::InvalidQuoteUsage,
                                "Quote appears in middle of field".to_string(),
                            );
                            // Recover by treating it as an ordinary character.
                            run.field.push(c);
                        }
                        run.last_was_delimiter = false;
                    } else if c == self.delimiter {
                        run.push_field();
                        run.last_was_delimiter = true;
                    } else if c == b'\r' || c == b'\n' {
                        run.end_row();
                        run.skip_terminator_run(bytes);
                    } else {
                        run.field.push(c);
                        run.last_was_delimiter = false;
                    }
                }
            }
            run.pos += 1;
        }

        if !run.field.is_empty() || run.last_was_delimiter || run.was_quoted || !run.row.is_empty()
        {
            if run.state == State::InsideQuotedField {
                run.add_error(
                    ParseErrorKind::UnclosedQuote,
                    "Unclosed quotes at end of input".to_string(),
                );
            }
            run.end_row();
        }

        run.out
    }
}

/// Parse with the default configuration (comma, double-quote, strict).
pub fn parse(content: &str) -> ParseResult {
    CsvParser::new().parse(content)
}

/// Mutable state of a single `parse` call.
struct Run {
    strict: bool,
    out: ParseResult,
    row: Vec<String>,
    field: Vec<u8>,
    state: State,
    was_quoted: bool,
    last_was_delimiter: bool,
    /// Expected column count, fixed by the first finalized row.
    columns: usize,
    /// 1-based line counter.
    line: usize,
    /// Byte position in the full buffer.
    pos: usize,
    /// Byte position where the current line starts.
    line_start: usize,
    /// Position of the most recent closing quote.
    quote_end: usize,
}

impl Run {
    fn new(strict: bool) -> Self {
        Self {
            strict,
            out: ParseResult::default(),
            row: Vec::new(),
            field: Vec::new(),
            state: State::ScanningField,
            was_quoted: false,
            last_was_delimiter: false,
            columns: 0,
            line: 1,
            pos: 0,
            line_start: 0,
            quote_end: 0,
        }
    }

    fn add_error(&mut self, kind: ParseErrorKind, message: String) {
        self.add_error_at(self.pos, kind, message);
    }

    fn add_error_at(&mut self, pos: usize, kind: ParseErrorKind, message: String) {
        self.out.errors.push(ParseError {
            kind,
            message,
            line: self.line,
            column: pos - self.line_start + 1,
        });
    }

    /// Finalize the pending field and append it to the current row.
    /// Unquoted fields are trimmed of leading/trailing space and tab;
    /// quoted content is preserved exactly.
    fn push_field(&mut self) {
        let text = String::from_utf8_lossy(&self.field);
        let value = if self.was_quoted {
            text.into_owned()
        } else {
            text.trim_matches([' ', '\t']).to_string()
        };
        self.row.push(value);
        self.field.clear();
        self.state = State::ScanningField;
        self.was_quoted = false;
    }

    /// Finalize the current row at a line terminator or end of input.
    fn end_row(&mut self) {
        if self.state == State::InsideQuotedField {
            // Unclosed quote recovery: keep what was collected so far,
            // right-trimmed.
            while matches!(self.field.last(), Some(b' ' | b'\t')) {
                self.field.pop();
            }
        }

        // An empty trailing field still counts as a column when the previous
        // character was the delimiter or the field was quoted.
        if !self.field.is_empty() || self.last_was_delimiter || self.was_quoted {
            self.push_field();
        }

        if !self.row.is_empty() {
            let row = mem::take(&mut self.row);
            if self.columns == 0 {
                self.columns = row.len();
            } else if self.strict && row.len() != self.columns {
                self.add_error(
                    ParseErrorKind::InconsistentColumns,
                    format!(
                        "Columns count mismatch. Expected: {}, got: {}",
                        self.columns,
                        row.len()
                    ),
                );
            }
            self.out.rows.push(row);
        }

        self.field.clear();
        self.state = State::ScanningField;
        self.was_quoted = false;
        self.last_was_delimiter = false;
        self.line += 1;
        self.line_start = self.pos + 1;
    }

    /// Consume any immediately following run of `\r`/`\n` so that `\r\n`
    /// and bare `\n`/`\r` are equivalent and blank lines produce no rows.
    fn skip_terminator_run(&mut self, bytes: &[u8]) {
        while self.pos + 1 < bytes.len() && matches!(bytes[self.pos + 1], b'\r' | b'\n') {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(content: &str) -> Vec<Vec<String>> {
        parse(content).rows
    }

    #[test]
    fn test_empty_input() {
        let result = parse("");
        assert!(result.rows.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_simple_rows() {
        assert_eq!(
            rows("a,b,c\n1,2,3\n"),
            vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]
        );
    }

    #[test]
    fn test_unquoted_trimming() {
        assert_eq!(rows(" hello ,world"), vec![vec!["hello", "world"]]);
        assert_eq!(rows("\ta\t,\tb"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_quoted_content_preserved() {
        // Inner spaces kept; only whitespace after the closing quote is
        // skipped.
        assert_eq!(rows("\" hello \""), vec![vec![" hello "]]);
        assert_eq!(rows("\" a \" ,b"), vec![vec![" a ", "b"]]);
    }

    #[test]
    fn test_doubled_quote_escape() {
        assert_eq!(rows("\"a\"\"b\""), vec![vec!["a\"b"]]);
        assert_eq!(rows("\"\"\"\""), vec![vec!["\""]]);
    }

    #[test]
    fn test_embedded_delimiter_and_newline() {
        assert_eq!(rows("\"a,b\",c"), vec![vec!["a,b", "c"]]);
        assert_eq!(rows("\"a\nb\",c"), vec![vec!["a\nb", "c"]]);
    }

    #[test]
    fn test_crlf_equivalence() {
        assert_eq!(rows("a,b\r\nc,d\r\n"), rows("a,b\nc,d\n"));
        assert_eq!(rows("a,b\rc,d\r"), rows("a,b\nc,d\n"));
    }

    #[test]
    fn test_blank_lines_produce_no_rows() {
        assert_eq!(rows("a,b\n\n\nc,d\n"), vec![vec!["a", "b"], vec!["c", "d"]]);
        let result = parse("a,b\n\n\nc,d\n");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_trailing_delimiter_counts_as_column() {
        assert_eq!(rows("a,b,\n"), vec![vec!["a", "b", ""]]);
        // A row created purely from a trailing delimiter.
        assert_eq!(rows(","), vec![vec!["", ""]]);
    }

    #[test]
    fn test_quoted_empty_trailing_field() {
        assert_eq!(rows("a,\"\"\n"), vec![vec!["a", ""]]);
    }

    #[test]
    fn test_strict_mode_mismatch() {
        let result = parse("a,b\nc");
        assert_eq!(result.rows, vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::InconsistentColumns);
        assert_eq!(result.errors[0].line, 2);
    }

    #[test]
    fn test_non_strict_keeps_quiet() {
        let result = CsvParser::new().strict(false).parse("a,b\nc");
        assert_eq!(result.rows.len(), 2);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_width_fixed_by_first_row() {
        let result = parse("a\nb,c\nd,e\n");
        assert_eq!(result.rows.len(), 3);
        // Both later rows differ from the one-column first row.
        assert_eq!(result.errors.len(), 2);
        assert!(
            result
                .errors
                .iter()
                .all(|e| e.kind == ParseErrorKind::InconsistentColumns)
        );
    }

    #[test]
    fn test_unclosed_quote_recovery() {
        let result = parse("\"abc");
        assert_eq!(result.rows, vec![vec!["abc"]]);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::UnclosedQuote);
    }

    #[test]
    fn test_unclosed_quote_right_trims_collected_content() {
        let result = parse("\"abc  ");
        assert_eq!(result.rows, vec![vec!["abc"]]);
        assert_eq!(result.errors[0].kind, ParseErrorKind::UnclosedQuote);
    }

    #[test]
    fn test_invalid_char_after_quote() {
        let result = parse("\"a\"x,b\n");
        // The offending run is discarded, not appended to the field.
        assert_eq!(result.rows, vec![vec!["a", "b"]]);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::InvalidCharAfterQuote);
    }

    #[test]
    fn test_whitespace_after_quote_is_tolerated() {
        let result = parse("\"a\"  ,b\n");
        assert_eq!(result.rows, vec![vec!["a", "b"]]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_invalid_quote_usage() {
        let result = parse("ab\"c,d\n");
        // The quote is kept as a literal character.
        assert_eq!(result.rows, vec![vec!["ab\"c", "d"]]);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ParseErrorKind::InvalidQuoteUsage);
    }

    #[test]
    fn test_quote_after_leading_whitespace_opens_field() {
        // Space/tab before the opening quote does not count as content.
        assert_eq!(rows("a,  \"b\"\n"), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_custom_delimiter_and_quote() {
        let result = CsvParser::new().delimiter(b';').quote(b'\'').parse("'a;b';c\n");
        assert_eq!(result.rows, vec![vec!["a;b", "c"]]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_error_positions() {
        let result = parse("a,b\nab\"c,d\n");
        assert_eq!(result.errors.len(), 1);
        let err = &result.errors[0];
        assert_eq!(err.kind, ParseErrorKind::InvalidQuoteUsage);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_error_display_format() {
        let err = ParseError {
            kind: ParseErrorKind::UnclosedQuote,
            message: "Unclosed quotes at end of input".to_string(),
            line: 3,
            column: 7,
        };
        assert_eq!(
            err.to_string(),
            "3:7: UnclosedQuote: Unclosed quotes at end of input"
        );
    }

    #[test]
    fn test_non_ascii_passthrough() {
        assert_eq!(rows("日本,語\n"), vec![vec!["日本", "語"]]);
        assert_eq!(rows("\"ä,ö\",ü\n"), vec![vec!["ä,ö", "ü"]]);
    }

    #[test]
    fn test_rows_match_finalized_records() {
        // No off-by-one at end of input, with or without a trailing
        // terminator.
        assert_eq!(rows("a,b\nc,d").len(), 2);
        assert_eq!(rows("a,b\nc,d\n").len(), 2);
    }
}
