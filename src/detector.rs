//! Dialect detection entry points.
//!
//! [`Detector`] bundles the separator and quote detectors behind one
//! builder, handles file/reader input through the encoding front door, and
//! yields a [`Dialect`] ready to configure a [`CsvParser`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::detect::{
    DEFAULT_QUOTES, DEFAULT_SAMPLE_LIMIT, DEFAULT_SEPARATORS, detect_quote, detect_separator,
};
use crate::encoding::decode_lossy;
use crate::error::{Result, ScoutError};
use crate::parser::{CsvParser, DEFAULT_DELIMITER, DEFAULT_QUOTE};

/// A detected (or partially detected) CSV dialect.
///
/// `None` means the corresponding detector found no confident candidate;
/// the `*_or_default` accessors apply the conventional fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dialect {
    /// Detected field delimiter, if any.
    pub delimiter: Option<u8>,
    /// Detected quote character, if any.
    pub quote: Option<u8>,
}

impl Dialect {
    /// The detected delimiter, or comma.
    pub fn delimiter_or_default(&self) -> u8 {
        self.delimiter.unwrap_or(DEFAULT_DELIMITER)
    }

    /// The detected quote character, or double quote.
    pub fn quote_or_default(&self) -> u8 {
        self.quote.unwrap_or(DEFAULT_QUOTE)
    }

    /// A strict parser configured with this dialect (defaults applied).
    pub fn parser(&self) -> CsvParser {
        let mut parser = CsvParser::new();
        parser
            .delimiter(self.delimiter_or_default())
            .quote(self.quote_or_default());
        parser
    }
}

/// CSV dialect detector.
///
/// # Example
///
/// ```
/// use csv_scout::Detector;
///
/// let detector = Detector::new();
/// let dialect = detector.detect("a;b;c\n1;2;3\n4;5;6\n");
///
/// assert_eq!(dialect.delimiter, Some(b';'));
/// let result = dialect.parser().parse("a;b;c\n1;2;3\n");
/// assert_eq!(result.rows.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Detector {
    separators: Vec<u8>,
    quotes: Vec<u8>,
    sample_limit: usize,
    forced_delimiter: Option<u8>,
    forced_quote: Option<u8>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    /// Create a detector with the default candidate sets and sample limit.
    pub fn new() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.to_vec(),
            quotes: DEFAULT_QUOTES.to_vec(),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            forced_delimiter: None,
            forced_quote: None,
        }
    }

    /// Set the delimiter candidate set.
    pub fn separators(&mut self, separators: &[u8]) -> &mut Self {
        self.separators = separators.to_vec();
        self
    }

    /// Set the quote-character candidate set.
    pub fn quotes(&mut self, quotes: &[u8]) -> &mut Self {
        self.quotes = quotes.to_vec();
        self
    }

    /// Cap how many bytes of the input participate in detection.
    pub fn sample_limit(&mut self, sample_limit: usize) -> &mut Self {
        self.sample_limit = sample_limit;
        self
    }

    /// Force a specific delimiter (skip delimiter detection).
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.forced_delimiter = Some(delimiter);
        self
    }

    /// Force a specific quote character (skip quote detection).
    pub fn quote(&mut self, quote: u8) -> &mut Self {
        self.forced_quote = Some(quote);
        self
    }

    /// Detect the dialect of decoded text.
    ///
    /// The quote character is detected first and feeds the separator
    /// detector's logical line splitter.
    pub fn detect(&self, content: &str) -> Dialect {
        let quote = self
            .forced_quote
            .or_else(|| detect_quote(content, &self.separators, &self.quotes, self.sample_limit));

        let delimiter = self.forced_delimiter.or_else(|| {
            detect_separator(content, &self.separators, quote, self.sample_limit)
        });

        Dialect { delimiter, quote }
    }

    /// Detect the dialect of a file at the given path.
    pub fn detect_path<P: AsRef<Path>>(&self, path: P) -> Result<Dialect> {
        let file = File::open(path.as_ref())?;
        self.detect_reader(file)
    }

    /// Detect the dialect of CSV data from a reader.
    ///
    /// Reads at most the configured sample limit (plus the line-boundary
    /// slack the chunk selector may use) and decodes it before detection.
    pub fn detect_reader<R: Read>(&self, reader: R) -> Result<Dialect> {
        let mut data = Vec::new();
        reader
            .take(self.sample_limit as u64 + 1_000)
            .read_to_end(&mut data)?;

        if data.is_empty() {
            return Err(ScoutError::EmptyData);
        }

        let (text, _) = decode_lossy(&data);
        Ok(self.detect(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_semicolon_dialect() {
        let dialect = Detector::new().detect("\"a\";\"b\"\n\"1\";\"2\"\n\"3\";\"4\"\n");
        assert_eq!(dialect.delimiter, Some(b';'));
        assert_eq!(dialect.quote, Some(b'"'));
    }

    #[test]
    fn test_undetected_falls_back_to_defaults() {
        let dialect = Detector::new().detect("plain\ntext\n");
        assert_eq!(dialect.delimiter, None);
        assert_eq!(dialect.quote, None);
        assert_eq!(dialect.delimiter_or_default(), b',');
        assert_eq!(dialect.quote_or_default(), b'"');
    }

    #[test]
    fn test_forced_values_win() {
        let mut detector = Detector::new();
        detector.delimiter(b'|').quote(b'\'');

        let dialect = detector.detect("a;b;c\n1;2;3\n");
        assert_eq!(dialect.delimiter, Some(b'|'));
        assert_eq!(dialect.quote, Some(b'\''));
    }

    #[test]
    fn test_detected_quote_feeds_separator_detection() {
        // Single-quoted multi-line values would split records mid-way
        // unless the detected quote reaches the line splitter.
        let data = "1;'a\nb';x\n2;'c\nd';y\n3;'e\nf';z\n";
        let dialect = Detector::new().detect(data);
        assert_eq!(dialect.quote, Some(b'\''));
        assert_eq!(dialect.delimiter, Some(b';'));
    }

    #[test]
    fn test_detect_reader_empty() {
        let result = Detector::new().detect_reader(std::io::Cursor::new(Vec::new()));
        assert!(matches!(result, Err(ScoutError::EmptyData)));
    }

    #[test]
    fn test_dialect_parser_roundtrip() {
        let data = "a|b\n1|2\n3|4\n";
        let dialect = Detector::new().detect(data);
        let result = dialect.parser().parse(data);
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[0], vec!["a", "b"]);
        assert!(result.errors.is_empty());
    }
}
