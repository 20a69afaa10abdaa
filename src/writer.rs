//! Escape-on-write collaborator.
//!
//! The minimal write-side counterpart of the parser: a field is wrapped in
//! quotes with embedded quotes doubled whenever writing it bare would not
//! parse back to the same value. There is no corresponding scan-on-read
//! path here; reading always goes through [`crate::CsvParser`].

use std::borrow::Cow;

use crate::parser::{DEFAULT_DELIMITER, DEFAULT_QUOTE};

/// Escape a single field for writing.
///
/// The field is quoted when it contains the quote character, the delimiter,
/// or a line break, when it is empty, or when it has leading/trailing
/// space/tab (which the parser would otherwise trim). Embedded quote
/// characters are doubled. Fields needing no escaping are returned borrowed.
///
/// The output round-trips: parsing it back with the same delimiter and
/// quote yields the original value.
pub fn escape_field<'a>(field: &'a str, delimiter: u8, quote: u8) -> Cow<'a, str> {
    if !needs_quoting(field, delimiter, quote) {
        return Cow::Borrowed(field);
    }

    let quote = quote as char;
    let mut escaped = String::with_capacity(field.len() + 2);
    escaped.push(quote);
    for ch in field.chars() {
        if ch == quote {
            escaped.push(quote);
        }
        escaped.push(ch);
    }
    escaped.push(quote);
    Cow::Owned(escaped)
}

fn needs_quoting(field: &str, delimiter: u8, quote: u8) -> bool {
    if field.is_empty() {
        return true;
    }
    if field
        .bytes()
        .any(|b| b == quote || b == delimiter || b == b'\r' || b == b'\n')
    {
        return true;
    }
    let edges = [field.as_bytes()[0], field.as_bytes()[field.len() - 1]];
    edges.iter().any(|&b| b == b' ' || b == b'\t')
}

/// Serialize rows to CSV text.
///
/// Fields are escaped with [`escape_field`]; `terminator` is appended after
/// every written row. Rows with no fields are skipped.
pub fn write_records(
    rows: &[Vec<String>],
    delimiter: u8,
    quote: u8,
    terminator: &str,
) -> String {
    let mut out = String::with_capacity(rows.len() * 48);

    for row in rows {
        if row.is_empty() {
            continue;
        }
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                out.push(delimiter as char);
            }
            out.push_str(&escape_field(field, delimiter, quote));
        }
        out.push_str(terminator);
    }

    out
}

/// Serialize rows with the default dialect: comma, double-quote, `\n`.
pub fn write_records_default(rows: &[Vec<String>]) -> String {
    write_records(rows, DEFAULT_DELIMITER, DEFAULT_QUOTE, "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn escape(field: &str) -> String {
        escape_field(field, b',', b'"').into_owned()
    }

    #[test]
    fn test_plain_field_borrowed() {
        let field = "hello";
        assert!(matches!(
            escape_field(field, b',', b'"'),
            Cow::Borrowed("hello")
        ));
    }

    #[test]
    fn test_embedded_delimiter_quoted() {
        assert_eq!(escape("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_embedded_quote_doubled() {
        assert_eq!(escape("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_edge_whitespace_quoted() {
        assert_eq!(escape(" x"), "\" x\"");
        assert_eq!(escape("x\t"), "\"x\t\"");
    }

    #[test]
    fn test_empty_field_quoted() {
        assert_eq!(escape(""), "\"\"");
    }

    #[test]
    fn test_newline_quoted() {
        assert_eq!(escape("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn test_round_trip_single_field() {
        let values = [
            "plain",
            "with,comma",
            "with\"quote",
            "multi\nline",
            " leading space",
            "trailing tab\t",
            "",
            "a\"\"b",
            " mixed,\" of\nall ",
        ];
        for value in values {
            let written = escape_field(value, b',', b'"');
            let result = parse(&written);
            assert_eq!(result.rows, vec![vec![value.to_string()]], "{value:?}");
            assert!(result.errors.is_empty(), "{value:?}");
        }
    }

    #[test]
    fn test_write_records() {
        let rows = vec![
            vec!["a".to_string(), "b,c".to_string()],
            vec![],
            vec!["d".to_string(), "e".to_string()],
        ];
        assert_eq!(write_records_default(&rows), "a,\"b,c\"\nd,e\n");
    }

    #[test]
    fn test_round_trip_records() {
        let rows = vec![
            vec!["name".to_string(), "note".to_string()],
            vec!["x".to_string(), "line one\nline two".to_string()],
        ];
        let written = write_records_default(&rows);
        let result = parse(&written);
        assert_eq!(result.rows, rows);
        assert!(result.errors.is_empty());
    }
}
