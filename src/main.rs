//! csv-scout CLI - CSV dialect detection and diagnostic parsing

use clap::Parser;
use csv_scout::{Detector, Dialect, ParseResult, ScoutError, decode_lossy};
use std::path::PathBuf;
use std::process::ExitCode;

/// Detect CSV dialect (delimiter, quote character) and parse with full
/// diagnostics.
///
/// Every recoverable parse error is reported with its line and column; the
/// offending rows are kept, never dropped.
#[derive(Parser, Debug)]
#[command(name = "csv-scout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file(s)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Force specific delimiter (single character)
    #[arg(short = 'd', long)]
    delimiter: Option<char>,

    /// Force specific quote character (single character)
    #[arg(short = 'q', long)]
    quote: Option<char>,

    /// Number of bytes to sample for detection (default: 1000000)
    #[arg(short = 'b', long)]
    sample_bytes: Option<usize>,

    /// Do not flag rows whose field count differs from the first row's
    #[arg(long)]
    no_strict: bool,

    /// Only detect the dialect, skip parsing
    #[arg(long)]
    detect_only: bool,

    /// Output format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Show every parse error instead of the first ten
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut exit_code = ExitCode::SUCCESS;

    for file in &args.files {
        if let Err(e) = scout_file(file, &args) {
            eprintln!("Error processing {}: {}", file.display(), e);
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

fn ascii_char(name: &str, c: char) -> Result<u8, ScoutError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(ScoutError::InvalidConfig(format!(
            "{name} must be an ASCII character, got {c:?}"
        )))
    }
}

fn scout_file(path: &PathBuf, args: &Args) -> Result<(), ScoutError> {
    let mut detector = Detector::new();

    if let Some(limit) = args.sample_bytes {
        detector.sample_limit(limit);
    }
    if let Some(delim) = args.delimiter {
        detector.delimiter(ascii_char("delimiter", delim)?);
    }
    if let Some(quote) = args.quote {
        detector.quote(ascii_char("quote", quote)?);
    }

    let data = std::fs::read(path)?;
    if data.is_empty() {
        return Err(ScoutError::EmptyData);
    }
    let (text, _) = decode_lossy(&data);

    let dialect = detector.detect(&text);

    let parsed = if args.detect_only {
        None
    } else {
        let mut parser = dialect.parser();
        parser.strict(!args.no_strict);
        Some(parser.parse(&text))
    };

    match args.format {
        OutputFormat::Text => print_text_output(path, &dialect, parsed.as_ref(), args.verbose),
        OutputFormat::Json => print_json_output(path, &dialect, parsed.as_ref()),
    }

    Ok(())
}

fn print_text_output(path: &PathBuf, dialect: &Dialect, parsed: Option<&ParseResult>, verbose: bool) {
    println!("File: {}", path.display());
    match dialect.delimiter {
        Some(d) => println!("  Delimiter: {:?} (detected)", d as char),
        None => println!(
            "  Delimiter: {:?} (default, none detected)",
            dialect.delimiter_or_default() as char
        ),
    }
    match dialect.quote {
        Some(q) => println!("  Quote: {:?} (detected)", q as char),
        None => println!(
            "  Quote: {:?} (default, none detected)",
            dialect.quote_or_default() as char
        ),
    }

    if let Some(result) = parsed {
        println!("  Rows: {}", result.rows.len());
        println!("  Errors: {}", result.errors.len());

        let shown = if verbose {
            result.errors.len()
        } else {
            result.errors.len().min(10)
        };
        for error in &result.errors[..shown] {
            println!("    {error}");
        }
        if shown < result.errors.len() {
            println!("    ... and {} more (use -v)", result.errors.len() - shown);
        }
    }

    println!();
}

fn print_json_output(path: &PathBuf, dialect: &Dialect, parsed: Option<&ParseResult>) {
    let delimiter = match dialect.delimiter {
        Some(d) => format!("{:?}", (d as char).to_string()),
        None => "null".to_string(),
    };
    let quote = match dialect.quote {
        Some(q) => format!("{:?}", (q as char).to_string()),
        None => "null".to_string(),
    };

    print!(
        r#"{{"file":{:?},"dialect":{{"delimiter":{},"quote":{}}}"#,
        path.display().to_string(),
        delimiter,
        quote
    );

    if let Some(result) = parsed {
        print!(r#","rows":{},"errors":["#, result.rows.len());
        for (i, error) in result.errors.iter().enumerate() {
            if i > 0 {
                print!(",");
            }
            print!(
                r#"{{"line":{},"column":{},"kind":{:?},"message":{:?}}}"#,
                error.line,
                error.column,
                error.kind.name(),
                error.message
            );
        }
        print!("]");
    }

    println!("}}");
}
