//! # utokenize
//!
//! Command line front end for the tokenizer: reads lines from a file or
//! stdin, writes the surface token stream, and optionally writes chart
//! annotations. Resource problems abort before any line is processed; a
//! failure on a single line emits that line verbatim with a warning so a
//! batch is never lost to one bad input.

use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use utok::emit;
use utok::{AnnotationFormat, Tokenizer, TokenizerOptions, Warning};

#[derive(Parser, Debug)]
#[command(version, about = "Universal multilingual tokenizer", long_about = None)]
struct Args {
    /// Input file (default: stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output file for the surface token stream (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Annotation output file
    #[arg(short = 'a', long = "annotation")]
    annotation: Option<PathBuf>,

    /// Annotation format
    #[arg(long = "annotation_format", default_value = "json")]
    annotation_format: String,

    /// Data directory with the tok-resource files
    #[arg(short = 'd', long = "data_dir")]
    data_dir: Option<PathBuf>,

    /// ISO 639-3 language code (empty: universal rules only)
    #[arg(long = "lc", default_value = "")]
    lcode: String,

    /// Treat the first whitespace-delimited token of each line as a line id
    #[arg(short = 'f', long = "first_token_is_line_id")]
    first_token_is_line_id: bool,

    /// Suppress @ attachment markers in the surface output
    #[arg(long = "simple")]
    simple: bool,

    /// Write chart annotations to the main output instead of surface text
    #[arg(short = 'c', long = "chart")]
    chart: bool,

    /// Verbose: resource warnings and throughput on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let format = match args.annotation_format.parse::<AnnotationFormat>() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let options = TokenizerOptions {
        first_token_is_line_id: args.first_token_is_line_id,
        simple: args.simple,
        annotation_format: format,
        chart: args.chart,
        verbose: args.verbose,
    };

    let tokenizer = match Tokenizer::new(&args.lcode, args.data_dir.as_deref(), options) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.verbose {
        for warning in tokenizer.warnings() {
            warn(warning);
        }
    }

    // An unwritable annotation path must fail before processing begins.
    let mut annotation_out = match &args.annotation {
        Some(path) => match File::create(path) {
            Ok(f) => Some(BufWriter::new(f)),
            Err(e) => {
                eprintln!("Error: cannot write annotation file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(|e| {
            format!("cannot read input file {}: {}", path.display(), e)
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path).map_err(|e| {
            format!("cannot write output file {}: {}", path.display(), e)
        })?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let started = Instant::now();
    let mut line_count = 0usize;
    let mut char_count = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        line_count += 1;
        char_count += line.chars().count();

        let chart = tokenizer.tokenize_with_chart(&line);
        if let Err(e) = chart.finalize() {
            // One bad line must not kill the batch.
            warn(&Warning::new(format!("line {}: {}; emitted verbatim", line_no, e)));
            writeln!(output, "{}", line)?;
            continue;
        }

        if args.chart {
            write!(output, "{}", emit::annotations(&chart, line_no, format))?;
        } else {
            writeln!(output, "{}", emit::surface(&chart, args.simple))?;
        }
        if let Some(ann) = annotation_out.as_mut() {
            write!(ann, "{}", emit::annotations(&chart, line_no, format))?;
        }
    }

    output.flush()?;
    if let Some(mut ann) = annotation_out {
        ann.flush()?;
    }

    if args.verbose {
        let elapsed = started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            char_count as f64 / elapsed
        } else {
            0.0
        };
        eprintln!(
            "{} lines, {} chars in {:.3}s ({:.0} chars/s)",
            line_count, char_count, elapsed, rate
        );
    }

    Ok(())
}

/// Render a warning on stderr, colored when stderr is a terminal.
fn warn(warning: &Warning) {
    use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

    let choice = if atty::is(atty::Stream::Stderr) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
    let _ = write!(stderr, "Warning: ");
    let _ = stderr.reset();
    let _ = writeln!(stderr, "{}", warning);
}
