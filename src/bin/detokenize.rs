//! # detokenize
//!
//! Command line front end for the detokenizer: reads tokenized lines
//! (with or without `@` attachment markers) and writes reconstructed
//! running text.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use utok::Detokenizer;

#[derive(Parser, Debug)]
#[command(version, about = "Universal detokenizer", long_about = None)]
struct Args {
    /// Input file (default: stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Data directory with the detok-resource files
    #[arg(short = 'd', long = "data_dir")]
    data_dir: Option<PathBuf>,

    /// ISO 639-3 language code (empty: universal rules only)
    #[arg(long = "lc", default_value = "")]
    lcode: String,

    /// Pass the first whitespace-delimited token of each line through
    #[arg(short = 'f', long = "first_token_is_line_id")]
    first_token_is_line_id: bool,

    /// Verbose: resource warnings on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let detokenizer = match Detokenizer::new(&args.lcode, args.data_dir.as_deref()) {
        Ok(d) => d.with_first_token_line_id(args.first_token_is_line_id),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.verbose {
        for warning in detokenizer.warnings() {
            eprintln!("Warning: {}", warning);
        }
    }

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(|e| {
            format!("cannot read input file {}: {}", path.display(), e)
        })?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            format!("cannot write output file {}: {}", path.display(), e)
        })?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    for line in input.lines() {
        let line = line?;
        writeln!(output, "{}", detokenizer.detokenize_string(&line))?;
    }
    output.flush()?;

    Ok(())
}
