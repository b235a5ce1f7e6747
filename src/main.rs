//! Mini-PL - command-line runner
//!
//! Scans, parses and executes a Mini-PL program. `read` takes lines from
//! standard input and `print` writes to standard output; diagnostics go to
//! standard error.

use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use minipl::diagnostic::Diagnostic;
use minipl::lexer::tokenize;
use minipl::pipeline::{self, RunError};

/// Mini-PL - interpreter for the Mini-PL teaching language
#[derive(Parser, Debug)]
#[command(name = "minipl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Mini-PL source file (.mpl)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Only run the lexer and print tokens (for debugging)
    #[arg(long)]
    tokens: bool,

    /// Parse and print the syntax tree without executing it
    #[arg(long)]
    ast: bool,

    /// Parse only and report syntax errors
    #[arg(long)]
    check: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Program output goes to stdout, so stay quiet unless asked
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let path = resolve_path(&args.input);

    let source = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", path.display(), e);
            return ExitCode::from(1);
        }
    };
    let lines: Vec<&str> = source.lines().collect();

    if args.verbose {
        eprintln!("Running: {}", path.display());
        eprintln!("Source: {} lines", lines.len());
    }

    if args.tokens {
        println!("Tokens for {}:", path.display());
        println!("{:-<60}", "");

        for token in tokenize(&lines) {
            println!(
                "{:4}:{:<4} {:20} {:?}",
                token.line,
                token.column,
                format!("{:?}", token.kind),
                token.text
            );
        }
        return ExitCode::SUCCESS;
    }

    if args.ast || args.check {
        return match pipeline::check(&lines) {
            Ok(program) => {
                if args.ast {
                    println!("{program:#?}");
                }
                if args.verbose {
                    eprintln!("Parser: OK ({} statements)", program.len());
                }
                ExitCode::SUCCESS
            }
            Err(diagnostics) => {
                report(&diagnostics);
                ExitCode::from(1)
            }
        };
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match pipeline::run(&lines, stdin.lock(), stdout.lock()) {
        Ok(()) => {
            if args.verbose {
                eprintln!("\nFinished without errors");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            // Keep diagnostics off the end of the program's last output line
            eprintln!();
            report(error.diagnostics());
            match &error {
                RunError::AssertionFailed(_) => ExitCode::from(2),
                _ => {
                    eprintln!("{error}");
                    ExitCode::from(1)
                }
            }
        }
    }
}

/// Appends the `.mpl` extension to a missing path that has none.
fn resolve_path(input: &Path) -> PathBuf {
    if input.extension().is_none() && !input.exists() {
        input.with_extension("mpl")
    } else {
        input.to_path_buf()
    }
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}\n");
    }
}
