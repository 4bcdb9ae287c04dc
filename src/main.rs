//! CLI tool reporting brace-nesting problems in a source file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bracecheck",
    version,
    about = "Report extra, mismatched, and unclosed braces in a source file"
)]
struct Cli {
    /// File to scan.
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    bracecheck::logging::init_tracing();

    match bracecheck::check_file(&cli.file) {
        Ok(diagnostics) => {
            for diagnostic in &diagnostics {
                println!("{diagnostic}");
            }
            // Findings are reported, not treated as failure.
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
