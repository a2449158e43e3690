mod config;
mod output;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use config::Args;
use uptime_engine::Engine;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("ERROR");
            eprint!("{err}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing, stdout is reserved for results
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level())
        .init();

    match run(&args) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("ERROR");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Read the input, compute every station's uptime and render it.
///
/// Nothing is rendered unless the whole input is valid.
fn run(args: &Args) -> anyhow::Result<String> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file '{}'", args.input.display()))?;

    let engine = Engine::from_text(&text)
        .with_context(|| format!("Invalid input file '{}'", args.input.display()))?;
    tracing::info!(
        "Loaded {} stations and {} reports from {}",
        engine.input().stations().len(),
        engine.input().reports().len(),
        args.input.display()
    );

    let results = engine.compute()?;
    output::render(&results, args.format)
}
