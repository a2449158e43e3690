use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::Level;

/// Command line arguments for the station-uptime tool
#[derive(Parser, Debug)]
#[command(name = "station-uptime", version)]
#[command(about = "Compute the uptime percentage of every charging station")]
pub struct Args {
    /// Path to the input file with stations, chargers and availability reports
    pub input: PathBuf,

    /// Output format of the results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `<station id> <uptime>` line per station
    #[default]
    Text,
    /// JSON array of `{"stationId", "uptime"}` objects
    Json,
}
