use std::fmt::Write as _;

use uptime_core::StationResult;

use crate::config::OutputFormat;

/// Render the results for stdout, one trailing newline included.
pub fn render(results: &[StationResult], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for result in results {
                writeln!(out, "{} {}", result.station_id, result.uptime)?;
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(results)?;
            out.push('\n');
            Ok(out)
        }
    }
}
