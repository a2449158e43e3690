//! Runs the uptime pipeline over a whole input: parse, validate, group the
//! reports by station, then merge and compute each station's uptime.

use std::collections::HashMap;

use uptime_core::{
    Interval, Result, StationId, StationResult, ValidatedInput, assemble_results,
    merge_intervals, parse_records, uptime_percentage, validate,
};

/// Intervals reported by the chargers of one station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StationIntervals {
    /// Up and down reports, for the observed span.
    all: Vec<Interval>,
    up: Vec<Interval>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    input: ValidatedInput,
    intervals: HashMap<StationId, StationIntervals>,
}

impl Engine {
    pub fn new(input: ValidatedInput) -> Self {
        let intervals = input
            .reports_by_station()
            .into_iter()
            .map(|(station_id, reports)| {
                let station = StationIntervals {
                    all: reports.iter().map(|report| report.interval).collect(),
                    up: reports
                        .iter()
                        .filter(|report| report.up)
                        .map(|report| report.interval)
                        .collect(),
                };
                (station_id, station)
            })
            .collect();

        Engine { input, intervals }
    }

    /// Parse and validate `text`, then index it.
    pub fn from_text(text: &str) -> Result<Self> {
        let raw = parse_records(text)?;
        let input = validate(&raw)?;
        Ok(Engine::new(input))
    }

    pub fn input(&self) -> &ValidatedInput {
        &self.input
    }

    /// Uptime of a single station. Stations without reports, including
    /// undeclared ones, are at 0%.
    pub fn station_uptime(&self, station_id: StationId) -> Result<u8> {
        let Some(station) = self.intervals.get(&station_id) else {
            tracing::debug!("Station {} has no reports", station_id);
            return Ok(0);
        };
        let merged = merge_intervals(station.up.iter().copied());
        uptime_percentage(station_id, &merged, &station.all)
    }

    /// Uptime of every declared station, ascending by station id.
    pub fn compute(&self) -> Result<Vec<StationResult>> {
        tracing::info!(
            "Computing uptime of {} stations from {} reports",
            self.input.stations().len(),
            self.input.reports().len()
        );
        assemble_results(self.input.stations(), |station_id| {
            self.station_uptime(station_id)
        })
    }
}

/// Full pipeline from input text to ordered station results.
pub fn compute_uptimes(text: &str) -> Result<Vec<StationResult>> {
    Engine::from_text(text)?.compute()
}
