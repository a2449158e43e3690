use crate::{Interval, Result, StationId, UptimeError};

/// Earliest start to latest end over all of a station's reports.
///
/// `None` when the station has no reports.
pub fn observed_span(intervals: &[Interval]) -> Option<Interval> {
    let start = intervals.iter().map(|interval| interval.start).min()?;
    let end = intervals.iter().map(|interval| interval.end).max()?;
    Some(Interval::new(start, end))
}

/// Total length of disjoint intervals.
///
/// The intervals must come from [`crate::merge_intervals`], otherwise
/// overlapping time is counted twice.
pub fn up_duration(merged: &[Interval]) -> u64 {
    merged.iter().map(Interval::len).sum()
}

/// Floored uptime percentage of one station.
///
/// `merged_up` are the station's merged up intervals and `all` every interval
/// the station reported, up or down. A station without reports is at 0%.
pub fn uptime_percentage(
    station_id: StationId,
    merged_up: &[Interval],
    all: &[Interval],
) -> Result<u8> {
    let Some(span) = observed_span(all).filter(|span| !span.is_empty()) else {
        return Ok(0);
    };

    let up = up_duration(merged_up);
    // 100 * u64::MAX does not fit in a u64
    let percentage = u128::from(up) * 100 / u128::from(span.len());
    tracing::debug!(
        "Station {} was up {} of {} ({}%)",
        station_id,
        up,
        span.len(),
        percentage
    );

    u8::try_from(percentage)
        .ok()
        .filter(|percentage| *percentage <= 100)
        .ok_or(UptimeError::UptimeOutOfRange {
            station_id,
            percentage,
        })
}
