use crate::{Result, Station, StationId, StationResult};

/// One result per declared station, ascending by station id.
///
/// `uptime_of` is called once for every station, including stations that have
/// no reports. The first error aborts the whole assembly.
pub fn assemble_results<F>(stations: &[Station], mut uptime_of: F) -> Result<Vec<StationResult>>
where
    F: FnMut(StationId) -> Result<u8>,
{
    let mut results = stations
        .iter()
        .map(|station| {
            Ok(StationResult {
                station_id: station.id,
                uptime: uptime_of(station.id)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    results.sort_unstable_by_key(|result| result.station_id);
    Ok(results)
}
