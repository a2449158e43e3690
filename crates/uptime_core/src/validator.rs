use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::{
    Charger, ChargerId, EntityKind, Interval, RawInput, RawRecord, Report, Result, Section,
    Station, StationId, UptimeError,
};

/// Integer field of a record, used to name the offending value in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StationId,
    ChargerId,
    StartTime,
    EndTime,
}

impl Field {
    pub const fn bits(self) -> u32 {
        match self {
            Field::StationId | Field::ChargerId => u32::BITS,
            Field::StartTime | Field::EndTime => u64::BITS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::StationId => "station id",
            Field::ChargerId => "charger id",
            Field::StartTime => "start time",
            Field::EndTime => "end time",
        })
    }
}

/// Typed input that passed every field and referential check.
///
/// Only [`validate`] builds it, so every charger points at a declared station
/// and every report at a declared charger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedInput {
    stations: Vec<Station>,
    chargers: Vec<Charger>,
    reports: Vec<Report>,
    charger_stations: HashMap<ChargerId, StationId>,
}

impl ValidatedInput {
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn chargers(&self) -> &[Charger] {
        &self.chargers
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Owning station of every charger.
    pub fn charger_index(&self) -> &HashMap<ChargerId, StationId> {
        &self.charger_stations
    }

    /// Reports grouped by the station of their charger, in record order.
    /// Stations without reports have no entry.
    pub fn reports_by_station(&self) -> HashMap<StationId, Vec<&Report>> {
        let mut grouped: HashMap<StationId, Vec<&Report>> = HashMap::new();
        for report in &self.reports {
            // Every report's charger was resolved during validation
            let station_id = self.charger_stations[&report.charger_id];
            grouped.entry(station_id).or_default().push(report);
        }
        grouped
    }
}

/// Convert raw records into typed entities.
///
/// Stations are checked first, then chargers, then reports, each in record
/// order. The first failing record aborts the whole run.
pub fn validate(raw: &RawInput<'_>) -> Result<ValidatedInput> {
    let stations = validate_stations(&raw.stations)?;
    if stations.is_empty() {
        return Err(UptimeError::NoStations);
    }
    let station_ids: HashSet<StationId> = stations.iter().map(|station| station.id).collect();

    let chargers = validate_chargers(&raw.chargers, &station_ids)?;
    let charger_stations: HashMap<ChargerId, StationId> = chargers
        .iter()
        .map(|charger| (charger.id, charger.station_id))
        .collect();

    let reports = validate_reports(&raw.reports, &charger_stations)?;

    tracing::info!(
        "Validated {} stations, {} chargers and {} reports",
        stations.len(),
        chargers.len(),
        reports.len()
    );
    Ok(ValidatedInput {
        stations,
        chargers,
        reports,
        charger_stations,
    })
}

fn validate_stations(records: &[RawRecord<'_>]) -> Result<Vec<Station>> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| {
            let [id] = fields::<1>(record, Section::Stations)?;
            let id = parse_integer(id, record.line, Field::StationId)?;
            if !seen.insert(id) {
                return Err(UptimeError::DuplicateId {
                    line: record.line,
                    kind: EntityKind::Station,
                    id,
                });
            }
            Ok(Station { id })
        })
        .collect()
}

fn validate_chargers(
    records: &[RawRecord<'_>],
    stations: &HashSet<StationId>,
) -> Result<Vec<Charger>> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| {
            let [id, station_id] = fields::<2>(record, Section::Chargers)?;
            let id = parse_integer(id, record.line, Field::ChargerId)?;
            let station_id = parse_integer(station_id, record.line, Field::StationId)?;
            if !seen.insert(id) {
                return Err(UptimeError::DuplicateId {
                    line: record.line,
                    kind: EntityKind::Charger,
                    id,
                });
            }
            if !stations.contains(&station_id) {
                return Err(UptimeError::UnknownReference {
                    line: record.line,
                    kind: EntityKind::Station,
                    id: station_id,
                });
            }
            Ok(Charger { id, station_id })
        })
        .collect()
}

fn validate_reports(
    records: &[RawRecord<'_>],
    chargers: &HashMap<ChargerId, StationId>,
) -> Result<Vec<Report>> {
    records
        .iter()
        .map(|record| {
            let line = record.line;
            let [charger_id, start, end, up] = fields::<4>(record, Section::Reports)?;
            let charger_id = parse_integer(charger_id, line, Field::ChargerId)?;
            let start = parse_integer(start, line, Field::StartTime)?;
            let end = parse_integer(end, line, Field::EndTime)?;
            let up = parse_flag(up, line)?;

            if start >= end {
                return Err(UptimeError::InvalidTimeRange { line, start, end });
            }
            if !chargers.contains_key(&charger_id) {
                return Err(UptimeError::UnknownReference {
                    line,
                    kind: EntityKind::Charger,
                    id: charger_id,
                });
            }
            Ok(Report {
                charger_id,
                interval: Interval::new(start, end),
                up,
            })
        })
        .collect()
}

fn fields<'a, const N: usize>(record: &RawRecord<'a>, section: Section) -> Result<[&'a str; N]> {
    <[&'a str; N]>::try_from(record.fields.as_slice()).map_err(|_| UptimeError::FieldCount {
        line: record.line,
        section,
        expected: section.expected_fields(),
        found: record.fields.len(),
    })
}

/// Base-10, ASCII digits only. A leading minus sign is a range violation
/// rather than a format one, since the value is numeric.
fn parse_integer<T: FromStr>(value: &str, line: usize, field: Field) -> Result<T> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UptimeError::InvalidInteger {
            line,
            field,
            value: value.to_string(),
        });
    }
    let out_of_range = || UptimeError::IntegerOutOfRange {
        line,
        field,
        value: value.to_string(),
    };
    if digits.len() != value.len() {
        return Err(out_of_range());
    }
    value.parse().map_err(|_| out_of_range())
}

fn parse_flag(value: &str, line: usize) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(UptimeError::InvalidFlag {
            line,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ErrorKind, parse_records};

    fn validate_str(input: &str) -> Result<ValidatedInput> {
        validate(&parse_records(input).expect("Could not parse the input"))
    }

    #[test]
    fn test_valid_input() {
        let input = "\
[Stations]
0 1001 1002
1 1003

[Charger Availability Reports]
1001 0 100 true
1002 50 150 false
1003 0 200 true
";
        let model = validate_str(input).expect("Could not validate the input");

        assert_eq!(model.stations(), &[Station { id: 0 }, Station { id: 1 }]);
        assert_eq!(
            model.chargers(),
            &[
                Charger {
                    id: 1001,
                    station_id: 0
                },
                Charger {
                    id: 1002,
                    station_id: 0
                },
                Charger {
                    id: 1003,
                    station_id: 1
                },
            ]
        );
        assert_eq!(
            model.reports()[1],
            Report {
                charger_id: 1002,
                interval: Interval::new(50, 150),
                up: false,
            }
        );
        assert_eq!(model.charger_index().get(&1003), Some(&1));
    }

    #[test]
    fn test_station_with_no_chargers() {
        let model = validate_str("[Stations]\n0\n\n[Charger Availability Reports]\n")
            .expect("Could not validate the input");
        assert_eq!(model.stations(), &[Station { id: 0 }]);
        assert!(model.chargers().is_empty());
        assert!(model.reports().is_empty());
    }

    #[test]
    fn test_no_stations() {
        assert_eq!(
            validate_str("[Stations]\n[Charger Availability Reports]\n"),
            Err(UptimeError::NoStations)
        );
        assert_eq!(validate_str(""), Err(UptimeError::NoStations));
    }

    #[test]
    fn test_duplicate_station_id() {
        let input = "[Stations]\n0 1001\n0 1002\n[Charger Availability Reports]\n1001 0 100 true\n";
        assert_eq!(
            validate_str(input),
            Err(UptimeError::DuplicateId {
                line: 3,
                kind: EntityKind::Station,
                id: 0,
            })
        );
    }

    #[test]
    fn test_duplicate_charger_id() {
        // Across stations
        let input = "[Stations]\n0 1001\n1 1001\n[Charger Availability Reports]\n1001 0 100 true\n";
        assert_eq!(
            validate_str(input),
            Err(UptimeError::DuplicateId {
                line: 3,
                kind: EntityKind::Charger,
                id: 1001,
            })
        );

        // Between a station line and the chargers section
        let input = "[Stations]\n0 1001\n1\n[Chargers]\n1001 1\n";
        assert!(matches!(
            validate_str(input),
            Err(UptimeError::DuplicateId {
                line: 5,
                kind: EntityKind::Charger,
                id: 1001,
            })
        ));
    }

    #[test]
    fn test_charger_unknown_station() {
        let input = "[Stations]\n0\n[Chargers]\n1001 9\n";
        assert_eq!(
            validate_str(input),
            Err(UptimeError::UnknownReference {
                line: 4,
                kind: EntityKind::Station,
                id: 9,
            })
        );
    }

    #[test]
    fn test_report_unknown_charger() {
        let input = "[Stations]\n0 1001\n[Charger Availability Reports]\n9999 0 100 true\n";
        let err = validate_str(input).expect_err("Unknown charger should fail");
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(
            err,
            UptimeError::UnknownReference {
                line: 4,
                kind: EntityKind::Charger,
                id: 9999,
            }
        );
    }

    #[test]
    fn test_invalid_time_range() {
        for (start, end) in [(100, 50), (100, 100)] {
            let input =
                format!("[Stations]\n0 1001\n[Charger Availability Reports]\n1001 {start} {end} true\n");
            assert_eq!(
                validate_str(&input),
                Err(UptimeError::InvalidTimeRange {
                    line: 4,
                    start,
                    end
                })
            );
        }
    }

    #[test]
    fn test_invalid_flag() {
        for flag in ["maybe", "True", "FALSE", "1"] {
            let input =
                format!("[Stations]\n0 1001\n[Charger Availability Reports]\n1001 0 100 {flag}\n");
            match validate_str(&input) {
                Err(UptimeError::InvalidFlag { line, value }) => {
                    assert_eq!(line, 4);
                    assert_eq!(value, flag);
                }
                other => panic!("Expected InvalidFlag error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_integer_format() {
        for value in ["abc", "1.5", "0x10", "+5", "-", "12a"] {
            let input = format!("[Stations]\n{value}\n");
            let err = validate_str(&input).expect_err("Non-numeric id should fail");
            assert_eq!(err.kind(), ErrorKind::Format, "value {value:?}");
        }
    }

    #[test]
    fn test_integer_range() {
        // u32 bounds for ids
        let model = validate_str("[Stations]\n4294967295 0\n").expect("u32::MAX is a valid id");
        assert_eq!(model.stations(), &[Station { id: u32::MAX }]);

        assert_eq!(
            validate_str("[Stations]\n4294967296\n"),
            Err(UptimeError::IntegerOutOfRange {
                line: 2,
                field: Field::StationId,
                value: "4294967296".into(),
            })
        );
        assert_eq!(
            validate_str("[Stations]\n-1\n"),
            Err(UptimeError::IntegerOutOfRange {
                line: 2,
                field: Field::StationId,
                value: "-1".into(),
            })
        );

        // u64 bounds for timestamps
        let input = "[Stations]\n0 1\n[Charger Availability Reports]\n1 0 18446744073709551615 true\n";
        let model = validate_str(input).expect("u64::MAX is a valid timestamp");
        assert_eq!(model.reports()[0].interval, Interval::new(0, u64::MAX));

        let input = "[Stations]\n0 1\n[Charger Availability Reports]\n1 0 18446744073709551616 true\n";
        assert!(matches!(
            validate_str(input),
            Err(UptimeError::IntegerOutOfRange {
                line: 4,
                field: Field::EndTime,
                ..
            })
        ));
    }

    #[test]
    /// Any minus sign is out of the unsigned range, including on zero
    fn test_negative_zero() {
        assert_eq!(
            validate_str("[Stations]\n-0\n"),
            Err(UptimeError::IntegerOutOfRange {
                line: 2,
                field: Field::StationId,
                value: "-0".into(),
            })
        );

        let input = "[Stations]\n0 1\n[Charger Availability Reports]\n1 -0 10 true\n";
        let err = validate_str(input).expect_err("Negative zero timestamp should fail");
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_reports_by_station() {
        let input = "\
[Stations]
0 1001 1002
1 1003
2
[Chargers]
1004 2
[Charger Availability Reports]
1002 50 150 false
1003 0 200 true
1001 0 100 true
1004 5 6 true
";
        let model = validate_str(input).expect("Could not validate the input");
        let grouped = model.reports_by_station();

        assert_eq!(grouped.len(), 3);
        let station_0: Vec<ChargerId> = grouped[&0].iter().map(|report| report.charger_id).collect();
        assert_eq!(station_0, vec![1002, 1001]);
        assert_eq!(grouped[&1].len(), 1);
        assert_eq!(grouped[&2][0].interval, Interval::new(5, 6));
    }

    #[test]
    fn test_reports_by_station_skips_silent_stations() {
        let model = validate_str("[Stations]\n0 1\n1\n[Charger Availability Reports]\n1 0 1 true\n")
            .expect("Could not validate the input");
        let grouped = model.reports_by_station();

        assert!(grouped.contains_key(&0));
        assert!(!grouped.contains_key(&1));
    }

    #[test]
    fn test_first_error_in_record_order() {
        // Both reports are invalid, the first one is reported
        let input = "[Stations]\n0 1\n[Charger Availability Reports]\n1 5 1 true\n2 0 1 true\n";
        assert!(matches!(
            validate_str(input),
            Err(UptimeError::InvalidTimeRange { line: 4, .. })
        ));
    }
}
