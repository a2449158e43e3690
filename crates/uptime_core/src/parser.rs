//! Splits the input text into per-section field tuples.
//!
//! Input layout:
//!
//! ```text
//! [Stations]
//! <station id> <charger id>*
//!
//! [Chargers]
//! <charger id> <station id>
//!
//! [Charger Availability Reports]
//! <charger id> <start> <end> <true|false>
//! ```
//!
//! Sections appear in this order. `[Chargers]` is optional since chargers can
//! be listed on their station's line. Fields are not interpreted here.

use std::fmt;

use crate::{Result, UptimeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Stations,
    Chargers,
    Reports,
}

impl Section {
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "[Stations]" => Some(Section::Stations),
            "[Chargers]" => Some(Section::Chargers),
            "[Charger Availability Reports]" => Some(Section::Reports),
            _ => None,
        }
    }

    pub const fn header(self) -> &'static str {
        match self {
            Section::Stations => "[Stations]",
            Section::Chargers => "[Chargers]",
            Section::Reports => "[Charger Availability Reports]",
        }
    }

    pub const fn expected_fields(self) -> &'static str {
        match self {
            Section::Stations => "at least 1",
            Section::Chargers => "2",
            Section::Reports => "4",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Whitespace-separated fields of one record and the 1-based line they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub line: usize,
    pub fields: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    pub fn new(line: usize, fields: Vec<&'a str>) -> Self {
        RawRecord { line, fields }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput<'a> {
    /// One field each: the station id.
    pub stations: Vec<RawRecord<'a>>,
    /// `(charger id, station id)`, from `[Chargers]` and from station lines.
    pub chargers: Vec<RawRecord<'a>>,
    /// `(charger id, start, end, up)`.
    pub reports: Vec<RawRecord<'a>>,
}

/// Single pass over `input`, grouping records by section in input order.
pub fn parse_records(input: &str) -> Result<RawInput<'_>> {
    let mut raw = RawInput::default();
    let mut section: Option<Section> = None;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let next = Section::from_header(line).ok_or_else(|| UptimeError::UnknownSection {
                line: line_no,
                header: line.to_string(),
            })?;
            if let Some(after) = section.filter(|current| next < *current) {
                return Err(UptimeError::SectionOutOfOrder {
                    line: line_no,
                    section: next,
                    after,
                });
            }
            tracing::debug!("Entering section {} at line {}", next, line_no);
            section = Some(next);
            continue;
        }

        let Some(current) = section else {
            return Err(UptimeError::RecordBeforeHeader { line: line_no });
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        match (current, fields.as_slice()) {
            (Section::Stations, [station, chargers @ ..]) => {
                raw.chargers.extend(
                    chargers
                        .iter()
                        .map(|charger| RawRecord::new(line_no, vec![*charger, *station])),
                );
                raw.stations.push(RawRecord::new(line_no, vec![*station]));
            }
            (Section::Chargers, [_, _]) => raw.chargers.push(RawRecord::new(line_no, fields)),
            (Section::Reports, [_, _, _, _]) => raw.reports.push(RawRecord::new(line_no, fields)),
            _ => {
                return Err(UptimeError::FieldCount {
                    line: line_no,
                    section: current,
                    expected: current.expected_fields(),
                    found: fields.len(),
                });
            }
        }
    }

    tracing::debug!(
        "Parsed {} station, {} charger and {} report records",
        raw.stations.len(),
        raw.chargers.len(),
        raw.reports.len()
    );
    Ok(raw)
}
