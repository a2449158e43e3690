//! Station uptime core
//!
//! Parses station/charger/report records, validates them, and computes the
//! floored uptime percentage of every declared station.

mod assembler;
mod calculator;
mod merger;
mod models;
mod parser;
mod validator;

pub use crate::assembler::assemble_results;
pub use crate::calculator::{observed_span, up_duration, uptime_percentage};
pub use crate::merger::merge_intervals;
pub use crate::models::*;
pub use crate::parser::{RawInput, RawRecord, Section, parse_records};
pub use crate::validator::{Field, ValidatedInput, validate};

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UptimeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Station,
    Charger,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Station => f.write_str("station"),
            EntityKind::Charger => f.write_str("charger"),
        }
    }
}

/// Coarse classification of an [`UptimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural malformation of the input.
    Parse,
    /// A field does not lexically match its type.
    Format,
    /// A number exceeds its bit width, or a report's start is not before its end.
    Range,
    Duplicate,
    Reference,
    /// The computation produced a value it never should. Indicates a bug.
    Invariant,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UptimeError {
    #[error("line {line}: data found before any section header")]
    RecordBeforeHeader { line: usize },
    #[error("line {line}: unknown section header `{header}`")]
    UnknownSection { line: usize, header: String },
    #[error("line {line}: section {section} cannot follow section {after}")]
    SectionOutOfOrder {
        line: usize,
        section: Section,
        after: Section,
    },
    #[error("line {line}: {section} record expects {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        section: Section,
        expected: &'static str,
        found: usize,
    },
    #[error("no stations declared in input")]
    NoStations,
    #[error("line {line}: invalid integer `{value}` for {field}")]
    InvalidInteger {
        line: usize,
        field: Field,
        value: String,
    },
    #[error("line {line}: {field} `{value}` is out of the unsigned {}-bit range", .field.bits())]
    IntegerOutOfRange {
        line: usize,
        field: Field,
        value: String,
    },
    #[error("line {line}: invalid up value `{value}`, must be `true` or `false`")]
    InvalidFlag { line: usize, value: String },
    #[error("line {line}: invalid time range, start {start} is not before end {end}")]
    InvalidTimeRange { line: usize, start: u64, end: u64 },
    #[error("line {line}: duplicate {kind} id {id}")]
    DuplicateId {
        line: usize,
        kind: EntityKind,
        id: u32,
    },
    #[error("line {line}: unknown {kind} id {id}")]
    UnknownReference {
        line: usize,
        kind: EntityKind,
        id: u32,
    },
    #[error("station {station_id}: computed uptime {percentage}% is outside 0..=100")]
    UptimeOutOfRange {
        station_id: StationId,
        percentage: u128,
    },
}

impl UptimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UptimeError::RecordBeforeHeader { .. }
            | UptimeError::UnknownSection { .. }
            | UptimeError::SectionOutOfOrder { .. }
            | UptimeError::FieldCount { .. }
            | UptimeError::NoStations => ErrorKind::Parse,
            UptimeError::InvalidInteger { .. } | UptimeError::InvalidFlag { .. } => {
                ErrorKind::Format
            }
            UptimeError::IntegerOutOfRange { .. } | UptimeError::InvalidTimeRange { .. } => {
                ErrorKind::Range
            }
            UptimeError::DuplicateId { .. } => ErrorKind::Duplicate,
            UptimeError::UnknownReference { .. } => ErrorKind::Reference,
            UptimeError::UptimeOutOfRange { .. } => ErrorKind::Invariant,
        }
    }

    /// Input line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            UptimeError::RecordBeforeHeader { line }
            | UptimeError::UnknownSection { line, .. }
            | UptimeError::SectionOutOfOrder { line, .. }
            | UptimeError::FieldCount { line, .. }
            | UptimeError::InvalidInteger { line, .. }
            | UptimeError::IntegerOutOfRange { line, .. }
            | UptimeError::InvalidFlag { line, .. }
            | UptimeError::InvalidTimeRange { line, .. }
            | UptimeError::DuplicateId { line, .. }
            | UptimeError::UnknownReference { line, .. } => Some(*line),
            UptimeError::NoStations | UptimeError::UptimeOutOfRange { .. } => None,
        }
    }
}
