use serde::{Deserialize, Serialize};

pub type StationId = u32;
pub type ChargerId = u32;
pub type Timestamp = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Station {
    pub id: StationId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Charger {
    pub id: ChargerId,
    pub station_id: StationId,
}

/// A single availability report of one charger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub charger_id: ChargerId,
    pub interval: Interval,
    pub up: bool,
}

/// Half-open time range `[start, end)`. `start < end` for every interval built
/// from validated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval {
    pub const fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> u64 {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<(Timestamp, Timestamp)> for Interval {
    fn from((start, end): (Timestamp, Timestamp)) -> Self {
        Interval::new(start, end)
    }
}

/// Uptime of one station, as handed to the output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub station_id: StationId,
    /// Floored percentage in `0..=100`.
    pub uptime: u8,
}
