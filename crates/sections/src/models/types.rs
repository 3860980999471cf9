//! Core value types and errors for a line's section chain.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::identifiers::*;

// ============================================================================
// Data Structures
// ============================================================================

/// A station referenced by sections
///
/// Identity is the station id only; the name is carried along for display.
/// Stations are shared between lines, so cloning is cheap.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id: StationIdentifier,
    pub name: Arc<str>,
}

impl Station {
    pub fn new(id: u64, name: impl AsRef<str>) -> Self {
        Self {
            id: StationIdentifier::new(id),
            name: name.as_ref().into(),
        }
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One directed edge of a line: `up_station -> down_station`
///
/// Sections are never edited in place. Splitting one produces two new
/// sections and drops the old one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    line: LineIdentifier,
    up_station: Station,
    down_station: Station,
    distance: u32,
}

impl Section {
    pub fn new(
        line: LineIdentifier,
        up_station: Station,
        down_station: Station,
        distance: u32,
    ) -> Result<Self> {
        if distance == 0 {
            return Err(SectionError::InvalidDistance(DistanceViolation::NotPositive));
        }

        if up_station == down_station {
            return Err(SectionError::InvalidTopology(TopologyViolation::SelfLoop(
                up_station.id,
            )));
        }

        Ok(Self {
            line,
            up_station,
            down_station,
            distance,
        })
    }

    pub fn line(&self) -> LineIdentifier {
        self.line
    }

    pub fn up_station(&self) -> &Station {
        &self.up_station
    }

    pub fn down_station(&self) -> &Station {
        &self.down_station
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// A copy of this section holding the given version of `station`
    ///
    /// Returns `None` if the section does not touch the station.
    pub fn with_station(&self, station: &Station) -> Option<Self> {
        if self.up_station != *station && self.down_station != *station {
            return None;
        }

        let pick = |current: &Station| {
            if current == station {
                station.clone()
            } else {
                current.clone()
            }
        };

        Some(Self {
            line: self.line,
            up_station: pick(&self.up_station),
            down_station: pick(&self.down_station),
            distance: self.distance,
        })
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Why an edit would break the shape of the chain
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TopologyViolation {
    #[error("stations {up} and {down} are both already on the line")]
    BothStationsOnLine {
        up: StationIdentifier,
        down: StationIdentifier,
    },

    #[error("neither station {up} nor {down} is on the line")]
    NeitherStationOnLine {
        up: StationIdentifier,
        down: StationIdentifier,
    },

    #[error("station {0} is not the last station of the line")]
    NotTerminalStation(StationIdentifier),

    #[error("line has no end station")]
    NoEndStation,

    #[error("section would connect station {0} to itself")]
    SelfLoop(StationIdentifier),

    #[error("station {0} would branch the line")]
    Branch(StationIdentifier),

    #[error("sections do not form a single path")]
    Disconnected,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DistanceViolation {
    #[error("distance must be positive")]
    NotPositive,

    #[error("distance {requested} does not fit in a section of length {available}")]
    DoesNotFit { requested: u32, available: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("Invalid topology: {0}")]
    InvalidTopology(#[from] TopologyViolation),

    #[error("Invalid distance: {0}")]
    InvalidDistance(#[from] DistanceViolation),

    #[error("Line has no sections")]
    EmptyChain,

    #[error("Section of line {found} stored under line {expected}")]
    WrongLine {
        expected: LineIdentifier,
        found: LineIdentifier,
    },

    #[error("Line not found: {0}")]
    LineNotFound(LineIdentifier),

    #[error("Station not found: {0}")]
    StationNotFound(StationIdentifier),

    #[error("Invalid request: {0} must be positive")]
    InvalidRequest(&'static str),
}

pub type Result<T> = std::result::Result<T, SectionError>;
