//! Input shapes handed over by the caller.

use crate::identifiers::*;
use crate::models::types::*;

/// A request to register a section on an existing line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionRegistrationRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: u32,
}

impl SectionRegistrationRequest {
    pub fn new(up_station_id: u64, down_station_id: u64, distance: u32) -> Self {
        Self {
            up_station_id,
            down_station_id,
            distance,
        }
    }

    /// Reject ids and distances that are not positive
    pub fn validate(&self) -> Result<()> {
        if self.up_station_id == 0 {
            return Err(SectionError::InvalidRequest("up_station_id"));
        }
        if self.down_station_id == 0 {
            return Err(SectionError::InvalidRequest("down_station_id"));
        }
        if self.distance == 0 {
            return Err(SectionError::InvalidRequest("distance"));
        }
        Ok(())
    }

    pub fn up_station_id(&self) -> StationIdentifier {
        StationIdentifier::new(self.up_station_id)
    }

    pub fn down_station_id(&self) -> StationIdentifier {
        StationIdentifier::new(self.down_station_id)
    }
}
