//! A subway line and its section chain.

use std::sync::Arc;

use crate::identifiers::*;
use crate::models::sections::Sections;
use crate::models::types::*;

/// A named line (e.g., "Line 2", "Shinbundang")
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "LineRecord")
)]
pub struct Line {
    pub id: LineIdentifier,
    pub name: Arc<str>,

    /// Display color, as stored by the caller (e.g., "bg-green-600")
    pub color: Arc<str>,

    sections: Sections,
}

/// Line as read from storage, before its sections are checked against it
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LineRecord {
    id: LineIdentifier,
    name: Arc<str>,
    color: Arc<str>,
    #[serde(default)]
    sections: Sections,
}

#[cfg(feature = "serde")]
impl TryFrom<LineRecord> for Line {
    type Error = SectionError;

    fn try_from(record: LineRecord) -> Result<Self> {
        Self::from_parts(record.id, record.name, record.color, record.sections)
    }
}

impl Line {
    pub fn new(id: u64, name: impl AsRef<str>, color: impl AsRef<str>) -> Self {
        Self {
            id: LineIdentifier::new(id),
            name: name.as_ref().into(),
            color: color.as_ref().into(),
            sections: Sections::new(),
        }
    }

    /// Reassemble a stored line
    ///
    /// Every section must belong to `id`.
    pub fn from_parts(
        id: LineIdentifier,
        name: Arc<str>,
        color: Arc<str>,
        sections: Sections,
    ) -> Result<Self> {
        if let Some(foreign) = sections.iter().find(|s| s.line() != id) {
            return Err(SectionError::WrongLine {
                expected: id,
                found: foreign.line(),
            });
        }

        Ok(Self {
            id,
            name,
            color,
            sections,
        })
    }

    /// Create a line that already runs between two stations
    pub fn with_first_section(
        id: u64,
        name: impl AsRef<str>,
        color: impl AsRef<str>,
        up_station: Station,
        down_station: Station,
        distance: u32,
    ) -> Result<Self> {
        let mut line = Self::new(id, name, color);
        line.add_section(up_station, down_station, distance)?;
        Ok(line)
    }

    pub fn update(&mut self, name: impl AsRef<str>, color: impl AsRef<str>) {
        self.name = name.as_ref().into();
        self.color = color.as_ref().into();
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn add_section(
        &mut self,
        up_station: Station,
        down_station: Station,
        distance: u32,
    ) -> Result<()> {
        self.sections.add_section(self.id, up_station, down_station, distance)
    }

    pub fn delete_section(&mut self, station: &Station) -> Result<()> {
        self.sections.delete_section(station)
    }

    /// Pick up a renamed station; returns whether the line stops there
    pub fn refresh_station(&mut self, station: &Station) -> bool {
        self.sections.refresh_station(station)
    }

    /// Stations in travel order
    pub fn stations(&self) -> Vec<Station> {
        self.sections.all_stations()
    }

    pub fn start_station(&self) -> Option<&Station> {
        self.sections.start_endpoint()
    }

    pub fn end_station(&self) -> Result<&Station> {
        self.sections.end_endpoint()
    }

    pub fn total_distance(&self) -> u64 {
        self.sections.total_distance()
    }
}
