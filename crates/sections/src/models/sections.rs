//! The section chain of a single line.
//!
//! A line is stored as an unordered bag of directed sections that must
//! always form one simple path. Insertion either extends the path at one
//! of its ends or splits an existing section around a new station.
//! Removal is only allowed at the down end of the path.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::identifiers::*;
use crate::models::types::*;

/// All sections belonging to one line
///
/// Every successful edit keeps the sections a single directed path with
/// strictly positive distances. A failed edit leaves the chain untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Section>", into = "Vec<Section>")
)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a chain from a persisted list of sections
    ///
    /// The list may be in any order but must describe a single path.
    pub fn from_sections(sections: Vec<Section>) -> Result<Self> {
        let mut ups = HashSet::new();
        let mut downs = HashSet::new();

        for section in &sections {
            if section.distance() == 0 {
                return Err(DistanceViolation::NotPositive.into());
            }
            if section.up_station() == section.down_station() {
                return Err(TopologyViolation::SelfLoop(section.up_station().id).into());
            }
            if !ups.insert(section.up_station().id) {
                return Err(TopologyViolation::Branch(section.up_station().id).into());
            }
            if !downs.insert(section.down_station().id) {
                return Err(TopologyViolation::Branch(section.down_station().id).into());
            }
        }

        let chain = Self { sections };
        if !chain.is_empty() && chain.all_stations().len() != chain.len() + 1 {
            return Err(TopologyViolation::Disconnected.into());
        }

        Ok(chain)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_inner(self) -> Vec<Section> {
        self.sections
    }

    /// Length of the whole line
    pub fn total_distance(&self) -> u64 {
        self.sections.iter().map(|s| u64::from(s.distance())).sum()
    }

    pub fn contains_station(&self, station: &Station) -> bool {
        self.sections
            .iter()
            .any(|s| s.up_station() == station || s.down_station() == station)
    }

    // ---- Edits ----

    /// Swap in the latest copy of `station` wherever the line references it
    ///
    /// Returns whether any section touched the station.
    pub fn refresh_station(&mut self, station: &Station) -> bool {
        let mut touched = false;
        for section in &mut self.sections {
            if let Some(refreshed) = section.with_station(station) {
                *section = refreshed;
                touched = true;
            }
        }
        touched
    }

    /// Insert `up_station -> down_station` into the chain
    ///
    /// Exactly one of the two stations must already be on the line, unless
    /// the line is still empty. When the new section does not touch an end
    /// of the line it is carved out of the section it lands in.
    pub fn add_section(
        &mut self,
        line: LineIdentifier,
        up_station: Station,
        down_station: Station,
        distance: u32,
    ) -> Result<()> {
        let section = Section::new(line, up_station, down_station, distance)?;

        if self.sections.is_empty() {
            debug!(
                "line {line}: first section {} -> {} ({distance})",
                section.up_station().id,
                section.down_station().id
            );
            self.sections.push(section);
            return Ok(());
        }

        let stations = self.station_ids();
        let up = section.up_station().id;
        let down = section.down_station().id;
        match (stations.contains(&up), stations.contains(&down)) {
            (true, true) => return Err(TopologyViolation::BothStationsOnLine { up, down }.into()),
            (false, false) => {
                return Err(TopologyViolation::NeitherStationOnLine { up, down }.into())
            }
            _ => {}
        }

        let extends_start = self.start_endpoint() == Some(section.down_station());
        let extends_end = self.end_endpoint()? == section.up_station();
        if extends_start || extends_end {
            debug!("line {line}: extending with {up} -> {down} ({distance})");
            self.sections.push(section);
            return Ok(());
        }

        if let Some(index) = self.position_by_up_station(section.up_station()) {
            let existing = &self.sections[index];
            let remaining = remaining_distance(existing.distance(), distance)?;
            let head = Section::new(
                existing.line(),
                section.up_station().clone(),
                section.down_station().clone(),
                distance,
            )?;
            let tail = Section::new(
                existing.line(),
                section.down_station().clone(),
                existing.down_station().clone(),
                remaining,
            )?;

            debug!(
                "line {line}: splitting {} -> {} at {down} ({distance} + {remaining})",
                existing.up_station().id,
                existing.down_station().id
            );
            self.sections[index] = head;
            self.sections.insert(index + 1, tail);
            return Ok(());
        }

        if let Some(index) = self.position_by_down_station(section.down_station()) {
            let existing = &self.sections[index];
            let remaining = remaining_distance(existing.distance(), distance)?;
            let head = Section::new(
                existing.line(),
                existing.up_station().clone(),
                section.up_station().clone(),
                remaining,
            )?;
            let tail = Section::new(
                existing.line(),
                section.up_station().clone(),
                section.down_station().clone(),
                distance,
            )?;

            debug!(
                "line {line}: splitting {} -> {} at {up} ({remaining} + {distance})",
                existing.up_station().id,
                existing.down_station().id
            );
            self.sections[index] = head;
            self.sections.insert(index + 1, tail);
            return Ok(());
        }

        // Unreachable while exactly one endpoint is on the line.
        debug!("line {line}: no section to split for {up} -> {down}");
        Ok(())
    }

    /// Remove the last section of the line, the one ending at `station`
    pub fn delete_section(&mut self, station: &Station) -> Result<()> {
        if self.sections.is_empty() {
            return Err(SectionError::EmptyChain);
        }

        if self.end_endpoint()? != station {
            return Err(TopologyViolation::NotTerminalStation(station.id).into());
        }

        let index = self
            .position_by_down_station(station)
            .ok_or(TopologyViolation::NoEndStation)?;
        let removed = self.sections.remove(index);
        debug!(
            "line {}: removed {} -> {} ({})",
            removed.line(),
            removed.up_station().id,
            removed.down_station().id,
            removed.distance()
        );

        Ok(())
    }

    // ---- Queries ----

    /// The station the line starts at, or `None` for an empty line
    pub fn start_endpoint(&self) -> Option<&Station> {
        let downs: HashSet<StationIdentifier> =
            self.sections.iter().map(|s| s.down_station().id).collect();

        self.sections
            .iter()
            .map(Section::up_station)
            .find(|station| !downs.contains(&station.id))
    }

    /// The station the line ends at
    pub fn end_endpoint(&self) -> Result<&Station> {
        let ups: HashSet<StationIdentifier> =
            self.sections.iter().map(|s| s.up_station().id).collect();

        self.sections
            .iter()
            .map(Section::down_station)
            .find(|station| !ups.contains(&station.id))
            .ok_or_else(|| TopologyViolation::NoEndStation.into())
    }

    /// Every station of the line, from the start to the end
    pub fn all_stations(&self) -> Vec<Station> {
        let Some(start) = self.start_endpoint() else {
            return Vec::new();
        };

        let by_up: HashMap<StationIdentifier, &Section> = self
            .sections
            .iter()
            .map(|s| (s.up_station().id, s))
            .collect();

        let mut stations = Vec::with_capacity(self.sections.len() + 1);
        stations.push(start.clone());

        let mut current = start;
        // Bounded so a malformed chain cannot loop forever.
        for _ in 0..self.sections.len() {
            let Some(section) = by_up.get(&current.id) else {
                break;
            };
            current = section.down_station();
            stations.push(current.clone());
        }

        stations
    }

    fn station_ids(&self) -> HashSet<StationIdentifier> {
        self.sections
            .iter()
            .flat_map(|s| [s.up_station().id, s.down_station().id])
            .collect()
    }

    fn position_by_up_station(&self, station: &Station) -> Option<usize> {
        self.sections.iter().position(|s| s.up_station() == station)
    }

    fn position_by_down_station(&self, station: &Station) -> Option<usize> {
        self.sections.iter().position(|s| s.down_station() == station)
    }
}

/// Length left over when `requested` is cut out of a section of `available`
fn remaining_distance(available: u32, requested: u32) -> Result<u32> {
    available
        .checked_sub(requested)
        .filter(|remaining| *remaining > 0)
        .ok_or_else(|| {
            DistanceViolation::DoesNotFit {
                requested,
                available,
            }
            .into()
        })
}

impl TryFrom<Vec<Section>> for Sections {
    type Error = SectionError;

    fn try_from(sections: Vec<Section>) -> Result<Self> {
        Self::from_sections(sections)
    }
}

impl From<Sections> for Vec<Section> {
    fn from(sections: Sections) -> Self {
        sections.sections
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u64 = 1;
    const B: u64 = 2;
    const C: u64 = 3;
    const D: u64 = 4;
    const E: u64 = 5;
    const F: u64 = 6;

    fn line() -> LineIdentifier {
        LineIdentifier::new(1)
    }

    fn station(id: u64) -> Station {
        Station::new(id, format!("Station {id}"))
    }

    fn chain(edges: &[(u64, u64, u32)]) -> Sections {
        let mut sections = Sections::new();
        for &(up, down, distance) in edges {
            sections
                .add_section(line(), station(up), station(down), distance)
                .unwrap();
        }
        sections
    }

    fn edges(sections: &Sections) -> Vec<(u64, u64, u32)> {
        sections
            .iter()
            .map(|s| (s.up_station().id.get(), s.down_station().id.get(), s.distance()))
            .collect()
    }

    fn ids(stations: &[Station]) -> Vec<u64> {
        stations.iter().map(|s| s.id.get()).collect()
    }

    #[test]
    fn test_first_section_on_empty_chain() {
        let sections = chain(&[(A, B, 3)]);

        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections.as_slice()[0],
            Section::new(line(), station(A), station(B), 3).unwrap()
        );
    }

    #[test]
    fn test_extend_at_end() {
        let sections = chain(&[(A, B, 3), (B, C, 2)]);

        assert_eq!(edges(&sections), vec![(A, B, 3), (B, C, 2)]);
        assert_eq!(sections.end_endpoint().unwrap(), &station(C));
    }

    #[test]
    fn test_extend_at_start() {
        let sections = chain(&[(A, B, 3), (B, C, 2), (D, A, 1)]);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections.start_endpoint(), Some(&station(D)));
        assert_eq!(ids(&sections.all_stations()), vec![D, A, B, C]);
        assert_eq!(sections.total_distance(), 6);
    }

    #[test]
    fn test_split_from_up_station() {
        let sections = chain(&[(A, B, 3), (A, E, 1)]);

        assert_eq!(edges(&sections), vec![(A, E, 1), (E, B, 2)]);
    }

    #[test]
    fn test_split_from_down_station() {
        let sections = chain(&[(A, B, 3), (E, B, 1)]);

        assert_eq!(edges(&sections), vec![(A, E, 2), (E, B, 1)]);
    }

    #[test]
    fn test_split_keeps_line_of_replaced_section() {
        let mut sections = chain(&[(A, B, 3)]);
        sections
            .add_section(LineIdentifier::new(9), station(A), station(E), 1)
            .unwrap();

        assert!(sections.iter().all(|s| s.line() == line()));
    }

    #[test]
    fn test_splits_keep_total_distance_and_extensions_grow_it() {
        let mut sections = chain(&[(A, B, 10)]);

        // Splits carve the new section out of an existing one
        for (up, down, distance) in [(A, C, 4), (C, D, 2), (E, B, 1)] {
            sections
                .add_section(line(), station(up), station(down), distance)
                .unwrap();
            assert_eq!(sections.total_distance(), 10);
        }

        sections.add_section(line(), station(B), station(F), 7).unwrap();
        assert_eq!(sections.total_distance(), 17);

        assert_eq!(ids(&sections.all_stations()), vec![A, C, D, E, B, F]);
        assert_eq!(
            edges(&sections),
            vec![(A, C, 4), (C, D, 2), (D, E, 3), (E, B, 1), (B, F, 7)]
        );
    }

    #[test]
    fn test_both_stations_on_line_rejected() {
        let mut sections = chain(&[(A, B, 3), (B, C, 2)]);

        let err = sections
            .add_section(line(), station(A), station(C), 1)
            .unwrap_err();
        assert!(matches!(
            err,
            SectionError::InvalidTopology(TopologyViolation::BothStationsOnLine { .. })
        ));

        // Reversed duplicate of an existing edge
        let err = sections
            .add_section(line(), station(B), station(A), 1)
            .unwrap_err();
        assert!(matches!(err, SectionError::InvalidTopology(_)));
    }

    #[test]
    fn test_neither_station_on_line_rejected() {
        let mut sections = chain(&[(A, B, 3)]);

        let err = sections
            .add_section(line(), station(D), station(E), 1)
            .unwrap_err();
        assert!(matches!(
            err,
            SectionError::InvalidTopology(TopologyViolation::NeitherStationOnLine { .. })
        ));
    }

    #[test]
    fn test_split_distance_too_long_rejected() {
        let mut sections = chain(&[(A, B, 3)]);

        for distance in [3, 4] {
            let err = sections
                .add_section(line(), station(A), station(E), distance)
                .unwrap_err();
            assert!(matches!(
                err,
                SectionError::InvalidDistance(DistanceViolation::DoesNotFit { available: 3, .. })
            ));

            let err = sections
                .add_section(line(), station(E), station(B), distance)
                .unwrap_err();
            assert!(matches!(err, SectionError::InvalidDistance(_)));
        }
    }

    #[test]
    fn test_failed_add_leaves_chain_unchanged() {
        let mut sections = chain(&[(A, B, 3), (B, C, 2)]);
        let before = sections.clone();

        assert!(sections.add_section(line(), station(A), station(E), 5).is_err());
        assert!(sections.add_section(line(), station(A), station(C), 1).is_err());
        assert!(sections.add_section(line(), station(D), station(E), 1).is_err());
        assert!(sections.add_section(line(), station(E), station(C), 0).is_err());

        assert_eq!(sections, before);
    }

    #[test]
    fn test_delete_end_station() {
        let mut sections = chain(&[(A, B, 3), (B, C, 2)]);

        sections.delete_section(&station(C)).unwrap();

        assert_eq!(edges(&sections), vec![(A, B, 3)]);
        assert_eq!(sections.total_distance(), 3);
        assert_eq!(sections.end_endpoint().unwrap(), &station(B));
    }

    #[test]
    fn test_delete_non_terminal_rejected() {
        let mut sections = chain(&[(A, B, 3), (B, C, 2)]);

        for id in [A, B, D] {
            let expected = TopologyViolation::NotTerminalStation(StationIdentifier::new(id));
            let err = sections.delete_section(&station(id)).unwrap_err();
            assert!(matches!(err, SectionError::InvalidTopology(v) if v == expected));
        }
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_delete_from_empty_chain() {
        let mut sections = Sections::new();

        let err = sections.delete_section(&station(A)).unwrap_err();
        assert!(matches!(err, SectionError::EmptyChain));
    }

    #[test]
    fn test_delete_last_section_empties_chain() {
        let mut sections = chain(&[(A, B, 3)]);

        sections.delete_section(&station(B)).unwrap();

        assert!(sections.is_empty());
        assert_eq!(sections.start_endpoint(), None);
        assert!(matches!(
            sections.end_endpoint(),
            Err(SectionError::InvalidTopology(TopologyViolation::NoEndStation))
        ));

        // An empty line accepts any section again
        sections
            .add_section(line(), station(D), station(E), 4)
            .unwrap();
        assert_eq!(edges(&sections), vec![(D, E, 4)]);
    }

    #[test]
    fn test_endpoints_are_distinct() {
        let sections = chain(&[(A, B, 3), (A, C, 1), (D, A, 2)]);

        let start = sections.start_endpoint().unwrap();
        let end = sections.end_endpoint().unwrap();
        assert_ne!(start, end);
        assert_eq!(start, &station(D));
        assert_eq!(end, &station(B));
    }

    #[test]
    fn test_empty_chain_queries() {
        let sections = Sections::new();

        assert_eq!(sections.start_endpoint(), None);
        assert!(sections.end_endpoint().is_err());
        assert!(sections.all_stations().is_empty());
        assert_eq!(sections.total_distance(), 0);
    }

    #[test]
    fn test_all_stations_in_path_order_after_splits() {
        // Mid-line inserts scatter storage order; the walk must not care.
        let sections = chain(&[(B, C, 5), (A, B, 5), (B, D, 2), (E, C, 1), (C, F, 3)]);

        assert_eq!(ids(&sections.all_stations()), vec![A, B, D, E, C, F]);
        assert!(sections.contains_station(&station(E)));
        assert!(!sections.contains_station(&station(10)));
    }

    #[test]
    fn test_worked_example() {
        let mut sections = chain(&[(A, B, 3)]);

        sections.add_section(line(), station(B), station(C), 2).unwrap();
        assert_eq!(sections.end_endpoint().unwrap(), &station(C));

        sections.add_section(line(), station(D), station(A), 1).unwrap();
        assert_eq!(ids(&sections.all_stations()), vec![D, A, B, C]);

        sections.delete_section(&station(C)).unwrap();
        assert_eq!(ids(&sections.all_stations()), vec![D, A, B]);
    }

    #[test]
    fn test_refresh_station_renames_everywhere() {
        let mut sections = chain(&[(A, B, 3), (B, C, 2)]);

        assert!(sections.refresh_station(&Station::new(B, "Renamed")));
        assert!(!sections.refresh_station(&Station::new(D, "Elsewhere")));

        let names: Vec<_> = sections.all_stations().iter().map(|s| s.name.to_string()).collect();
        assert_eq!(names, vec!["Station 1", "Renamed", "Station 3"]);
        assert_eq!(edges(&sections), vec![(A, B, 3), (B, C, 2)]);
    }

    #[test]
    fn test_from_sections_accepts_any_order() {
        let list = vec![
            Section::new(line(), station(B), station(C), 2).unwrap(),
            Section::new(line(), station(A), station(B), 3).unwrap(),
        ];

        let sections = Sections::from_sections(list).unwrap();
        assert_eq!(ids(&sections.all_stations()), vec![A, B, C]);
    }

    #[test]
    fn test_from_sections_rejects_malformed() {
        let branch = vec![
            Section::new(line(), station(A), station(B), 3).unwrap(),
            Section::new(line(), station(A), station(C), 3).unwrap(),
        ];
        assert!(matches!(
            Sections::from_sections(branch),
            Err(SectionError::InvalidTopology(TopologyViolation::Branch(_)))
        ));

        let two_paths = vec![
            Section::new(line(), station(A), station(B), 3).unwrap(),
            Section::new(line(), station(C), station(D), 3).unwrap(),
        ];
        assert!(matches!(
            Sections::from_sections(two_paths),
            Err(SectionError::InvalidTopology(TopologyViolation::Disconnected))
        ));

        let cycle = vec![
            Section::new(line(), station(A), station(B), 3).unwrap(),
            Section::new(line(), station(B), station(A), 3).unwrap(),
        ];
        assert!(Sections::from_sections(cycle).is_err());
    }
}
