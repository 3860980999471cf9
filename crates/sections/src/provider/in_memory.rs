//! In-memory line repository.
//!
//! Keeps every station and line in hash maps. Used by tests and by the
//! command line editor, which loads it from and dumps it to a file.

use std::collections::HashMap;

use crate::identifiers::*;
use crate::models::{line::Line, traits::LineRepository, types::*};

/// Line repository backed by hash maps
#[derive(Clone, Debug, Default)]
pub struct InMemoryLineRepository {
    stations: HashMap<StationIdentifier, Station>,
    lines: HashMap<LineIdentifier, Line>,
}

impl InMemoryLineRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from raw data (used when loading a saved network)
    pub fn from_data(stations: Vec<Station>, lines: Vec<Line>) -> Self {
        let stations = stations.into_iter().map(|s| (s.id, s)).collect();
        let lines = lines.into_iter().map(|l| (l.id, l)).collect();

        Self { stations, lines }
    }

    /// Every station, sorted by id
    pub fn all_stations(&self) -> Vec<Station> {
        let mut stations: Vec<_> = self.stations.values().cloned().collect();
        stations.sort_by_key(|s| s.id);
        stations
    }
}

impl LineRepository for InMemoryLineRepository {
    fn find_station(&self, id: StationIdentifier) -> Option<Station> {
        self.stations.get(&id).cloned()
    }

    fn save_station(&mut self, station: Station) {
        self.stations.insert(station.id, station);
    }

    fn find_line(&self, id: LineIdentifier) -> Option<Line> {
        self.lines.get(&id).cloned()
    }

    fn save_line(&mut self, line: Line) {
        self.lines.insert(line.id, line);
    }

    /// Every line, sorted by id
    fn all_lines(&self) -> Vec<Line> {
        let mut lines: Vec<_> = self.lines.values().cloned().collect();
        lines.sort_by_key(|l| l.id);
        lines
    }
}
