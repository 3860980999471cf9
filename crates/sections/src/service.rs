//! Id-based entry points for editing lines.
//!
//! Resolves plain ids against a [`LineRepository`], runs the edit on the
//! loaded line, and stores the line again only if the edit succeeded.

use log::debug;

use crate::identifiers::*;
use crate::models::{
    line::Line, request::SectionRegistrationRequest, traits::LineRepository, types::*,
};

pub struct SectionService<R> {
    repository: R,
}

impl<R: LineRepository> SectionService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    // ---- Setup ----

    /// Register a station, or rename it on every line that stops there
    pub fn register_station(&mut self, id: StationIdentifier, name: &str) -> Station {
        let station = Station::new(id.get(), name);
        self.repository.save_station(station.clone());

        for mut line in self.repository.all_lines() {
            if line.refresh_station(&station) {
                debug!("line {}: station {id} is now {name}", line.id);
                self.repository.save_line(line);
            }
        }

        station
    }

    /// Create a line, or rename and recolor it if it already exists
    ///
    /// Sections of an existing line are kept.
    pub fn upsert_line(&mut self, id: LineIdentifier, name: &str, color: &str) -> Line {
        let line = match self.repository.find_line(id) {
            Some(mut line) => {
                line.update(name, color);
                line
            }
            None => Line::new(id.get(), name, color),
        };
        self.repository.save_line(line.clone());
        line
    }

    // ---- Edits ----

    pub fn add_section(
        &mut self,
        line_id: LineIdentifier,
        request: SectionRegistrationRequest,
    ) -> Result<()> {
        request.validate()?;

        let mut line = self.line(line_id)?;
        let up_station = self.station(request.up_station_id())?;
        let down_station = self.station(request.down_station_id())?;

        line.add_section(up_station, down_station, request.distance)?;
        debug!(
            "line {line_id}: now {} sections, {} long",
            line.sections().len(),
            line.total_distance()
        );

        self.repository.save_line(line);
        Ok(())
    }

    /// Remove the last section of a line
    ///
    /// An empty line reports `EmptyChain` before the station id is resolved.
    pub fn delete_section(
        &mut self,
        line_id: LineIdentifier,
        station_id: StationIdentifier,
    ) -> Result<()> {
        let mut line = self.line(line_id)?;
        if line.sections().is_empty() {
            return Err(SectionError::EmptyChain);
        }
        let station = self.station(station_id)?;

        line.delete_section(&station)?;

        self.repository.save_line(line);
        Ok(())
    }

    // ---- Queries ----

    pub fn line(&self, line_id: LineIdentifier) -> Result<Line> {
        self.repository
            .find_line(line_id)
            .ok_or(SectionError::LineNotFound(line_id))
    }

    pub fn start_endpoint(&self, line_id: LineIdentifier) -> Result<Option<Station>> {
        Ok(self.line(line_id)?.start_station().cloned())
    }

    pub fn end_endpoint(&self, line_id: LineIdentifier) -> Result<Station> {
        self.line(line_id)?.end_station().cloned()
    }

    pub fn all_stations(&self, line_id: LineIdentifier) -> Result<Vec<Station>> {
        Ok(self.line(line_id)?.stations())
    }

    fn station(&self, id: StationIdentifier) -> Result<Station> {
        self.repository
            .find_station(id)
            .ok_or(SectionError::StationNotFound(id))
    }
}
