//! Storage seam for lines and stations.
//!
//! The section logic never talks to storage itself. Callers load a line
//! through a repository, edit it, and hand the result back.
//! Implementations can be in-memory, database-backed, or remote.

use crate::identifiers::*;
use crate::models::line::Line;
use crate::models::types::Station;

/// Where lines and stations live between edits
///
/// Callers must not run two edits on the same line at once; nothing here
/// locks.
pub trait LineRepository {
    // ---- Stations ----
    fn find_station(&self, id: StationIdentifier) -> Option<Station>;
    fn save_station(&mut self, station: Station);

    // ---- Lines ----
    fn find_line(&self, id: LineIdentifier) -> Option<Line>;

    /// Store the line, replacing any previous version with the same id
    fn save_line(&mut self, line: Line);

    fn all_lines(&self) -> Vec<Line>;
}
