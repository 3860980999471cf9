use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use subway_sections::prelude::*;

/// On-disk shape of a subway network: stations plus lines with their sections
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl NetworkFile {
    pub fn from_repository(repository: &InMemoryLineRepository) -> Self {
        Self {
            stations: repository.all_stations(),
            lines: repository.all_lines(),
        }
    }

    pub fn into_repository(self) -> InMemoryLineRepository {
        InMemoryLineRepository::from_data(self.stations, self.lines)
    }
}

/// Read a network file; sections are re-validated while parsing
pub fn read_network(path: &Path) -> Result<NetworkFile> {
    log::debug!("Reading network from {}", path.display());

    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let network: NetworkFile = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    log::debug!(
        "Loaded {} stations, {} lines",
        network.stations.len(),
        network.lines.len()
    );
    Ok(network)
}

pub fn write_network(network: &NetworkFile, path: &Path) -> Result<()> {
    log::info!(
        "Writing {} stations, {} lines to {}",
        network.stations.len(),
        network.lines.len(),
        path.display()
    );

    let json_string =
        serde_json::to_string_pretty(network).context("Failed to serialize network")?;

    std::fs::write(path, json_string)
        .with_context(|| format!("Failed to write network to {}", path.display()))?;

    Ok(())
}
