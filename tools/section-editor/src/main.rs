use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use subway_sections::prelude::*;

mod network;

use network::{read_network, write_network, NetworkFile};

#[derive(Parser, Debug)]
#[command(
    name = "section-editor",
    author,
    version,
    about = "Edit the sections of subway lines stored in a JSON network file",
    long_about = "Loads a network file (stations and lines), applies one edit, \
                  and writes the file back.\n\n\
                  New sections either extend a line at one of its ends or split \
                  an existing section around a new station. Only the last section \
                  of a line can be removed."
)]
struct Args {
    /// Network JSON file
    #[arg(short, long)]
    file: PathBuf,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a line, or rename and recolor an existing one
    Init {
        #[arg(long)]
        line: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: String,
    },

    /// Register or rename a station
    Station {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        name: String,
    },

    /// Add a section between two stations
    Add {
        #[arg(long)]
        line: u64,
        #[arg(long)]
        up: u64,
        #[arg(long)]
        down: u64,
        #[arg(long)]
        distance: u32,
    },

    /// Remove the last section of a line, ending at the given station
    Delete {
        #[arg(long)]
        line: u64,
        #[arg(long)]
        station: u64,
    },

    /// Print the stations of a line in travel order
    Show {
        #[arg(long)]
        line: u64,
    },
}

impl Command {
    /// Setup commands may start from a missing file
    fn creates_network(&self) -> bool {
        matches!(self, Command::Init { .. } | Command::Station { .. })
    }

    fn mutates(&self) -> bool {
        !matches!(self, Command::Show { .. })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let network = if args.file.exists() {
        read_network(&args.file).context("Failed to load network")?
    } else if args.command.creates_network() {
        log::info!("{} does not exist, starting an empty network", args.file.display());
        NetworkFile::default()
    } else {
        bail!("Network file does not exist: {}", args.file.display());
    };

    let mut service = SectionService::new(network.into_repository());

    match &args.command {
        Command::Init { line, name, color } => {
            let line = service.upsert_line(LineIdentifier::new(*line), name, color);
            log::info!("Line {} ({}): {} sections", line.id, line.name, line.sections().len());
        }
        Command::Station { id, name } => {
            if *id == 0 {
                bail!("Station id must be positive");
            }
            let station = service.register_station(StationIdentifier::new(*id), name);
            log::info!("Station {} ({})", station.id, station.name);
        }
        Command::Add {
            line,
            up,
            down,
            distance,
        } => {
            let line_id = LineIdentifier::new(*line);
            service
                .add_section(line_id, SectionRegistrationRequest::new(*up, *down, *distance))
                .with_context(|| format!("Failed to add section {up} -> {down} to line {line}"))?;
            log::info!("Added section {up} -> {down} ({distance}) to line {line}");
        }
        Command::Delete { line, station } => {
            service
                .delete_section(LineIdentifier::new(*line), StationIdentifier::new(*station))
                .with_context(|| format!("Failed to remove station {station} from line {line}"))?;
            log::info!("Removed the section ending at {station} from line {line}");
        }
        Command::Show { line } => {
            print_line(&service.line(LineIdentifier::new(*line))?);
        }
    }

    if args.command.mutates() {
        write_network(&NetworkFile::from_repository(service.repository()), &args.file)
            .context("Failed to save network")?;
    }

    Ok(())
}

fn print_line(line: &Line) {
    println!(
        "{} ({}) - {} sections, {} total",
        line.name,
        line.color,
        line.sections().len(),
        line.total_distance()
    );

    let stations = line.stations();
    if stations.is_empty() {
        println!("  (no stations)");
        return;
    }

    for (i, station) in stations.iter().enumerate() {
        println!("  {:>3}. [{}] {}", i + 1, station.id, station.name);
    }
}
