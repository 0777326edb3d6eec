use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use transit_search_core::models::{ServiceTime, Stop};
use transit_search_core::spatial::{filter_stops, StopIndex};
use transit_search_core::trips::{build_trip_graph, LinkerConfig};

mod input;
mod output;

use input::{read_region, read_stops, read_trip_payload};
use output::{write_json, write_stops_geojson, write_trip_graph};

#[derive(Parser, Debug)]
#[command(
    name = "transit-search",
    author,
    version,
    about = "Filter stops by region and build trip graphs from transit search payloads",
    long_about = "Offline front end for the transit search transforms.\n\n\
                  `stops` keeps the stops that fall inside a drawn GeoJSON polygon. \
                  `trips` merges duplicate trip segments from a live trip search \
                  payload and nests connecting trips as transfers."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Keep the stops inside a region
    Stops {
        /// JSON array of stops with `stop_lon`/`stop_lat`
        #[arg(short, long)]
        stops: PathBuf,

        /// GeoJSON Polygon (or Feature/FeatureCollection containing one)
        #[arg(short, long)]
        region: PathBuf,

        /// Output JSON file for the matching stops
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the matching stops as GeoJSON points to this file
        #[arg(long)]
        geojson_output: Option<PathBuf>,

        /// Query through an R-tree instead of a linear scan
        #[arg(long)]
        indexed: bool,
    },

    /// Build the trip graph from a trip search payload
    Trips {
        /// JSON trip payload (arbitrarily nested arrays of segments)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file for the trip graph
        #[arg(short, long)]
        output: PathBuf,

        /// Let a trip that loops back to its own start be its own transfer
        #[arg(long)]
        allow_self_transfers: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    match args.command {
        Command::Stops {
            stops,
            region,
            output,
            geojson_output,
            indexed,
        } => run_stops(&stops, &region, &output, geojson_output.as_deref(), indexed),
        Command::Trips {
            input,
            output,
            allow_self_transfers,
        } => run_trips(&input, &output, LinkerConfig { allow_self_transfers }),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Input file does not exist: {}", path.display());
    }
    Ok(())
}

fn run_stops(
    stops_path: &Path,
    region_path: &Path,
    output_path: &Path,
    geojson_path: Option<&Path>,
    indexed: bool,
) -> Result<()> {
    ensure_exists(stops_path)?;
    ensure_exists(region_path)?;

    log::info!("Stops: {}", stops_path.display());
    log::info!("Region: {}", region_path.display());

    let region = read_region(region_path)?;
    log::debug!("Region ring has {} vertices", region.exterior().0.len());

    let stops = read_stops(stops_path)?;
    log::info!("Loaded {} stops", stops.len());

    let inside: Vec<Stop> = if indexed {
        let index = StopIndex::new(&stops);
        log::debug!("Indexed {} stops", index.len());
        index.within(&region).into_iter().cloned().collect()
    } else {
        filter_stops(&stops, &region)
    };
    log::info!("{} of {} stops inside region", inside.len(), stops.len());

    write_json(&inside, output_path)?;
    if let Some(path) = geojson_path {
        write_stops_geojson(&inside, path)?;
    }

    log::info!("Output written to: {}", output_path.display());
    Ok(())
}

fn run_trips(input_path: &Path, output_path: &Path, config: LinkerConfig) -> Result<()> {
    ensure_exists(input_path)?;

    log::info!("Trips: {}", input_path.display());

    let payload = read_trip_payload(input_path)?;
    log::info!("Loaded {} trip segments", payload.len());

    let graph = build_trip_graph(payload, &config);

    for trip in &graph {
        let duration = match (&trip.departure_time, &trip.arrival_time) {
            (Some(dep), Some(arr)) => {
                match (dep.parse::<ServiceTime>(), arr.parse::<ServiceTime>()) {
                    (Ok(dep), Ok(arr)) => format!("{} min", dep.minutes_until(arr)),
                    _ => "unknown duration".to_string(),
                }
            }
            _ => "unknown duration".to_string(),
        };
        log::debug!(
            "  {} {} -> {} ({}, {} transfers)",
            trip.route_id,
            trip.start_stop_id,
            trip.end_stop_id,
            duration,
            trip.transfers.len()
        );
    }

    write_trip_graph(&graph, output_path)?;

    log::info!("Output written to: {}", output_path.display());
    Ok(())
}
