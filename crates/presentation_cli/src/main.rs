//! Route planner CLI
//!
//! Plan multi-stop trips, estimate point-to-point routes and print
//! navigation links.

#![allow(clippy::print_stdout)]

mod render;
mod session;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::{NavigationLinkBuilder, TripPlannerService};
use clap::{Parser, Subcommand};
use domain::TripState;
use domain::value_objects::Waypoint;
use infrastructure::{AppConfig, GeocodingAdapter, init_tracing};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::session::{Reply, Session, endpoint_query, import_file};

/// Route planner CLI
#[derive(Parser)]
#[command(name = "route-planner")]
#[command(author, version, about = "Multi-stop route planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./route-planner.toml if present)
    #[arg(short, long, env = "ROUTE_PLANNER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive planning session
    ///
    /// Example: route-planner plan --csv deliveries.csv --region "North Carolina"
    Plan {
        /// Pre-load stops from a CSV file with an `Address` column
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Region appended to every address lookup
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Distance, CO2 impact and directions between two addresses
    ///
    /// Example: route-planner route "Raleigh, NC" "Durham, NC"
    Route {
        /// Starting address
        start: String,

        /// Destination address
        end: String,

        /// Region appended to both lookups
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Print a multi-stop directions link for literal waypoints
    ///
    /// Example: route-planner link me "100 Main St" "200 Oak Ave"
    Link {
        /// Waypoints in order; the first is the origin, the last the destination
        #[arg(required = true, num_args = 2..)]
        waypoints: Vec<String>,
    },

    /// Import stops from a CSV file and print the plan and its link
    ///
    /// Example: route-planner import stops.csv --start me --end "Depot, Raleigh"
    Import {
        /// CSV file with an `Address` column
        file: PathBuf,

        /// Start address (me = current location)
        #[arg(long)]
        start: Option<String>,

        /// End address
        #[arg(long)]
        end: Option<String>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

fn planner_service(
    config: &AppConfig,
    region: Option<String>,
) -> anyhow::Result<TripPlannerService> {
    let adapter = GeocodingAdapter::from_config(&config.geocoding)?;
    info!(provider = adapter.provider_name(), "Geocoder ready");
    Ok(TripPlannerService::new(Arc::new(adapter))
        .with_region_hint(region.or_else(|| config.planner.region_hint.clone())))
}

/// Import result as a printable line; a bad file leaves the trip empty
fn import_csv(path: &Path, trip: &mut TripState) -> String {
    match import_file(path, trip) {
        Ok(report) => render::ingestion(&report),
        Err(e) => format!("❌ {e}"),
    }
}

async fn run_session(mut session: Session) -> anyhow::Result<()> {
    println!("🗺️ Route planner. Type 'help' for commands.");
    println!("{}", render::plan(session.trip()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.handle_line(&line).await {
            Reply::Message(text) => println!("{text}"),
            Reply::Silent => {},
            Reply::Quit => break,
        }
    }

    println!("👋 Bye");
    Ok(())
}

fn print_link(links: &NavigationLinkBuilder, trip: &TripState) {
    match links.build_for_trip(trip) {
        Ok(link) => println!("🧭 {link}"),
        Err(e) => println!("⚠️ No navigation link: {e}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // Set up logging based on verbosity; -v flags win over the config file
    let mut telemetry = config.telemetry.clone();
    if cli.verbose > 0 {
        telemetry = telemetry.with_log_filter(log_filter_from_verbosity(cli.verbose));
    }
    init_tracing(&telemetry)?;

    let links = config.planner.to_link_builder();

    match cli.command {
        Commands::Plan { csv, region } => {
            let mut trip = TripState::new();
            if let Some(path) = csv {
                println!("{}", import_csv(&path, &mut trip));
            }
            let planner = planner_service(&config, region)?;
            run_session(Session::new(trip, planner, links)).await?;
        },

        Commands::Route { start, end, region } => {
            let planner = planner_service(&config, region)?;
            let mut trip = TripState::new();
            let route = planner.plan_two_point(&mut trip, &start, &end).await?;
            println!("{}", render::route(&route, &links));
        },

        Commands::Link { waypoints } => {
            let labels: Vec<String> = waypoints
                .iter()
                .map(|w| Waypoint::new(endpoint_query(w)).navigation_label().to_string())
                .collect();
            println!("{}", links.build(&labels)?);
        },

        Commands::Import { file, start, end } => {
            let mut trip = TripState::new();
            println!("{}", import_csv(&file, &mut trip));
            if let Some(start) = start {
                trip.set_start(&endpoint_query(&start));
            }
            if let Some(end) = end {
                trip.set_end(&endpoint_query(&end));
            }
            println!("{}", render::plan(&trip));
            print_link(&links, &trip);
        },
    }

    Ok(())
}
