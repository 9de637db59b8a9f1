//! Command-line interface
//!
//! `randonaut LATITUDE LONGITUDE [-r RADIUS] [-p POINTS] [-v]` prints the
//! attractor point near the given position.

use crate::config::Config;
use crate::constants::qrng::BATCH_SIZE;
use crate::coord::attractor::{self, AttractorRequest, PipelineSettings};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::qrng::pseudo::SeededPseudoBackend;
use crate::qrng::{available_backends, get_backend, QrngBackend};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Gets quantum random numbers from the ANU QRNG, converts them to coordinates
/// and returns the point within the radius where their gaussian kernel density
/// estimate is highest
#[derive(Parser, Debug)]
#[command(name = "randonaut")]
#[command(version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Starting position latitude
    #[arg(value_name = "LATITUDE", required_unless_present_any = ["list_backends", "list_formats"])]
    pub latitude: Option<f64>,

    /// Starting position longitude
    #[arg(value_name = "LONGITUDE", required_unless_present_any = ["list_backends", "list_formats"])]
    pub longitude: Option<f64>,

    /// Max radius from starting position in meters
    #[arg(short = 'r', value_name = "RADIUS")]
    pub radius: Option<u32>,

    /// Number of random integers to base the KDE on (must be divisible by 1024)
    #[arg(short = 'p', value_name = "POINTS", value_parser = parse_points)]
    pub points: Option<usize>,

    /// Verbose logging (replaces the result line)
    #[arg(short = 'v')]
    pub verbose: bool,

    /// QRNG backend: anu or pseudo
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Seed a pseudo-random backend instead (reproducible, not quantum)
    #[arg(long, conflicts_with = "backend")]
    pub seed: Option<u64>,

    /// Output format: text or json
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List available QRNG backends
    #[arg(short = 'B', long = "list-backends")]
    pub list_backends: bool,

    /// List available output formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Accept only positive multiples of the QRNG batch size
fn parse_points(s: &str) -> std::result::Result<usize, String> {
    let points: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a whole number", s))?;
    if points == 0 || points % BATCH_SIZE != 0 {
        return Err(format!("POINTS must be divisible by {}", BATCH_SIZE));
    }
    Ok(points)
}

/// Install the tracing subscriber
///
/// Verbose runs log bare messages to stdout; otherwise only warnings reach
/// stderr so the result line is the only output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false);

    if verbose {
        builder.with_level(false).with_writer(std::io::stdout).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Handle list flags first
    if cli.list_backends {
        list_backends();
        return Ok(());
    }
    if cli.list_formats {
        list_formats();
        return Ok(());
    }

    let (Some(latitude), Some(longitude)) = (cli.latitude, cli.longitude) else {
        return Err(Error::Validation(
            "LATITUDE and LONGITUDE are required".to_string(),
        ));
    };

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Points from the config file skip clap's check, so validate them here too
    let points = match cli.points {
        Some(points) => points,
        None => parse_points(&config.defaults.points.to_string()).map_err(Error::Config)?,
    };
    let radius = cli.radius.unwrap_or(config.defaults.radius);
    let format = cli.format.clone().unwrap_or_else(|| config.defaults.format.clone());

    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let request = AttractorRequest::new(
        Coordinates::new(latitude, longitude),
        f64::from(radius),
        points,
    );
    request.validate()?;

    let settings = PipelineSettings::from_config(&config)?;
    let backend: Box<dyn QrngBackend> = match (cli.seed, &cli.backend) {
        (Some(seed), _) => Box::new(SeededPseudoBackend::new(seed)),
        (None, Some(name)) => get_backend(name, config.anu_api_key(), config.request_timeout())?,
        (None, None) => get_backend(
            &config.defaults.backend,
            config.anu_api_key(),
            config.request_timeout(),
        )?,
    };

    info!(
        "Searching {} m around {} with {} samples from {}",
        radius,
        request.center,
        points,
        backend.name()
    );

    let result = attractor::run(&request, backend.as_ref(), &settings)?;
    info!("Attractor is {:.1} m from the start", result.distance);

    if !cli.verbose {
        println!("{}", formatter.format(&result)?);
    }

    Ok(())
}

/// Print available QRNG backends
fn list_backends() {
    println!("Available QRNG backends:");
    for backend in available_backends() {
        println!("  {:6} - {}", backend.name, backend.description);
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
