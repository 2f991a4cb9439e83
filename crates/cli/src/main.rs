// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

mod batch;
mod prompt;
mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use coilcalc_config::{CoilSet, Settings, MAX_DECIMAL_PLACES};
use coilcalc_core::{export_antennas, ExportTarget, InductanceRange};

const EXIT_PASS: u8 = 0;
const EXIT_RANGE_FAIL: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

fn parse_decimal_places(s: &str) -> Result<usize, String> {
    let places: usize = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid decimal places '{}': {}", s, e))?;
    if places > MAX_DECIMAL_PLACES {
        return Err(format!(
            "Decimal places must be at most {}, got {}",
            MAX_DECIMAL_PLACES, places
        ));
    }
    Ok(places)
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Planar coil antenna inductance calculator",
    long_about = None
)]
struct Cli {
    /// Path to a settings file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Warn about coils outside the configured inductance range
    #[arg(long, global = true)]
    check_range: bool,

    /// Fractional digits for displayed inductances (overrides settings)
    #[arg(long, global = true, value_parser = parse_decimal_places)]
    decimal_places: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute every antenna listed in a coil set file (YAML).
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Path to the coil set (YAML)
    #[arg(short = 'i', long)]
    coils: PathBuf,

    /// Export to `<OUTPUT>_round.csv` / `<OUTPUT>_square.csv`
    #[arg(short, long)]
    output: Option<String>,

    /// Print one JSON object per antenna instead of `key: value` lines
    #[arg(long)]
    json: bool,
}

/// Settings resolved from the config file and command-line overrides.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub decimal_places: usize,
    /// `Some` when the inductance range check is enabled.
    pub range: Option<InductanceRange>,
    pub export_dir: PathBuf,
}

impl RunOptions {
    fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let settings = match &cli.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        let range = if settings.inductance_range.enabled || cli.check_range {
            let (min, max) = settings.inductance_range.bounds()?;
            Some(InductanceRange::new(min, max))
        } else {
            None
        };

        Ok(Self {
            decimal_places: cli.decimal_places.unwrap_or(settings.decimal_places),
            range,
            export_dir: settings.export.directory,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so prompts on stdout stay readable.
    let level = if cli.trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = match RunOptions::resolve(&cli) {
        Ok(options) => options,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    match cli.command {
        Some(Commands::Batch(args)) => run_batch(args, &options),
        None => run_interactive(options),
    }
}

fn run_interactive(options: RunOptions) -> ExitCode {
    info!("Starting CoilCalc session");
    if let Some(range) = &options.range {
        info!("Inductance range check enabled: {}", range);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = session::Session::new(stdin.lock(), stdout.lock(), options);

    match session.run() {
        Ok(()) => ExitCode::from(EXIT_PASS),
        Err(e) => {
            error!("Session aborted: {}", e);
            ExitCode::from(EXIT_RUNTIME_ERROR)
        }
    }
}

fn run_batch(args: BatchArgs, options: &RunOptions) -> ExitCode {
    let set = match CoilSet::from_file(&args.coils) {
        Ok(set) => set,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    info!("Loaded {} antenna(s) from {:?}", set.antennas.len(), args.coils);

    // Check the target up front so nothing is printed for a run that cannot export.
    let target = args
        .output
        .as_deref()
        .map(|name| ExportTarget::new(&options.export_dir, name));
    if let Some(target) = &target {
        if target.stem().is_empty() || !target.is_available() {
            error!(
                "Export target '{}' is invalid or already exists in {:?}",
                target.stem(),
                options.export_dir
            );
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    }

    let report = match batch::evaluate(&set, options, args.json, std::io::stdout().lock()) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to write results: {}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    };

    if let Some(target) = &target {
        match export_antennas(target, &report.antennas, options.decimal_places) {
            Ok(summary) => info!(
                "Exported {} antenna(s) into {} file(s)",
                summary.total_rows(),
                summary.files.len()
            ),
            Err(e) => {
                error!("Unable to create files: {:#}", e);
                return ExitCode::from(EXIT_RUNTIME_ERROR);
            }
        }
    }

    if report.out_of_range > 0 {
        error!(
            "{} of {} antenna(s) outside the inductance range",
            report.out_of_range,
            report.antennas.len()
        );
        return ExitCode::from(EXIT_RANGE_FAIL);
    }

    ExitCode::from(EXIT_PASS)
}
