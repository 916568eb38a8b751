use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::{debug, error};

use hall_request_assigner::debug::print_status;
use hall_request_assigner::{output_to_json, HRAInput, HallRequestAssigner};
use shared_resources::config::{AssignerConfig, ClearRequestVariant};
use shared_resources::{AssignerError, ConfigError};

/// Assigns pending hall calls to elevator cars.
///
/// Reads a JSON document with `hallRequests` and `states`, writes one
/// `[up, down]` row per floor for every car to stdout.
#[derive(Parser, Debug)]
#[command(name = "hall_request_assigner", version)]
struct Args {
    /// Request document as JSON (reads stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Configuration file, overriding config.json and _config.json lookup
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time to travel between two adjacent floors, in milliseconds
    #[arg(long = "travelDuration")]
    travel_duration: Option<u64>,

    /// Time the door stays open at a stop, in milliseconds
    #[arg(long = "doorOpenDuration")]
    door_open_duration: Option<u64>,

    /// Which waiting passengers board at a stop: all or inDirn
    #[arg(long = "clearRequestType")]
    clear_request_type: Option<ClearRequestVariant>,

    /// Echo each car's cab requests as a third column
    #[arg(long = "includeCab")]
    include_cab: bool,

    /// Deadline for the exhaustive search, in milliseconds
    #[arg(long)]
    budget: Option<u64>,

    /// Largest search space enumerated exhaustively before falling back to greedy
    #[arg(long)]
    threshold: Option<u64>,

    /// Worker threads for the exhaustive search, 0 for one per core
    #[arg(long)]
    workers: Option<usize>,

    /// Print the hall calls and the assignment as a table on stderr
    #[arg(long)]
    table: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Assigner(#[from] AssignerError),

    #[error("could not serialize assignment: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RunError {
    fn exit_code(&self) -> u8 {
        match self {
            RunError::Assigner(AssignerError::InvalidState(_)) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", report(&e));
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> Result<(), RunError> {
    let config = apply_overrides(AssignerConfig::load(args.config.as_deref())?, &args)?;
    debug!(?config, "effective configuration");

    let document = match args.input.clone() {
        Some(document) => document,
        None => {
            let mut document = String::new();
            io::stdin().read_to_string(&mut document)?;
            document
        }
    };

    let input = HRAInput::from_json(&document)?;
    let assigner = HallRequestAssigner::new(config);
    let output = if args.table {
        let snapshot = input.to_snapshot()?;
        let outcome = assigner.assign(&snapshot)?;
        print_status(&mut io::stderr(), &snapshot, &outcome)?;
        outcome.plan.to_output(assigner.config().output.include_cab)
    } else {
        assigner.assign_orders(&input)?
    };

    println!("{}", output_to_json(&output)?);
    Ok(())
}

/// One line for stderr, readable even with logging filtered out.
fn report(e: &RunError) -> String {
    format!("hall_request_assigner: {}", e)
}

fn apply_overrides(mut config: AssignerConfig, args: &Args) -> Result<AssignerConfig, ConfigError> {
    if let Some(travel) = args.travel_duration {
        if travel == 0 {
            return Err(ConfigError::InvalidValue {
                key: "travelDuration",
                reason: String::from("must be positive"),
            });
        }
        config.simulation.travel_duration = Duration::from_millis(travel);
    }
    if let Some(door) = args.door_open_duration {
        config.simulation.door_open_duration = Duration::from_millis(door);
    }
    if let Some(variant) = args.clear_request_type {
        config.simulation.clear_request_variant = variant;
    }
    if args.include_cab {
        config.output.include_cab = true;
    }
    if let Some(budget) = args.budget {
        config.search.budget = Duration::from_millis(budget);
    }
    if let Some(threshold) = args.threshold {
        if threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "threshold",
                reason: String::from("must be positive"),
            });
        }
        config.search.exhaustive_threshold = threshold;
    }
    if let Some(workers) = args.workers {
        config.search.workers = workers;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let args = Args::parse_from([
            "hall_request_assigner",
            "--travelDuration",
            "1000",
            "--clearRequestType",
            "all",
            "--includeCab",
            "--workers",
            "2",
        ]);
        let config = apply_overrides(AssignerConfig::default(), &args).unwrap();

        assert_eq!(config.simulation.travel_duration, Duration::from_millis(1000));
        assert_eq!(config.simulation.door_open_duration, Duration::from_millis(3000));
        assert_eq!(config.simulation.clear_request_variant, ClearRequestVariant::All);
        assert!(config.output.include_cab);
        assert_eq!(config.search.workers, 2);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let args = Args::parse_from(["hall_request_assigner", "--threshold", "0"]);
        assert!(apply_overrides(AssignerConfig::default(), &args).is_err());
    }

    #[test]
    fn error_report_names_the_cause() {
        let err = RunError::from(AssignerError::NoFeasibleAssignment {
            floor: 4,
            call: shared_resources::Call::HallDown,
        });
        assert_eq!(
            report(&err),
            "hall_request_assigner: no elevator can serve the hall down call at floor 4"
        );
    }

    #[test]
    fn invalid_state_exits_with_two() {
        let err = RunError::from(AssignerError::from(shared_resources::StateError::NoFloors));
        assert_eq!(err.exit_code(), 2);
    }
}
