//! LunarView CLI
//!
//! Generate a Moon orbit, decimate it, and play it back in the terminal.

use clap::{Parser, Subcommand};
use lunarview_core::{LunarError, PlaybackReport, Result};
use lunarview_env::SystemClock;
use lunarview_sim::{pipeline, LunarConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// LunarView trajectory pipeline
#[derive(Parser, Debug)]
#[command(name = "lunarview")]
#[command(about = "Simulate, decimate and animate a Moon trajectory", long_about = None)]
struct Args {
    /// JSON configuration file (missing fields take their defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Integrate the Earth-Moon orbit and write every position (m)
    Simulate {
        /// Output table
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of positions to generate
        #[arg(long)]
        steps: Option<usize>,

        /// Integration step in seconds
        #[arg(long)]
        dt: Option<f64>,
    },

    /// Keep one row out of every N and round each value
    Decimate {
        /// Input table
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output table (created or overwritten)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sampling interval N
        #[arg(short = 'n', long)]
        interval: Option<usize>,

        /// Decimal digits kept
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Play the rounded trajectory back against the Earth
    Animate {
        /// Input table of (x, y) rows in meters
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Milliseconds between frames
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Viewport margin in km
        #[arg(long)]
        padding: Option<f64>,

        /// Start over after the last frame
        #[arg(long)]
        repeat: bool,

        /// Log frames instead of drawing them
        #[arg(long)]
        headless: bool,
    },
}

impl Command {
    /// Applies command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut LunarConfig) {
        match self {
            Command::Simulate { output, steps, dt } => {
                let sim = &mut config.simulation;
                if let Some(output) = output {
                    sim.output_file = output.clone();
                }
                if let Some(steps) = steps {
                    sim.orbit.steps = *steps;
                }
                if let Some(dt) = dt {
                    sim.orbit.time_step_s = *dt;
                }
            }
            Command::Decimate {
                input,
                output,
                interval,
                precision,
            } => {
                let sampler = &mut config.sampler;
                if let Some(input) = input {
                    sampler.input_file = input.clone();
                }
                if let Some(output) = output {
                    sampler.output_file = output.clone();
                }
                if let Some(interval) = interval {
                    sampler.sampling_interval = *interval;
                }
                if let Some(precision) = precision {
                    sampler.precision = *precision;
                }
            }
            Command::Animate {
                input,
                interval_ms,
                padding,
                repeat,
                ..
            } => {
                let animator = &mut config.animator;
                if let Some(input) = input {
                    animator.input_file = input.clone();
                }
                if let Some(interval_ms) = interval_ms {
                    animator.frame_interval_ms = *interval_ms;
                }
                if let Some(padding) = padding {
                    animator.viewport_padding = *padding;
                }
                if *repeat {
                    animator.repeat = true;
                }
            }
        }
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging (stderr, so stdout stays free for results).
    // RUST_LOG takes precedence over --verbose.
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let mut config = match LunarConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&args, "config", &e),
    };
    args.command.apply(&mut config);
    if let Err(e) = config.validate() {
        exit_with(&args, "config", &e);
    }

    match &args.command {
        Command::Simulate { .. } => match pipeline::simulate(&config.simulation) {
            Ok(report) => {
                if args.json {
                    print_json("simulate", &report);
                } else {
                    println!("Data saved to {} successfully.", report.output.display());
                }
            }
            Err(e) => exit_with(&args, "simulate", &e),
        },

        Command::Decimate { .. } => match pipeline::decimate(&config.sampler) {
            Ok(report) => {
                if args.json {
                    print_json("decimate", &report);
                } else {
                    println!(
                        "Filtered and rounded data has been saved to {}",
                        report.output.display()
                    );
                }
            }
            Err(e) => exit_with(&args, "decimate", &e),
        },

        Command::Animate { headless, .. } => {
            let result = if *headless {
                pipeline::animate_headless(&config.animator, SystemClock::new())
            } else {
                animate_interactive(&config)
            };
            match result {
                Ok(report) => {
                    if args.json {
                        print_json("animate", &report);
                    } else {
                        info!(
                            "Showed {} frames{}",
                            report.frames_shown,
                            if report.completed { "" } else { " (closed early)" }
                        );
                    }
                }
                Err(e) => exit_with(&args, "animate", &e),
            }
        }
    }
}

#[cfg(feature = "dashboard")]
fn animate_interactive(config: &LunarConfig) -> Result<PlaybackReport> {
    pipeline::animate_interactive(&config.animator)
}

#[cfg(not(feature = "dashboard"))]
fn animate_interactive(config: &LunarConfig) -> Result<PlaybackReport> {
    info!("Terminal viewer not available (compile with --features dashboard), running headless");
    pipeline::animate_headless(&config.animator, SystemClock::new())
}

#[derive(Serialize)]
struct JsonOutcome<'a, T: Serialize> {
    command: &'a str,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_json<T: Serialize>(command: &str, report: &T) {
    let outcome = JsonOutcome {
        command,
        status: "ok",
        report: Some(report),
        error: None,
    };
    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize report: {}", e),
    }
}

/// Reports `err` and exits with status 1.
fn exit_with(args: &Args, command: &str, err: &LunarError) -> ! {
    if args.json {
        let outcome: JsonOutcome<'_, ()> = JsonOutcome {
            command,
            status: "error",
            report: None,
            error: Some(err.to_string()),
        };
        if let Ok(json) = serde_json::to_string_pretty(&outcome) {
            println!("{}", json);
        }
    } else {
        match err {
            LunarError::InputNotFound { .. } => println!("Error: {}", err),
            LunarError::ValueParse { .. } if command == "decimate" => {
                println!("Error processing the data: {}", err)
            }
            _ => eprintln!("Error: {}", err),
        }
    }
    std::process::exit(1);
}
