//! tonectl - Tone Curve CLI
//!
//! Builds 256-entry tone LUTs from control points, prints the fitted curve
//! and replays recorded editing sessions.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod input;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigArgs, Context, CurveArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "tonectl")]
#[command(about = "Tone curve CLI - build and inspect 8-bit tone LUTs")]
#[command(version)]
#[command(long_about = "
tonectl fits a natural cubic spline through a set of control points and
builds the 256-entry lookup table used to remap 8-bit pixel levels.

Curve space follows screen conventions: x runs over [0, axis] and y over
[-axis, 0], so (0,0) is black and (axis,-axis) is white.
Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Curve configuration file (JSON)
    #[arg(long, global = true, env = "TONECTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print the 256-entry LUT
    Lut(CurveArgs),

    /// Print the clipped spline samples
    Sample(CurveArgs),

    /// Replay a recorded editing session
    Replay {
        /// Session file (JSON)
        session: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("tonectl={log_level},tonecurve={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let ctx = Context {
        json: cli.json,
        config: cli.config.as_deref(),
    };
    match &cli.command {
        Commands::Lut(args) => commands::lut::execute(args, ctx),
        Commands::Sample(args) => commands::sample::execute(args, ctx),
        Commands::Replay { session, config } => commands::replay::execute(session, config, ctx),
    }
}
