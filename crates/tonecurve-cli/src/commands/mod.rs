//! Command implementations for tonectl

pub mod lut;
pub mod replay;
pub mod sample;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tonecurve::LutStrategy;

/// Global options every command needs.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub json: bool,
    pub config: Option<&'a std::path::Path>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Natural cubic spline through the points
    Spline,
    /// Straight segments between the points
    Linear,
}

impl From<StrategyArg> for LutStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Spline => LutStrategy::Spline,
            StrategyArg::Linear => LutStrategy::Linear,
        }
    }
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Size of both editor axes
    #[arg(long)]
    pub axis_size: Option<f32>,

    /// Number of spline samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// LUT construction strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Where the control points come from.
#[derive(Args, Debug, Clone, Default)]
pub struct CurveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Control points as "x,y x,y ..." in curve space
    #[arg(long, conflicts_with = "file", allow_hyphen_values = true)]
    pub points: Option<String>,

    /// JSON file holding an array of {"x": .., "y": ..} points
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Reject points outside the axes instead of clamping them
    #[arg(long)]
    pub strict: bool,
}
