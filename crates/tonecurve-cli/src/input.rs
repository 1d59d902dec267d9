//! Configuration and control-point loading

use std::fs;
use std::path::Path;

use tonecurve::{ControlPoint, CurveConfig, CurveEditor};
use tracing::{debug, info};

use crate::commands::{ConfigArgs, CurveArgs};
use crate::error::CliError;

/// Load the configuration file (if any) and apply flag overrides.
pub fn load_config(path: Option<&Path>, overrides: &ConfigArgs) -> Result<CurveConfig, CliError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let config: CurveConfig = serde_json::from_str(&content)?;
            info!(path = %path.display(), "configuration loaded");
            config
        }
        None => CurveConfig::default(),
    };
    apply_overrides(config, overrides)
}

/// Apply flag overrides and validate the result.
pub fn apply_overrides(mut config: CurveConfig, overrides: &ConfigArgs) -> Result<CurveConfig, CliError> {
    if let Some(axis_size) = overrides.axis_size {
        config.axis_size = axis_size;
    }
    if let Some(samples) = overrides.samples {
        config.sample_count = samples;
    }
    if let Some(strategy) = overrides.strategy {
        config.strategy = strategy.into();
    }

    config.validate()?;
    debug!(?config, "effective configuration");
    Ok(config)
}

/// Parse `"x,y x,y ..."`.
pub fn parse_points(text: &str) -> Result<Vec<ControlPoint>, CliError> {
    text.split_whitespace().map(parse_point).collect()
}

fn parse_point(token: &str) -> Result<ControlPoint, CliError> {
    let invalid = || CliError::InvalidArgument(format!("invalid point '{token}', expected x,y"));
    let (x, y) = token.split_once(',').ok_or_else(invalid)?;
    let x: f32 = x.trim().parse().ok().ok_or_else(invalid)?;
    let y: f32 = y.trim().parse().ok().ok_or_else(invalid)?;
    Ok(ControlPoint::new(x, y))
}

/// Read a JSON array of points.
pub fn read_points_file(path: &Path) -> Result<Vec<ControlPoint>, CliError> {
    let content = fs::read_to_string(path)?;
    let points: Vec<ControlPoint> = serde_json::from_str(&content)?;
    info!(path = %path.display(), count = points.len(), "points loaded");
    Ok(points)
}

/// Points named on the command line, if any.
///
/// In strict mode every point must already lie inside the axes.
pub fn resolve_points(args: &CurveArgs, config: &CurveConfig) -> Result<Option<Vec<ControlPoint>>, CliError> {
    let points = match (&args.points, &args.file) {
        (Some(text), _) => parse_points(text)?,
        (None, Some(path)) => read_points_file(path)?,
        (None, None) => return Ok(None),
    };

    if args.strict {
        let bounds = config.bounds()?;
        for point in &points {
            bounds.check(*point)?;
        }
    }
    Ok(Some(points))
}

/// Editor seeded from the command-line points, or the default diagonal.
pub fn build_editor(args: &CurveArgs, config_path: Option<&Path>) -> Result<CurveEditor, CliError> {
    let config = load_config(config_path, &args.config)?;
    let editor = match resolve_points(args, &config)? {
        Some(points) => CurveEditor::with_points(config, points)?,
        None => CurveEditor::new(config)?,
    };
    Ok(editor)
}
