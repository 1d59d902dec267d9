//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;
use tonecurve::{ControlPoint, ToneLut};

use crate::error::CliError;

/// Entries per row of the human-readable LUT grid.
const ROW_WIDTH: usize = 16;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print a LUT as a 16x16 grid or a JSON array.
pub fn print_lut(lut: &ToneLut, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "lut": lut
            }),
            "LUT",
        );
    } else {
        println!("{}", "Tone LUT:".bold());
        print!("{}", format_lut_grid(lut));
    }
}

/// Print sampled curve points.
pub fn print_samples(samples: &[ControlPoint], json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "samples": samples
            }),
            "samples",
        );
    } else {
        println!("{} {}", "Curve samples:".bold(), samples.len());
        for point in samples {
            println!("  {:>9.3} {:>9.3}", point.x, point.y);
        }
    }
}

/// Print control points in human format.
pub fn print_points(points: &[ControlPoint]) {
    println!("{}", "Control points:".bold());
    for (index, point) in points.iter().enumerate() {
        println!(
            "  {} ({:.2}, {:.2})",
            format!("[{index}]").dimmed(),
            point.x,
            point.y
        );
    }
}

/// Print any serializable payload as pretty JSON.
pub fn print_json<T: Serialize>(value: &T, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {what} as JSON: {e}"),
    }
}

/// 16 rows of 16 right-aligned levels, each prefixed by its first input level.
pub fn format_lut_grid(lut: &ToneLut) -> String {
    let mut out = String::new();
    for (row, chunk) in lut.table().chunks(ROW_WIDTH).enumerate() {
        let values: Vec<String> = chunk.iter().map(|v| format!("{v:>3}")).collect();
        out.push_str(&format!(
            "  {} {}\n",
            format!("{:>3}:", row * ROW_WIDTH).dimmed(),
            values.join(" ")
        ));
    }
    out
}

fn error_type_name(error: &Error) -> &'static str {
    error
        .downcast_ref::<CliError>()
        .map_or("Error", CliError::type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_sixteen_rows() {
        colored::control::set_override(false);
        let grid = format_lut_grid(&ToneLut::identity());
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(
            lines.first().copied(),
            Some("    0:   0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15")
        );
        assert!(lines.last().is_some_and(|line| line.ends_with("254 255")));
    }

    #[test]
    fn error_type_names() {
        let err = Error::new(CliError::InvalidArgument("bad".into()));
        assert_eq!(error_type_name(&err), "InvalidArgument");
        assert_eq!(error_type_name(&anyhow::anyhow!("plain")), "Error");
    }
}
