//! `tonectl replay`: run a recorded editing session against the editor.

use std::fs;
use std::path::Path;

use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tonecurve::{ClickOutcome, ControlPoint, CurveConfig, CurveEditor, PointId};
use tracing::{debug, info};

use crate::commands::{ConfigArgs, Context};
use crate::error::CliError;
use crate::input;
use crate::output;

/// A recorded session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Replaces the configuration file when present.
    pub config: Option<CurveConfig>,
    /// Starting points; the default diagonal when empty.
    pub points: Vec<ControlPoint>,
    /// Gestures applied in order.
    pub events: Vec<SessionEvent>,
}

/// One editing gesture. Points are addressed by their position in x order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum SessionEvent {
    Add { x: f32, y: f32 },
    Move { index: usize, x: f32, y: f32 },
    Remove { index: usize },
    Click { x: f32, y: f32 },
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::Add { .. } => "add",
            SessionEvent::Move { .. } => "move",
            SessionEvent::Remove { .. } => "remove",
            SessionEvent::Click { .. } => "click",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Applied,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    pub index: usize,
    pub op: &'static str,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Load and replay `path`, then print every rejection and the final state.
pub fn execute(path: &Path, overrides: &ConfigArgs, ctx: Context<'_>) -> Result<()> {
    let content = fs::read_to_string(path).map_err(CliError::from)?;
    let session: Session = serde_json::from_str(&content).map_err(CliError::from)?;
    info!(
        path = %path.display(),
        events = session.events.len(),
        "session loaded"
    );

    let config = match session.config.clone() {
        Some(config) => input::apply_overrides(config, overrides)?,
        None => input::load_config(ctx.config, overrides)?,
    };
    let mut editor = if session.points.is_empty() {
        CurveEditor::new(config).map_err(CliError::from)?
    } else {
        CurveEditor::with_points(config, session.points.iter().copied()).map_err(CliError::from)?
    };

    let reports = replay(&mut editor, &session.events);
    print_report(&editor, &reports, ctx.json);
    Ok(())
}

/// Apply every event in order; rejected events leave the editor unchanged.
pub fn replay(editor: &mut CurveEditor, events: &[SessionEvent]) -> Vec<EventReport> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let (outcome, detail) = match apply(editor, event) {
                Ok(detail) => (Outcome::Applied, detail),
                Err(reason) => (Outcome::Rejected, Some(reason)),
            };
            debug!(index, op = event.name(), ?outcome, "session event replayed");
            EventReport {
                index,
                op: event.name(),
                outcome,
                detail,
            }
        })
        .collect()
}

fn apply(editor: &mut CurveEditor, event: &SessionEvent) -> Result<Option<String>, String> {
    match *event {
        SessionEvent::Add { x, y } => editor
            .add_point(x, y)
            .map(|id| Some(format!("added {id}")))
            .map_err(|e| e.to_string()),
        SessionEvent::Move { index, x, y } => {
            let id = point_at_index(editor, index)?;
            editor.move_point(id, x, y).map(|()| None).map_err(|e| e.to_string())
        }
        SessionEvent::Remove { index } => {
            let id = point_at_index(editor, index)?;
            if editor.remove_point(id) {
                Ok(Some(format!("removed {id}")))
            } else {
                Err(format!("point {index} kept: a curve needs at least 2 points"))
            }
        }
        SessionEvent::Click { x, y } => match editor.click(x, y) {
            ClickOutcome::Added(id) => Ok(Some(format!("added {id}"))),
            ClickOutcome::Removed(id) => Ok(Some(format!("removed {id}"))),
            ClickOutcome::Ignored(err) => Err(err.to_string()),
        },
    }
}

fn point_at_index(editor: &CurveEditor, index: usize) -> Result<PointId, String> {
    editor
        .points()
        .iter()
        .nth(index)
        .map(|(id, _)| id)
        .ok_or_else(|| format!("no control point at index {index}"))
}

fn print_report(editor: &CurveEditor, reports: &[EventReport], json: bool) {
    let rejected = reports
        .iter()
        .filter(|r| r.outcome == Outcome::Rejected)
        .count();
    let applied = reports.len() - rejected;

    if json {
        output::print_json(
            &json!({
                "success": true,
                "applied": applied,
                "rejected": rejected,
                "events": reports,
                "points": editor.points().points(),
                "revision": editor.revision(),
                "lut": editor.lut()
            }),
            "replay report",
        );
        return;
    }

    println!(
        "{} {} events: {} applied, {} rejected",
        "Replayed".bold(),
        reports.len(),
        applied.to_string().green(),
        rejected.to_string().yellow()
    );
    for report in reports.iter().filter(|r| r.outcome == Outcome::Rejected) {
        println!(
            "  {} #{} {}: {}",
            "✗".yellow(),
            report.index,
            report.op,
            report.detail.as_deref().unwrap_or_default()
        );
    }
    output::print_points(&editor.points().points());
    output::print_lut(editor.lut(), false);
}
