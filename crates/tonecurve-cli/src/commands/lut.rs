//! `tonectl lut`

use anyhow::Result;
use tracing::info;

use crate::commands::{Context, CurveArgs};
use crate::input;
use crate::output;

/// Build the LUT for the given points and print it.
pub fn execute(args: &CurveArgs, ctx: Context<'_>) -> Result<()> {
    let editor = input::build_editor(args, ctx.config)?;
    let lut = editor.lut();
    info!(
        points = editor.points().len(),
        monotonic = lut.is_monotonic(),
        "LUT built"
    );
    output::print_lut(lut, ctx.json);
    Ok(())
}
