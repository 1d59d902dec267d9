//! `tonectl sample`

use anyhow::Result;

use crate::commands::{Context, CurveArgs};
use crate::input;
use crate::output;

/// Print the clipped spline samples that the LUT is built from.
pub fn execute(args: &CurveArgs, ctx: Context<'_>) -> Result<()> {
    let editor = input::build_editor(args, ctx.config)?;
    output::print_samples(editor.curve(), ctx.json);
    Ok(())
}
