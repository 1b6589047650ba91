use serde::Serialize;
use std::io::Write;

use crate::error::ToolError;

/// Write `value` as 2-space indented JSON followed by a newline.
pub fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), ToolError> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// Write a plain status line.
pub fn print_line<W: Write>(out: &mut W, line: &str) -> Result<(), ToolError> {
    writeln!(out, "{line}")?;
    Ok(())
}
