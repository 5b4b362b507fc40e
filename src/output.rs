// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON rendering helpers shared by CLI commands.

use anyhow::Result;
use serde::Serialize;

/// Print a value as JSON to stdout, pretty unless `compact`.
pub fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}
