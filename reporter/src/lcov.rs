// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! LCOV tracefile output.
//!
//! One record per file. `LH` (lines hit) is fixed at zero and every `DA`
//! entry carries a zero hit count; `LF` (lines found) is the number of
//! executable lines.

use std::fmt::Write;

use anyhow::Result;
use collector::ExecutableLines;

pub fn render(lines: &ExecutableLines) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "TN:")?;

    for (path, file) in &lines.files {
        writeln!(out, "SF:{}", path.display())?;

        for line in &file.lines {
            writeln!(out, "DA:{line},0")?;
        }

        writeln!(out, "LH:0")?;
        writeln!(out, "LF:{}", file.len())?;
        writeln!(out, "end_of_record")?;
    }

    Ok(out)
}
