// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Report rendering for executable-line maps.
//!
//! Every listed line is rendered as uncovered: this tool produces the
//! denominator of a coverage report, and real hit data is merged in by
//! separate tooling.

pub mod lcov;
pub mod sonar;

use anyhow::{bail, Result};
use collector::ExecutableLines;

/// A named report format and its canonical file extension.
#[derive(Debug)]
pub struct ReportFormat {
    pub name: &'static str,
    pub extension: &'static str,
    render: fn(&ExecutableLines) -> Result<String>,
}

impl ReportFormat {
    /// Renders the complete report as text.
    pub fn render(&self, lines: &ExecutableLines) -> Result<String> {
        (self.render)(lines)
    }
}

/// Every registered format. The first entry is the default.
pub const FORMATS: &[ReportFormat] = &[
    ReportFormat {
        name: "sonar-xml",
        extension: "xml",
        render: sonar::render,
    },
    ReportFormat {
        name: "lcov",
        extension: "info",
        render: lcov::render,
    },
];

/// Looks up a registered format by name.
pub fn format(name: &str) -> Result<&'static ReportFormat> {
    match FORMATS.iter().find(|format| format.name == name) {
        Some(format) => Ok(format),
        None => bail!("unsupported format: {name}"),
    }
}
