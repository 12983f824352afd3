// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use collector::{collect_files, compile_commands};

#[derive(Debug, Parser)]
#[command(name = "template-coverage", version)]
struct Opt {
    /// Source files to analyze. When empty, every entry of the compilation
    /// database is analyzed.
    files: Vec<PathBuf>,

    /// Compilation database: `compile_commands.json` or the directory
    /// containing it.
    #[arg(short = 'p', long = "compile-commands")]
    compile_commands: Option<PathBuf>,

    /// Coverage report file format.
    #[arg(long, default_value = reporter::FORMATS[0].name)]
    format: String,

    /// The file into which the coverage report is written.
    #[arg(long, default_value = "./coverage")]
    out_file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Opt::parse();

    // Resolve the format up front so a bad selector never produces output.
    let format = reporter::format(&opt.format)?;

    let files = if opt.files.is_empty() {
        let database = opt
            .compile_commands
            .as_ref()
            .context("no source files given and no compilation database to enumerate")?;
        compile_commands::load(database)?
            .iter()
            .map(|entry| entry.source_path())
            .collect()
    } else {
        opt.files
    };

    info!("analyzing {} files", files.len());
    let lines = collect_files(&files)?;

    let report = format.render(&lines)?;

    let mut out_file = opt.out_file;
    if out_file.extension().is_none() {
        out_file.set_extension(format.extension);
    }

    fs::write(&out_file, report)
        .with_context(|| format!("couldn't open output file \"{}\"", out_file.display()))?;

    info!("report written to {}", out_file.display());

    Ok(())
}
