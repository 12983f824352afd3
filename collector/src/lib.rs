// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Executable-line analysis for C++ translation units.
//!
//! Binary-instrumentation coverage tools cannot see lines inside templates
//! that were never instantiated, so heavily templated and header-only code
//! is undercounted. This crate walks the syntax tree of each source file
//! and reports every line that is *structurally* executable, independent of
//! any compiled binary. The result carries no hit counts: it is the
//! denominator of a coverage report, merged with real hit data by separate
//! tooling.

pub mod collect;
pub mod compile_commands;
pub mod source;
pub mod tree;

pub use collect::{collect_files, collect_unit};
pub use source::{ExecutableLines, FileLines};
pub use tree::SourceUnit;
