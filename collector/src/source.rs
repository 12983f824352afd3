// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::tree::LineSpan;

/// Executable-line map for every file analyzed in one run.
///
/// Keyed by canonical file path; iteration order is deterministic. This is
/// the sole artifact handed to report serialization.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExecutableLines {
    pub files: BTreeMap<PathBuf, FileLines>,
}

impl ExecutableLines {
    pub fn insert(&mut self, file: PathBuf, lines: FileLines) {
        self.files.insert(file, lines);
    }
}

/// Executable lines of a single file.
///
/// Line numbers are 1-indexed, strictly ascending, and unique.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FileLines {
    pub lines: Vec<u32>,
}

impl FileLines {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Per-file line accumulator.
///
/// Constructed fresh for each translation unit, fed spans as matching nodes
/// are visited, and consumed by `finish()` when the unit's traversal ends.
/// Set semantics make accumulation independent of traversal order.
#[derive(Debug, Default)]
pub struct LineSet {
    lines: BTreeSet<u32>,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every line in the inclusive span as executable.
    pub fn add_span(&mut self, span: LineSpan) {
        for line in span.lines() {
            self.lines.insert(line);
        }
    }

    /// Drains the set into its final ascending sequence.
    pub fn finish(self) -> FileLines {
        FileLines {
            lines: self.lines.into_iter().collect(),
        }
    }
}
