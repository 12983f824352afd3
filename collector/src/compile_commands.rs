// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! `compile_commands.json` loading.
//!
//! Only the file list matters here: the syntactic analysis does not consume
//! compiler flags, so each entry is read for its `directory` and `file`
//! fields and the rest of the entry is ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// One entry of a compilation database.
#[derive(Debug, Deserialize)]
pub struct CompileCommand {
    pub directory: PathBuf,
    pub file: PathBuf,
}

impl CompileCommand {
    /// Absolute path of the entry's main source file.
    ///
    /// Relative `file` entries are resolved against `directory`, as the
    /// compilation database contract requires.
    pub fn source_path(&self) -> PathBuf {
        if self.file.is_absolute() {
            self.file.clone()
        } else {
            self.directory.join(&self.file)
        }
    }
}

/// Loads a compilation database from `path`: either the JSON file itself or
/// a directory containing `compile_commands.json`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<CompileCommand>> {
    let path = path.as_ref();
    let file = if path.is_dir() {
        path.join("compile_commands.json")
    } else {
        path.to_path_buf()
    };

    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("unable to read compilation database: {}", file.display()))?;

    let entries = serde_json::from_str(&text)
        .with_context(|| format!("malformed compilation database: {}", file.display()))?;

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_relative_file_resolves_against_directory() {
        let text = r#"[
            {
                "directory": "/build",
                "file": "../src/main.cpp",
                "command": "clang++ -c ../src/main.cpp"
            }
        ]"#;

        let entries: Vec<CompileCommand> = serde_json::from_str(text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].source_path(),
            PathBuf::from("/build/../src/main.cpp")
        );
    }

    #[test]
    fn test_absolute_file_kept() {
        let text = r#"[
            {
                "directory": "/build",
                "file": "/src/main.cpp",
                "arguments": ["clang++", "-c", "/src/main.cpp"]
            }
        ]"#;

        let entries: Vec<CompileCommand> = serde_json::from_str(text).unwrap();
        assert_eq!(entries[0].source_path(), PathBuf::from("/src/main.cpp"));
    }

    #[test]
    fn test_missing_database_fails() {
        assert!(load("/nonexistent/compile_commands.json").is_err());
    }
}
