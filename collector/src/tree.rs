// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Binding to the C++ parsing facility.
//!
//! A [`SourceUnit`] wraps one parsed translation unit: the canonical path
//! of the file under analysis, its text, and the tree-sitter syntax tree.
//! The parser only ever sees the text of that one file, so every node
//! resolves into the main file by construction; included headers are
//! analyzed when they are themselves the unit under analysis. Statements
//! produced by a macro invocation carry the invocation line, which is the
//! line where the expansion originated.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tree_sitter::{Node, Parser, Tree, TreeCursor};

/// Inclusive range of 1-indexed source lines spanned by one node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineSpan {
    pub begin: u32,
    pub end: u32,
}

impl LineSpan {
    /// Span covering a single line.
    pub fn line(line: u32) -> Self {
        Self {
            begin: line,
            end: line,
        }
    }

    pub fn lines(self) -> RangeInclusive<u32> {
        self.begin..=self.end
    }
}

/// One parsed translation unit.
pub struct SourceUnit {
    path: PathBuf,
    text: String,
    tree: Tree,
}

impl SourceUnit {
    /// Reads and parses the file at `path`, keyed by its canonical path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = dunce::canonicalize(path)
            .with_context(|| format!("unable to resolve source path: {}", path.display()))?;
        let text = fs::read_to_string(&canonical)
            .with_context(|| format!("unable to read source file: {}", canonical.display()))?;
        Self::parse(canonical, text)
    }

    /// Parses already-loaded source text.
    pub fn parse(path: PathBuf, text: String) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_cpp::LANGUAGE.into())
            .context("loading C++ grammar")?;

        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| anyhow!("parser produced no tree for {}", path.display()))?;

        Ok(Self { path, text, tree })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source text backing a node.
    pub fn node_text(&self, node: Node) -> &str {
        &self.text[node.byte_range()]
    }

    /// Every node of the tree in preorder, as a plain iterator.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            cursor: self.tree.root_node().walk(),
            done: false,
        }
    }

    /// Resolves a node to the inclusive line span it occupies.
    ///
    /// Zero-width nodes inserted by error recovery have no source extent
    /// to attribute and yield `None`. An extent whose end precedes its
    /// begin degrades to the begin line alone.
    pub fn resolve(&self, node: Node) -> Option<LineSpan> {
        if node.is_missing() {
            return None;
        }

        let begin = node.start_position().row as u32 + 1;
        let end = node.end_position().row as u32 + 1;

        if end < begin {
            return Some(LineSpan::line(begin));
        }

        Some(LineSpan { begin, end })
    }
}

/// Preorder traversal over a syntax tree.
pub struct Nodes<'a> {
    cursor: TreeCursor<'a>,
    done: bool,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        if !self.cursor.goto_first_child() {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }

        Some(node)
    }
}
