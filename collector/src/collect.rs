// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Executable-line classification over parsed translation units.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use tree_sitter::Node;

use crate::source::{ExecutableLines, FileLines, LineSet};
use crate::tree::SourceUnit;

/// Statement kinds that execute when control reaches them.
const JUMP_KINDS: &[&str] = &[
    "return_statement",
    "continue_statement",
    "break_statement",
    "co_return_statement",
    "co_yield_statement",
    "goto_statement",
];

/// Whether a node is an executable statement.
///
/// Jump statements and full-expression statements count, and only when
/// their parent is a block: expressions at class or namespace scope
/// (default member initializers, template arguments) never run. The
/// parent rule also skips statements hanging directly off an unbraced
/// `if`/loop body or a `case`/`goto` label; those exclusions are
/// deliberate and pinned by test.
fn is_executable(node: Node) -> bool {
    let kind = node.kind();

    if !JUMP_KINDS.contains(&kind) && kind != "expression_statement" {
        return false;
    }

    // A bare `;` parses as an empty expression statement but executes
    // nothing.
    if kind == "expression_statement" && node.named_child_count() == 0 {
        return false;
    }

    matches!(node.parent(), Some(parent) if parent.kind() == "compound_statement")
}

/// Whether a function definition's body was left (partly) opaque by the
/// parser.
///
/// Such bodies produce no usable statement nodes, so the fine-grained
/// matcher would silently lose all of their lines. The whole definition
/// span stands in instead: a coarser answer than per-statement lines, but
/// never an undercount.
fn is_opaque_function(node: Node) -> bool {
    if node.kind() != "function_definition" {
        return false;
    }

    match node.child_by_field_name("body") {
        Some(body) => body.has_error(),
        None => false,
    }
}

fn declarator_text<'a>(unit: &'a SourceUnit, node: Node) -> &'a str {
    node.child_by_field_name("declarator")
        .map(|decl| unit.node_text(decl))
        .unwrap_or("<unknown>")
}

/// Collects the executable lines of one translation unit.
///
/// The result is strictly ascending and deduplicated; traversal order has
/// no effect on it. Overlap between the fine-grained matcher and the
/// opaque-body fallback collapses in the set.
pub fn collect_unit(unit: &SourceUnit) -> FileLines {
    let mut lines = LineSet::new();

    for node in unit.nodes() {
        if is_executable(node) {
            if let Some(span) = unit.resolve(node) {
                lines.add_span(span);
            }
        } else if is_opaque_function(node) {
            if let Some(span) = unit.resolve(node) {
                debug!(
                    "opaque body for `{}` at {}:{}..{}, marking whole definition",
                    declarator_text(unit, node),
                    unit.path().display(),
                    span.begin,
                    span.end,
                );
                lines.add_span(span);
            }
        }
    }

    lines.finish()
}

/// Analyzes each file in turn, accumulating the per-file line map.
///
/// Any file that cannot be read or parsed fails the whole batch; results
/// accumulated so far are discarded.
pub fn collect_files(files: &[PathBuf]) -> Result<ExecutableLines> {
    let mut map = ExecutableLines::default();

    for file in files {
        let unit = SourceUnit::load(file)
            .with_context(|| format!("failed to analyze {}", file.display()))?;
        let lines = collect_unit(&unit);

        debug!(
            "{}: {} executable lines",
            unit.path().display(),
            lines.len()
        );

        map.insert(unit.path().to_path_buf(), lines);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::collect_unit;
    use crate::tree::SourceUnit;

    fn collect(text: &str) -> Vec<u32> {
        let unit = SourceUnit::parse(PathBuf::from("/test/input.cpp"), text.to_owned()).unwrap();
        collect_unit(&unit).lines
    }

    #[test]
    fn test_single_line_return() {
        let lines = collect("int f() {\n    return 2;\n}\n");
        assert_eq!(lines, vec![2]);
    }

    #[test]
    fn test_declarations_only_is_empty() {
        let text = "namespace app {\n\
                    class Widget {\n\
                    public:\n\
                        int field = 5;\n\
                        void method();\n\
                    };\n\
                    }\n";
        assert_eq!(collect(text), Vec::<u32>::new());
    }

    #[test]
    fn test_multi_line_statement_marks_every_line() {
        let text = "int sum(int a, int b) {\n\
                    \x20   return a\n\
                    \x20       + b;\n\
                    }\n";
        assert_eq!(collect(text), vec![2, 3]);
    }

    #[test]
    fn test_call_statement() {
        let lines = collect("void g();\nvoid f() {\n    g();\n}\n");
        assert_eq!(lines, vec![3]);
    }

    #[test]
    fn test_braced_if_body_counted() {
        let text = "bool f(bool c) {\n\
                    \x20   if (c) {\n\
                    \x20       return true;\n\
                    \x20   }\n\
                    \x20   return false;\n\
                    }\n";
        assert_eq!(collect(text), vec![3, 5]);
    }

    #[test]
    fn test_unbraced_if_body_not_counted() {
        // Statements must sit directly inside a block; the unbraced body
        // of an `if` does not qualify.
        let text = "bool f(bool c) {\n\
                    \x20   if (c) return true;\n\
                    \x20   return false;\n\
                    }\n";
        assert_eq!(collect(text), vec![3]);
    }

    #[test]
    fn test_switch_case_body_counted_only_when_braced() {
        // `return 1;` hangs off the case label rather than a block, so
        // only the braced default body is counted.
        let text = "int f(int v) {\n\
                    \x20   switch (v) {\n\
                    \x20   case 0:\n\
                    \x20       return 1;\n\
                    \x20   default: {\n\
                    \x20       return 2;\n\
                    \x20   }\n\
                    \x20   }\n\
                    }\n";
        assert_eq!(collect(text), vec![6]);
    }

    #[test]
    fn test_bare_semicolon_not_counted() {
        let lines = collect("void f() {\n    ;\n}\n");
        assert_eq!(lines, Vec::<u32>::new());
    }

    #[test]
    fn test_template_return() {
        let text = "template <class T>\n\
                    T twice(T value) {\n\
                    \x20   return value + value;\n\
                    }\n";
        assert_eq!(collect(text), vec![3]);
    }

    #[test]
    fn test_template_body_granularity() {
        // Eager parsing yields per-statement lines; an opaque body yields
        // the whole definition span. Both answers cover the body.
        let text = "template <class T>\n\
                    T frob(T value) {\n\
                    \x20   return value + value;\n\
                    }\n";
        let lines = collect(text);

        let fine = vec![3];
        let coarse = vec![1, 2, 3, 4];
        assert!(
            lines == fine || lines == coarse,
            "unexpected line set: {lines:?}"
        );
    }

    #[test]
    fn test_opaque_body_marks_whole_definition() {
        // The initializer is unparseable, so the body contains an error
        // node and the whole definition span stands in.
        let text = "void f() {\n\
                    \x20   int x = ;\n\
                    }\n";
        let lines = collect(text);

        assert!(
            lines.contains(&1) && lines.contains(&2) && lines.contains(&3),
            "expected full definition span, got: {lines:?}"
        );
    }

    #[test]
    fn test_macro_invocation_attributes_to_invocation_line() {
        let text = "#define CALL(x) do_thing(x)\n\
                    void do_thing(int);\n\
                    void f() {\n\
                    \x20   CALL(1);\n\
                    }\n";
        assert_eq!(collect(text), vec![4]);
    }

    #[test]
    fn test_duplicate_lines_collapse() {
        let lines = collect("void g();\nvoid f() {\n    g(); g();\n    g();\n}\n");
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn test_idempotent() {
        let text = "int f() {\n    return 2;\n}\n";
        assert_eq!(collect(text), collect(text));
    }

    #[test]
    fn test_strictly_ascending() {
        let text = "void g();\n\
                    void f() {\n\
                    \x20   g();\n\
                    \x20   for (int i = 0; i < 3; ++i) {\n\
                    \x20       g();\n\
                    \x20   }\n\
                    \x20   return;\n\
                    }\n";
        let lines = collect(text);

        assert!(lines.windows(2).all(|w| w[0] < w[1]));
    }
}
