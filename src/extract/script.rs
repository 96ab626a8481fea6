//! Module docstring scraping for Python examples.
//!
//! The whole file is parsed with tree-sitter's Python grammar; any syntax
//! error fails the example. The docstring is the value of the module's first
//! statement when that statement is a plain string literal: single or triple
//! quoted, optional `r`/`u` prefix, adjacent literals concatenated, optionally
//! wrapped in parentheses. Byte strings and f-strings yield no summary.

use crate::error::{GalleryError, Result};
use crate::extract::{Extracted, SourceKind, file_name};
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Read a script and summarize its module docstring.
pub fn extract(path: &Path) -> Result<Extracted> {
    let bytes = fs::read(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = String::from_utf8(bytes).map_err(|err| {
        GalleryError::parse(path, SourceKind::Script, format!("source is not UTF-8: {err}"))
    })?;
    let docstring = module_docstring(&contents)
        .map_err(|message| GalleryError::parse(path, SourceKind::Script, message))?;

    Ok(Extracted {
        display_name: file_name(path),
        summary: docstring.as_deref().map(summarize).unwrap_or_default(),
    })
}

/// First paragraph of a docstring on one line, ending in a period.
pub fn summarize(docstring: &str) -> String {
    let first_paragraph = docstring.trim().split("\n\n").next().unwrap_or("").trim();
    let mut summary = first_paragraph
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !summary.is_empty() && !summary.ends_with('.') {
        summary.push('.');
    }
    summary
}

/// Decoded value of the module docstring, if the first statement is one.
///
/// Errors describe the first syntax error in the module.
pub fn module_docstring(source: &str) -> std::result::Result<Option<String>, String> {
    let source = source
        .strip_prefix('\u{feff}')
        .unwrap_or(source)
        .replace("\r\n", "\n");
    let tree = parse_module(&source)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(root));
    }

    let Some(statement) = named_children(root).into_iter().next() else {
        return Ok(None);
    };
    if statement.kind() != "expression_statement" {
        return Ok(None);
    }
    let Some(mut expression) = sole_child(statement) else {
        return Ok(None);
    };
    while expression.kind() == "parenthesized_expression" {
        match sole_child(expression) {
            Some(inner) => expression = inner,
            None => return Ok(None),
        }
    }

    let literals = match expression.kind() {
        "string" => vec![expression],
        "concatenated_string" => named_children(expression)
            .into_iter()
            .filter(|node| node.kind() == "string")
            .collect(),
        _ => return Ok(None),
    };
    let mut value = String::new();
    for literal in literals {
        match literal_value(literal, &source)? {
            Some(text) => value.push_str(&text),
            None => return Ok(None),
        }
    }
    Ok(Some(value))
}

fn parse_module(source: &str) -> std::result::Result<Tree, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|err| format!("loading Python grammar: {err}"))?;
    parser
        .parse(source, None)
        .ok_or_else(|| "parser returned no syntax tree".to_string())
}

/// Named children other than comments.
fn named_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

fn sole_child<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    match named_children(node).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Text of one string literal; `None` for byte strings and f-strings.
fn literal_value(node: Node<'_>, source: &str) -> std::result::Result<Option<String>, String> {
    let mut start = None;
    let mut end = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "string_start" => start = Some(child),
            "string_end" => end = Some(child),
            "interpolation" => return Ok(None),
            _ => {}
        }
    }
    let (Some(start), Some(end)) = (start, end) else {
        return Err(format!(
            "malformed string literal on line {}",
            node.start_position().row + 1
        ));
    };

    let prefix = source[start.byte_range()]
        .trim_end_matches(['"', '\''])
        .to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return Ok(None);
    }
    let body = start.end_byte()..end.start_byte();
    if prefix.contains('r') {
        return Ok(Some(source[body].to_string()));
    }

    let mut escapes = Vec::new();
    collect_escapes(node, &mut escapes);
    let mut value = String::new();
    let mut pos = body.start;
    for escape in escapes {
        value.push_str(&source[pos..escape.start_byte()]);
        value.push_str(&decode_escape(&source[escape.byte_range()]));
        pos = escape.end_byte();
    }
    value.push_str(&source[pos..body.end]);
    Ok(Some(value))
}

fn collect_escapes<'tree>(node: Node<'tree>, found: &mut Vec<Node<'tree>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "escape_sequence" {
            found.push(child);
        } else {
            collect_escapes(child, found);
        }
    }
}

/// Value of one escape sequence; unknown forms (`\N{...}`) stay verbatim.
fn decode_escape(escape: &str) -> String {
    let body = escape.strip_prefix('\\').unwrap_or(escape);
    let simple = match body {
        "\n" => Some(""),
        "\\" => Some("\\"),
        "'" => Some("'"),
        "\"" => Some("\""),
        "a" => Some("\u{7}"),
        "b" => Some("\u{8}"),
        "f" => Some("\u{c}"),
        "n" => Some("\n"),
        "r" => Some("\r"),
        "t" => Some("\t"),
        "v" => Some("\u{b}"),
        _ => None,
    };
    if let Some(text) = simple {
        return text.to_string();
    }
    let code = match body.as_bytes().first().copied() {
        Some(b'x' | b'u' | b'U') => u32::from_str_radix(&body[1..], 16).ok(),
        Some(b'0'..=b'7') => u32::from_str_radix(body, 8).ok(),
        _ => None,
    };
    code.and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_else(|| escape.to_string())
}

fn syntax_error(root: Node<'_>) -> String {
    let node = first_error(root).unwrap_or(root);
    let position = node.start_position();
    if node.is_missing() {
        format!(
            "invalid syntax: missing {} at line {}, column {}",
            node.kind(),
            position.row + 1,
            position.column + 1
        )
    } else {
        format!(
            "invalid syntax at line {}, column {}",
            position.row + 1,
            position.column + 1
        )
    }
}

fn first_error<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn summary_of(source: &str) -> String {
        module_docstring(source)
            .expect("source should parse")
            .as_deref()
            .map(summarize)
            .unwrap_or_default()
    }

    #[test]
    fn triple_quoted_docstring_gets_period() {
        assert_eq!(summary_of("'''Summary line'''\nimport os\n"), "Summary line.");
        assert_eq!(summary_of("\"\"\"Summary line.\"\"\"\nimport os"), "Summary line.");
    }

    #[test]
    fn only_first_paragraph_is_kept_on_one_line() {
        let source = "\"\"\"\n    Plot a sine wave\n    with matplotlib.\n\n    More detail here.\n\"\"\"\n";
        assert_eq!(summary_of(source), "Plot a sine wave with matplotlib.");
    }

    #[test]
    fn comments_and_blank_lines_before_docstring_are_skipped() {
        let source = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\n\n\"Short.\"\n";
        assert_eq!(summary_of(source), "Short.");
    }

    #[test]
    fn later_string_literal_is_not_a_docstring() {
        assert_eq!(summary_of("import os\n\"\"\"Not a docstring.\"\"\"\n"), "");
        assert_eq!(summary_of("x = 1\n'doc'"), "");
    }

    #[test]
    fn expressions_starting_with_a_string_are_not_docstrings() {
        assert_eq!(summary_of("'a'.upper()\n"), "");
        assert_eq!(summary_of("'a' + b\n"), "");
        assert_eq!(summary_of("('a' + b)\n"), "");
    }

    #[test]
    fn bytes_and_fstrings_are_not_docstrings() {
        assert_eq!(summary_of("b'bytes'\n"), "");
        assert_eq!(summary_of("f'{x}'\n"), "");
        assert_eq!(summary_of("f'{1}' 'plain'\n"), "");
    }

    #[test]
    fn adjacent_and_parenthesized_literals_concatenate() {
        assert_eq!(summary_of("'Hello, ' \"world\"\n"), "Hello, world.");
        assert_eq!(
            summary_of("(\n    'Split across '\n    'lines'\n)\n"),
            "Split across lines."
        );
        assert_eq!(summary_of("'Statement'; import os\n"), "Statement.");
    }

    #[test]
    fn escapes_decode_unless_raw() {
        assert_eq!(
            module_docstring("'Tab\\there \\x41\\u00e9'").unwrap().as_deref(),
            Some("Tab\there A\u{e9}")
        );
        assert_eq!(
            module_docstring("r'C:\\new\\path'").unwrap().as_deref(),
            Some("C:\\new\\path")
        );
    }

    #[test]
    fn empty_docstring_stays_empty() {
        assert_eq!(summary_of("\"\"\"\"\"\"\n"), "");
        assert_eq!(summary_of(""), "");
    }

    #[test]
    fn syntax_errors_anywhere_are_reported() {
        assert!(module_docstring("\"\"\"never closed\n").is_err());
        assert!(module_docstring("(\n'open paren'\n").is_err());

        let err = module_docstring("\"\"\"Doc.\"\"\"\ndef broken(:\n    return\n")
            .expect_err("invalid syntax after the docstring");
        assert!(err.starts_with("invalid syntax"), "{err}");
    }

    #[test]
    fn extract_reads_file_and_names_it() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("plot_demo.py");
        std::fs::write(&path, "\"\"\"Draw a demo plot\"\"\"\nimport os\n").unwrap();

        let extracted = extract(&path).expect("extract");
        assert_eq!(extracted.display_name, "plot_demo.py");
        assert_eq!(extracted.summary, "Draw a demo plot.");
    }

    #[test]
    fn extract_surfaces_parse_errors_with_path() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("broken.py");
        std::fs::write(&path, "'''Doc.'''\nif True\n    pass\n").unwrap();

        let err = extract(&path).expect_err("broken script must fail");
        assert!(matches!(err, GalleryError::Parse { kind: SourceKind::Script, .. }));
        assert!(err.to_string().contains("broken.py"));
    }
}
