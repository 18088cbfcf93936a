//! Tree-sitter integration for multi-language AST parsing.

use crate::error::ParseError;
use crate::languages::Language;

/// Parse source text with the grammar of `language`.
///
/// Tree-sitter recovers from syntax errors, so a returned tree may still
/// contain `ERROR` or `MISSING` nodes; see [`first_syntax_error`].
pub fn parse_source(source: &str, language: Language) -> Result<tree_sitter::Tree, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.ts_language())
        .map_err(|e| ParseError::Grammar {
            language: language.name(),
            reason: e.to_string(),
        })?;
    parser.parse(source.as_bytes(), None).ok_or(ParseError::NoTree)
}

/// Locate the first `ERROR` or `MISSING` node in document order.
///
/// Walks with a cursor instead of recursing; nesting depth is bounded only by
/// the input.
pub fn first_syntax_error(root: &tree_sitter::Node) -> Option<ParseError> {
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(syntax_error(&node));
        }
        // Subtrees without errors are skipped whole.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn syntax_error(node: &tree_sitter::Node) -> ParseError {
    let pos = node.start_position();
    let reason = if node.is_missing() {
        format!("missing {:?}", node.kind())
    } else {
        "invalid syntax".to_string()
    };
    ParseError::Syntax {
        reason,
        line: pos.row + 1,
        column: pos.column + 1,
    }
}
