//! Canonical structure dumps of parsed source.
//!
//! A dump is a nested textual rendering of the syntax tree, e.g.
//! `module(function_definition("def", name=identifier("add"), ...))`. It names
//! every named node and keeps leaf text. Anonymous tokens are kept when they
//! fill a field (operators) or are keywords, so `async def` and `def` differ.
//! Extras such as comments are left out, so a commented copy of a file dumps
//! identically to the original.

use crate::error::ParseError;
use crate::languages::Language;
use crate::treesitter::{first_syntax_error, parse_source};
use std::fmt::Write;

/// Prefix of the dump produced for source that does not parse.
pub const ERROR_MARKER_PREFIX: &str = "Error parsing AST: ";

/// Turns source text into a canonical structure dump.
pub trait StructureParser {
    fn dump(&self, source: &str) -> Result<String, ParseError>;
}

/// [`StructureParser`] backed by a tree-sitter grammar.
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterParser {
    language: Language,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl StructureParser for TreeSitterParser {
    fn dump(&self, source: &str) -> Result<String, ParseError> {
        let tree = parse_source(source, self.language)?;
        let root = tree.root_node();
        if let Some(err) = first_syntax_error(&root) {
            return Err(err);
        }
        Ok(dump_tree(&root, source))
    }
}

/// Dump `source`, degrading a parse failure into an error marker string.
///
/// The marker still takes part in structural scoring: two unparseable
/// inputs look alike only as far as their error messages do.
pub fn extract_structure<P: StructureParser + ?Sized>(parser: &P, source: &str) -> String {
    match parser.dump(source) {
        Ok(dump) => dump,
        Err(err) => {
            tracing::warn!(error = %err, "structure extraction failed; scoring error marker");
            error_marker(&err)
        }
    }
}

pub fn error_marker(err: &ParseError) -> String {
    format!("{ERROR_MARKER_PREFIX}{err}")
}

/// Serialize the subtree rooted at `node`.
///
/// The walk is iterative: one cursor plus a stack holding, for every open
/// node, whether a child has been written yet.
pub fn dump_tree(node: &tree_sitter::Node, source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 4);
    if !open_node(node, None, source, &mut out) {
        return out;
    }
    let mut open: Vec<bool> = vec![false];
    let mut cursor = node.walk();
    let mut has_child = cursor.goto_first_child();
    loop {
        if has_child {
            let child = cursor.node();
            let field = cursor.field_name();
            if is_kept(&child, field) {
                if let Some(wrote) = open.last_mut() {
                    if *wrote {
                        out.push_str(", ");
                    }
                    *wrote = true;
                }
                if open_node(&child, field, source, &mut out) {
                    open.push(false);
                    has_child = cursor.goto_first_child();
                    continue;
                }
            }
            has_child = cursor.goto_next_sibling();
            continue;
        }
        // Current level exhausted: close it and resume after its node.
        out.push(')');
        open.pop();
        if open.is_empty() || !cursor.goto_parent() {
            return out;
        }
        has_child = cursor.goto_next_sibling();
    }
}

/// Named nodes always appear. Anonymous tokens appear when they fill a field
/// (operators) or are keywords (`async`, `from`, `not`); other punctuation
/// is dropped.
fn is_kept(node: &tree_sitter::Node, field: Option<&str>) -> bool {
    if node.is_extra() {
        return false;
    }
    node.is_named() || field.is_some() || is_keyword(node.kind())
}

fn is_keyword(kind: &str) -> bool {
    !kind.is_empty() && kind.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
}

/// Write `node` up to its children. Returns true when the node was left open
/// (a `kind(` awaiting children and a closing parenthesis).
fn open_node(
    node: &tree_sitter::Node,
    field: Option<&str>,
    source: &str,
    out: &mut String,
) -> bool {
    if let Some(field) = field {
        out.push_str(field);
        out.push('=');
    }
    let text = &source[node.byte_range()];
    if !node.is_named() {
        let _ = write!(out, "{text:?}");
        return false;
    }

    out.push_str(node.kind());
    if node.child_count() == 0 {
        if text.is_empty() {
            out.push_str("()");
        } else {
            let _ = write!(out, "({text:?})");
        }
        return false;
    }
    out.push('(');
    true
}
