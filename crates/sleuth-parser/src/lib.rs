//! Tree-sitter based parsing for code-sleuth structure comparison.
//!
//! Supports Python, Rust, JavaScript, TypeScript, Go, Java, C and C++.
//! Parses a submission and renders its syntax tree as a canonical dump,
//! or an error marker when the submission does not parse.

pub mod error;
pub mod languages;
pub mod structure;
pub mod treesitter;

pub use error::ParseError;
pub use languages::Language;
pub use structure::{StructureParser, TreeSitterParser, extract_structure};
