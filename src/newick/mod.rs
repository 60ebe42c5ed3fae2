//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [`Tree`]s and [`to_newick`]/[`write_tree`] to write them back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string
//! * [`parse_file`] - parses all trees of a file
//! * [`read_tree`] - parses a file that must hold exactly one tree
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! The accepted grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Labels containing special characters are enclosed in single quotes,
//!   a single quote within is written twice
//! * Comments are square brackets and can occur anywhere where whitespace is
//!   allowed; annotations such as `[&R]` are treated as comments and skipped

mod defs;
mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{to_newick, write_tree};

use crate::model::Tree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a file of semicolon-terminated Newick strings eagerly and returns all trees.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<Tree>` - All parsed trees, in file order
/// * [`ParsingError`] - If file reading fails or Newick format is invalid
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    NewickParser::new().parse_all(byte_parser)
}

/// Reads the single tree stored in a Newick file, as written by tree inference tools.
///
/// # Errors
/// * [`ParsingErrorType::NoTrees`] if the file holds no tree (e.g. it is empty)
/// * [`ParsingErrorType::MultipleTrees`] if it holds more than one
/// * any other [`ParsingError`] if reading or parsing fails
pub fn read_tree<P: AsRef<Path>>(path: P) -> Result<Tree, ParsingError> {
    let mut trees = parse_file(path)?;
    match trees.len() {
        0 => Err(ParsingError::without_context(ParsingErrorType::NoTrees)),
        1 => Ok(trees.remove(0)),
        n => Err(ParsingError::without_context(ParsingErrorType::MultipleTrees(n))),
    }
}

/// Parses a single Newick string to obtain a [`Tree`].
///
/// # Example
/// ```
/// use phyloprep::newick::parse_str;
///
/// let tree = parse_str("(A/HongKong/1968:0.1,(A/Victoria/1975:0.2,A/Texas/1977:0.3)0.99:0.05);").unwrap();
/// assert_eq!(tree.leaf_labels(), vec!["A/HongKong/1968", "A/Victoria/1975", "A/Texas/1977"]);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}
