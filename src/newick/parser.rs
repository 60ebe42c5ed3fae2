//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses single
//! trees or all trees of a file into [Tree]s.

use crate::model::{BranchLength, Tree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;
use log::warn;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser for Newick format phylogenetic trees with any number of children
/// per vertex.
///
/// The number of leaves of the last parsed tree is remembered and used to
/// pre-allocate the next one, since files usually hold trees on the same taxa.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse a single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees until EOF
///
/// # Example
/// ```
/// use phyloprep::newick::NewickParser;
/// use phyloprep::parser::ByteParser;
///
/// // FastTree style: trifurcating root, support values on internal vertices
/// let input = "(A/Perth/16/2009:0.01,A/Brisbane/10/2007:0.02,(A/Victoria/361/2011:0.03,A/Texas/50/2012:0.01)0.987:0.02);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.root().children().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    num_leaves: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] without knowledge of the tree size.
    pub fn new() -> Self {
        Self {
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
        }
    }

    /// Sets the expected number of leaves per tree (allocation hint only).
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self
    }

    /// Parses all Newick trees from the byte parser until EOF.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser over input containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees (possibly none)
    /// * `Err(ParsingError)` - If any tree fails to parse
    pub fn parse_all(&mut self, mut byte_parser: ByteParser) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree, terminated by `;`, from the given [ByteParser].
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str(&mut self, parser: &mut ByteParser) -> Result<Tree, ParsingError> {
        let mut tree = Tree::with_capacity(self.num_leaves);

        let root_index = self.parse_vertex(parser, &mut tree)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {next_char:?}"),
            ));
        }

        tree.set_root(root_index);
        self.num_leaves = tree.num_leaves();
        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses a vertex (either internal vertex or leaf) and returns its index:
    /// - Skips leading comments and whitespace
    /// - Dispatches to `parse_internal_vertex` if starts with `(`, otherwise `parse_leaf`
    fn parse_vertex(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser, tree)
        } else {
            self.parse_leaf(parser, tree)
        }
    }

    /// Parses internal vertex, adds it to tree, and returns its index:
    /// - `(child[,child...])[label][:branch_length]`
    /// - Expects parser at opening `(`
    fn parse_internal_vertex(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        parser.next_byte(); // consume '('

        let mut children = Vec::with_capacity(2);
        loop {
            children.push(self.parse_vertex(parser, tree)?);

            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b',') {
                continue;
            }
            if parser.consume_if(b')') {
                break;
            }
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ',' or ')' after child but found {next_char:?}"),
            ));
        }

        // Optional label after ')', e.g. a support value
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let label = (!label.is_empty()).then_some(label);
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_internal_vertex(children, branch_length, label))
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `[label][:branch_length]`
    /// - Expects parser at start of label
    /// - An empty label, as in `(,(,A));`, gives an unlabelled leaf
    fn parse_leaf(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = self.parse_branch_length(parser)?;

        if label.is_empty() {
            Ok(tree.add_unlabelled_leaf(branch_length))
        } else {
            Ok(tree.add_leaf(branch_length, label))
        }
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if the value is not a finite number
    ///
    /// Negative lengths are accepted and logged as a warning.
    fn parse_branch_length(
        &mut self,
        parser: &mut ByteParser,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break;
            }
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_newick_string(parser, format!("Invalid branch length: {branch_length_str:?}"))
        })?;
        let branch_length = BranchLength::try_new(value).ok_or_else(|| {
            ParsingError::invalid_newick_string(parser, format!("Branch length must be finite, got {value}"))
        })?;
        if branch_length.is_negative() {
            warn!("Negative branch length {value} before position {}", parser.position());
        }
        Ok(Some(branch_length))
    }
}
