//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while parsing tree files.

use crate::parser::byte_parser::ByteParser;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur during Newick parsing.
#[derive(PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    IoError(String),
    UnexpectedEOF,
    UnclosedComment,
    InvalidNewickString(String),
    NoTrees,
    MultipleTrees(usize),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and surrounding bytes).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser(kind: ParsingErrorType, parser: &ByteParser) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment(parser: &ByteParser) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedComment, parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string(parser: &ByteParser, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg), parser)
    }

    /// Create a ParsingError without parser context (for file-level errors)
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ParsingErrorType::UnclosedComment => write!(f, "Unclosed comment")?,
            ParsingErrorType::InvalidNewickString(msg) => write!(f, "Invalid newick string: {msg}")?,
            ParsingErrorType::UnexpectedEOF => write!(f, "Unexpected end of file")?,
            ParsingErrorType::NoTrees => write!(f, "No tree found")?,
            ParsingErrorType::MultipleTrees(n) => write!(f, "Expected a single tree but found {n}")?,
            ParsingErrorType::IoError(msg) => write!(f, "IO error - {msg}")?,
        }

        // Additional position information
        write!(f, " at position {}", self.position)?;

        // Additional context if available
        if !self.context.is_empty() {
            write!(f, "\n  Context (next {} bytes): {}", self.context.len(), self.context)?;
        }

        Ok(())
    }
}

impl Error for ParsingError {}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        Self::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}
