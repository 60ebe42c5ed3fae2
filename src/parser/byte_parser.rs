//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for text-based tree formats with support
//! for peeking, consuming, comment skipping and quote-aware label parsing.
//! It is the foundation of the [Newick parser](crate::newick::NewickParser).

use crate::parser::parsing_error::ParsingError;
use std::fs;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser over an owned buffer, with support for peeking,
/// consuming, and skipping.
///
/// Tree files written by inference tools hold a single tree and are read
/// into memory completely.
///
/// Labels are collected as raw bytes and decoded as UTF-8 at the end, so strain
/// names with non-ASCII characters survive parsing intact.
///
/// # Example
/// ```
/// use phyloprep::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [FastTree] ('A/Perth/2009':0.1,B)");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.consume_if(b'('));
/// assert_eq!(parser.parse_label(b",)").unwrap(), "A/Perth/2009");
/// ```
pub struct ByteParser {
    /// The owned bytes being parsed
    input: Vec<u8>,
    /// Current position (byte offset) in `input`
    pos: usize,
}

impl ByteParser {
    /// Creates a new `ByteParser` over the given bytes.
    pub fn from_bytes(input: Vec<u8>) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::from_bytes(input.as_bytes().to_vec())
    }

    /// Creates a new `ByteParser` over the full contents of the file at `path`.
    ///
    /// # Errors
    /// Returns a [ParsingError] of kind `IoError` if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::from_bytes(fs::read(path)?))
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a comment if present.
    ///
    /// Comments are enclosed in square brackets `[...]`.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if(b'[') {
            if !self.consume_until(b']') {
                return Err(ParsingError::unclosed_comment(self));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Checks if the current byte equals `ch`.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it equals `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes up to and including the target byte.
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8) -> bool {
        while let Some(b) = self.next_byte() {
            if b == target {
                return true;
            }
        }
        false
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current parser position (byte offset) in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let start = self.pos.min(self.input.len());
        let end = self.pos.saturating_add(k).min(self.input.len());
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// Leading whitespace and comments are skipped. Detects whether the label is
    /// quoted (single quotes) and calls the appropriate method.
    ///
    /// # Arguments
    /// * `delimiters` - Bytes that end an unquoted label
    ///
    /// # Errors
    /// Returns an error if a quoted label is not closed or a comment is not closed
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            self.parse_unquoted_label(delimiters)
        }
    }

    /// Parses a quoted label enclosed in single quotes with escape support.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes within
    /// the label are escaped by doubling them (e.g., `'Wilson''s'` becomes `Wilson's`).
    ///
    /// # Errors
    /// Returns an `UnexpectedEOF` error if the closing quote is missing
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // consume opening '

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    // Doubled quote is an escaped quote, single one closes
                    if self.consume_if(b'\'') {
                        label.push(b'\'');
                    } else {
                        break;
                    }
                }
                Some(b) => label.push(b),
                None => return Err(ParsingError::unexpected_eof(self)),
            }
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters (or EOF) is encountered.
    ///
    /// Returns an empty string if the parser already sits on a delimiter.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        let mut label = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            label.push(b);
            self.next_byte();
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }
}
