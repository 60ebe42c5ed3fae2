//! Basic low-level byte parser functionality.
//!
//! Provides the [ByteParser] the Newick reader is built on, its [ParsingError]
//! type and label escaping helpers shared by reader and writer.

pub mod byte_parser;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
