//! Utility functions for escaping labels in Newick strings.
//!
//! Labels produced by the parser are stored unescaped, that is without
//! enclosing single quotes and with `''` collapsed to `'`. The writer uses
//! [escape_label] to turn them back into valid Newick tokens.

/// Characters that terminate an unquoted Newick label or change its meaning.
const SPECIAL_CHARS: &[char] = &[' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Checks whether a label must be wrapped in single quotes to be written.
///
/// # Examples
/// ```
/// # use phyloprep::parser::utils::needs_quoting;
/// assert!(!needs_quoting("A/HongKong/1968"));
/// assert!(!needs_quoting("A_Victoria_1975"));
/// assert!(needs_quoting("A/Hong Kong/1968"));
/// assert!(needs_quoting("Wilson's"));
/// assert!(needs_quoting(""));
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.is_empty() || label.contains(SPECIAL_CHARS)
}

/// Escapes a label for safe use in a Newick string.
///
/// Labels containing special characters (whitespace, punctuation used by the
/// grammar, single quotes) are wrapped in single quotes and internal single
/// quotes are doubled. Other labels are returned unchanged, so that parsing
/// the written string yields the original label again.
///
/// # Examples
/// ```
/// # use phyloprep::parser::utils::escape_label;
/// assert_eq!(escape_label("A/Bilthoven/16190/1968"), "A/Bilthoven/16190/1968");
/// assert_eq!(escape_label("A/Hong Kong/1968"), "'A/Hong Kong/1968'");
/// assert_eq!(escape_label("clade[3c]"), "'clade[3c]'");
/// assert_eq!(escape_label("Wilson's"), "'Wilson''s'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
