use phyloprep::parser::ParsingErrorType;
use phyloprep::parser::byte_parser::ByteParser;

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_skip_comment() {
    let mut parser = ByteParser::for_str("[&R] ((A:1,B:1):1,C:2);");
    assert!(parser.skip_comment().unwrap());
    assert_eq!(parser.next_byte(), Some(b' '));
    assert_eq!(parser.next_byte(), Some(b'('));
    assert!(!parser.skip_comment().unwrap());
}

#[test]
fn test_skip_comment_and_whitespace() {
    let mut parser = ByteParser::for_str("[Go] \n[Keep going]   \t ['...']\n[One more to go]  END!");
    parser
        .skip_comment_and_whitespace()
        .expect("Failed to skip comments.");
    assert_eq!(parser.next_byte(), Some(b'E'));
}

#[test]
fn test_unclosed_comment() {
    let mut parser = ByteParser::for_str("  [FastTree version (A,B);");
    let err = parser.skip_comment_and_whitespace().unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

#[test]
fn test_consume_until() {
    let mut parser = ByteParser::for_str("consume a CAN of beans");
    assert!(parser.consume_until(b'C'));
    assert_eq!(parser.peek(), Some(b'A'));
    assert_eq!(parser.position(), 11);

    assert!(!parser.consume_until(b'X'));
    assert!(parser.is_eof());
}

#[test]
fn test_peek_is_and_consume_if() {
    let mut parser = ByteParser::for_str("(A,B)");
    assert!(parser.peek_is(b'('));
    assert!(!parser.consume_if(b'A'));
    assert_eq!(parser.position(), 0);
    assert!(parser.consume_if(b'('));
    assert_eq!(parser.peek(), Some(b'A'));
}

#[test]
fn test_from_bytes() {
    let mut parser = ByteParser::from_bytes(b"(A,B);".to_vec());
    assert!(parser.consume_until(b';'));
    assert!(parser.is_eof());
    assert_eq!(parser.next_byte(), None);
    assert_eq!(parser.get_context_as_string(10), "");
}

#[test]
fn test_parse_unquoted_label() {
    let mut parser = ByteParser::for_str("A/HongKong/1968:0.1,B");
    assert_eq!(parser.parse_label(b",:;()").unwrap(), "A/HongKong/1968");
    assert_eq!(parser.peek(), Some(b':'));

    // Sitting on a delimiter yields an empty label
    assert_eq!(parser.parse_unquoted_label(b",:;()").unwrap(), "");
}

#[test]
fn test_parse_quoted_label() {
    let mut parser = ByteParser::for_str("'A/Hong Kong/1968''s':0.1");
    assert_eq!(parser.parse_label(b",:;()").unwrap(), "A/Hong Kong/1968's");
    assert_eq!(parser.next_byte(), Some(b':'));
}

#[test]
fn test_parse_quoted_label_unclosed() {
    let mut parser = ByteParser::for_str("'A/Hong Kong");
    let err = parser.parse_label(b",:;()").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_non_ascii_label() {
    let mut parser = ByteParser::for_str("A/Zürich/2019,");
    assert_eq!(parser.parse_label(b",").unwrap(), "A/Zürich/2019");
}

#[test]
fn test_context_as_string() {
    let parser = ByteParser::for_str("(A,B);");
    assert_eq!(parser.get_context_as_string(3), "(A,");
    assert_eq!(parser.get_context_as_string(100), "(A,B);");
}
