use phyloprep::newick::{NewickParser, parse_file, parse_str, read_tree, to_newick, write_tree};
use phyloprep::parser::ParsingErrorType;
use phyloprep::parser::byte_parser::ByteParser;
use std::fs;
use tempfile::tempdir;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0);";
    let mut parser = ByteParser::for_str(newick);
    let tree = NewickParser::new()
        .with_num_leaves(3)
        .parse_str(&mut parser)
        .unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    let root_index = root.index();
    let &[root_left, root_right] = root.children() else {
        panic!("root should have two children");
    };

    // - Internal vertex has children (A, B)
    let internal = tree.vertex(root_left);
    assert!(internal.is_internal());
    assert_eq!(*internal.branch_length().unwrap(), 3.0);
    let &[a, b] = internal.children() else {
        panic!("internal vertex should have two children");
    };

    assert_eq!(tree.vertex(a).label(), Some("A"));
    assert_eq!(tree.vertex(b).label(), Some("B"));
    assert_eq!(tree.vertex(root_right).label(), Some("C"));

    // - Parent relationships
    assert_eq!(internal.parent(), Some(root_index));
    assert_eq!(tree.vertex(a).parent(), Some(root_left));
    assert_eq!(tree.vertex(root_right).parent(), Some(root_index));
}

#[test]
fn test_fasttree_output() {
    // Trifurcating root, support values, scientific notation, trailing newline
    let newick = "(A/HongKong/1968:0.0523,(A/Victoria/1975:0.0101,A/Texas/1977:5e-9)0.874:0.0234,X:0.1);\n";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.root().children().len(), 3);
    assert_eq!(tree.leaf_labels(), vec!["A/HongKong/1968", "A/Victoria/1975", "A/Texas/1977", "X"]);

    let support = tree.vertex(tree.root().children()[1]);
    assert_eq!(support.label(), Some("0.874"));
    assert_eq!(*support.branch_length().unwrap(), 0.0234);

    let texas = tree.find_leaves("A/Texas/1977")[0];
    assert_eq!(*tree.vertex(texas).branch_length().unwrap(), 5e-9);
}

#[test]
fn test_multifurcation_without_branch_lengths() {
    let tree = parse_str("(A,B,C,D,(E,F,G));").unwrap();
    assert_eq!(tree.num_leaves(), 7);
    assert_eq!(tree.root().children().len(), 5);
    assert!(!tree.vertices_have_branch_lengths());
    assert_eq!(tree.total_branch_length(), 0.0);
}

#[test]
fn test_whitespace_and_comments() {
    let newick = "[&U] ( A : 1.0 [first] ,\n\t'B c' :2 ) [root comment] ;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.leaf_labels(), vec!["A", "B c"]);
    assert_eq!(tree.total_branch_length(), 3.0);
}

#[test]
fn test_single_leaf_tree() {
    let tree = parse_str("A;").unwrap();
    assert_eq!(tree.num_vertices(), 1);
    assert!(tree.root().is_leaf());
    assert_eq!(to_newick(&tree), "A;");
}

#[test]
fn test_negative_branch_length() {
    // Distance methods may estimate slightly negative edges
    let newick = "(A/HongKong/1968:0.1,B:-0.001,(C:0.2,D:0.3):0.05);";
    let tree = parse_str(newick).unwrap();

    let b = tree.find_leaves("B")[0];
    assert_eq!(*tree.vertex(b).branch_length().unwrap(), -0.001);
    assert!(tree.vertex(b).branch_length().unwrap().is_negative());
    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_unlabelled_leaves() {
    let tree = parse_str("(,(,A));").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.leaf_labels(), vec!["", "", "A"]);
    assert!(tree.is_valid());
    assert_eq!(to_newick(&tree), "(,(,A));");

    let tree = parse_str("(A,:0.5,B);").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    let unlabelled = tree.vertex(tree.root().children()[1]);
    assert_eq!(unlabelled.label(), None);
    assert_eq!(*unlabelled.branch_length().unwrap(), 0.5);
}

#[test]
fn test_parse_all() {
    let input = "(A,B);\n[second]\n((A,B),C);\n";
    let trees = NewickParser::new().parse_all(ByteParser::for_str(input)).unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].num_leaves(), 2);
    assert_eq!(trees[1].num_leaves(), 3);
}

// --- TESTS PARSING ERRORS ---
fn error_kind(newick: &str) -> ParsingErrorType {
    parse_str(newick).unwrap_err().kind().clone()
}

#[test]
fn test_missing_semicolon() {
    assert!(matches!(error_kind("(A,B)"), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_unbalanced_parentheses() {
    assert!(matches!(error_kind("((A,B),C;"), ParsingErrorType::InvalidNewickString(_)));
    assert_eq!(error_kind("((A,B),C"), ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_non_finite_branch_length() {
    let err = parse_str("(A:1e999,B:0.2);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(msg) if msg.contains("finite")));
}

#[test]
fn test_invalid_branch_length() {
    assert!(matches!(error_kind("(A:x,B);"), ParsingErrorType::InvalidNewickString(_)));
    assert!(matches!(error_kind("(A:,B);"), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_empty_input() {
    assert_eq!(error_kind(""), ParsingErrorType::UnexpectedEOF);
    assert_eq!(error_kind("  [only a comment] "), ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_error_reports_position() {
    let err = parse_str("(A,B)x:1 C;").unwrap_err();
    assert_eq!(err.position(), 9);
    assert!(err.to_string().contains("position 9"));
}

// --- TESTS WRITING ---
#[test]
fn test_to_newick_round_trip() {
    let newick = "((A:1,B:2.5)0.9:0.25,'A/Hong Kong/1968':0.001,'O''Brien':3);";
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_to_newick_branch_length_format() {
    let tree = parse_str("(A:0.0,B:0.020,C:5e-9,D:1.5E2);").unwrap();
    assert_eq!(to_newick(&tree), "(A:0,B:0.02,C:0.000000005,D:150);");
}

#[test]
fn test_to_newick_skips_root_branch_length() {
    let tree = parse_str("((A:1,B:1):1,C:2):0.5;").unwrap();
    assert_eq!(to_newick(&tree), "((A:1,B:1):1,C:2);");
}

// --- TESTS FILES ---
#[test]
fn test_write_and_read_tree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tree.nwk");
    let tree = parse_str("(A:0.1,(B:0.2,C:0.3)0.99:0.4,D:0.5);").unwrap();

    write_tree(&path, &tree).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "(A:0.1,(B:0.2,C:0.3)0.99:0.4,D:0.5);\n");

    let reread = read_tree(&path).unwrap();
    assert_eq!(to_newick(&reread), to_newick(&tree));
}

#[test]
fn test_read_tree_requires_exactly_one_tree() {
    let dir = tempdir().unwrap();

    let empty = dir.path().join("empty.nwk");
    fs::write(&empty, "").unwrap();
    assert_eq!(read_tree(&empty).unwrap_err().kind(), &ParsingErrorType::NoTrees);

    let two = dir.path().join("two.nwk");
    fs::write(&two, "(A,B);\n(A,C);\n").unwrap();
    assert_eq!(read_tree(&two).unwrap_err().kind(), &ParsingErrorType::MultipleTrees(2));
    assert_eq!(parse_file(&two).unwrap().len(), 2);
}

#[test]
fn test_read_tree_missing_file() {
    let dir = tempdir().unwrap();
    let err = read_tree(dir.path().join("missing.nwk")).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
