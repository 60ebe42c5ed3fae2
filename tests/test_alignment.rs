use bio::io::fasta::Record;
use phyloprep::alignment::{
    AdjustmentRule, adjust_alignment_file, check_lengths, read_alignment, write_alignment,
};
use phyloprep::error::PipelineError;
use std::fs;
use tempfile::tempdir;

const SEQ: &str = "ACGTACGTACGTACGTACGTACGTACGT";

fn three_record_fasta() -> String {
    format!(">A/HongKong/1968\n{SEQ}\n>A/Victoria/1975\n{SEQ}\n>X\n{SEQ}\n")
}

// --- TESTS RECORD ADJUSTMENT ---
#[test]
fn test_adjust_record_inserts_gap_at_23() {
    let rule = AdjustmentRule::default();
    let record = Record::with_attrs("A/HongKong/1968", Some("HA segment"), SEQ.as_bytes());
    let adjusted = rule.adjust_record(&record);

    let expected = format!("{}-{}", &SEQ[..23], &SEQ[23..]);
    assert_eq!(adjusted.seq(), expected.as_bytes());
    assert_eq!(adjusted.seq().len(), SEQ.len() + 1);
    assert_eq!(adjusted.id(), "A/HongKong/1968");
    assert_eq!(adjusted.desc(), Some("HA segment"));
}

#[test]
fn test_adjust_record_keeps_exception() {
    let rule = AdjustmentRule::default();
    let record = Record::with_attrs("A/Victoria/1975", None, SEQ.as_bytes());
    let adjusted = rule.adjust_record(&record);
    assert_eq!(adjusted.id(), record.id());
    assert_eq!(adjusted.seq(), record.seq());
}

#[test]
fn test_adjust_record_short_sequence_appends_gap() {
    let rule = AdjustmentRule::default();
    let record = Record::with_attrs("short", None, b"ACGT");
    assert_eq!(rule.adjust_record(&record).seq(), b"ACGT-");
}

#[test]
fn test_custom_rule() {
    let rule = AdjustmentRule::new("ref", 2, b'N');
    let records = vec![
        Record::with_attrs("ref", None, b"AAAA"),
        Record::with_attrs("q", None, b"CCCC"),
    ];
    let adjusted = rule.adjust(&records);
    assert_eq!(adjusted[0].seq(), b"AAAA");
    assert_eq!(adjusted[1].seq(), b"CCNCC");
}

#[test]
fn test_adjust_without_exception_adjusts_all() {
    let rule = AdjustmentRule::new("absent", 1, b'-');
    let records = vec![Record::with_attrs("a", None, b"AC"), Record::with_attrs("b", None, b"GT")];
    let adjusted = rule.adjust(&records);
    assert!(adjusted.iter().all(|r| r.seq().len() == 3));
}

#[test]
fn test_check_lengths() {
    let records = vec![
        Record::with_attrs("a", None, b"ACGT"),
        Record::with_attrs("b", None, b"ACG"),
        Record::with_attrs("c", None, b"ACGT"),
    ];
    assert_eq!(check_lengths(&records).into_iter().collect::<Vec<_>>(), vec![3, 4]);
}

// --- TESTS FILES ---
#[test]
fn test_three_record_scenario() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("alignment.fasta");
    let output = dir.path().join("alignment_std.fasta");
    fs::write(&input, three_record_fasta()).unwrap();

    let summary = adjust_alignment_file(&input, &output, &AdjustmentRule::default()).unwrap();
    assert_eq!(summary.num_records, 3);
    assert_eq!(summary.num_adjusted, 2);
    assert!(summary.exception_found);
    assert_eq!(summary.lengths.iter().copied().collect::<Vec<_>>(), vec![28, 29]);
    assert!(!summary.is_equal_length());

    let records = read_alignment(&output).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["A/HongKong/1968", "A/Victoria/1975", "X"]);

    let gapped = format!("{}-{}", &SEQ[..23], &SEQ[23..]);
    assert_eq!(records[0].seq(), gapped.as_bytes());
    assert_eq!(records[1].seq(), SEQ.as_bytes());
    assert_eq!(records[2].seq(), gapped.as_bytes());
    assert_eq!(records[0].seq()[23], b'-');
}

#[test]
fn test_write_read_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("round_trip.fasta");
    let records = vec![
        Record::with_attrs("A/HongKong/1968", Some("H3N2 HA"), b"ACGTACGTAC-GTACG"),
        Record::with_attrs("A/Victoria/1975", None, b"ACGTACGTACAGTACG"),
    ];

    write_alignment(&path, &records).unwrap();
    let reread = read_alignment(&path).unwrap();
    assert_eq!(reread.len(), records.len());
    for (read, written) in reread.iter().zip(&records) {
        assert_eq!(read.id(), written.id());
        assert_eq!(read.desc(), written.desc());
        assert_eq!(read.seq(), written.seq());
    }
}

#[test]
fn test_output_is_overwritten() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fasta");
    let output = dir.path().join("out.fasta");
    fs::write(&input, ">X\nACGT\n").unwrap();
    fs::write(&output, "stale content that is much longer than the result\n").unwrap();

    adjust_alignment_file(&input, &output, &AdjustmentRule::new("none", 2, b'-')).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), ">X\nAC-GT\n");
}

#[test]
fn test_missing_input() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.fasta");
    let err = read_alignment(&missing).unwrap_err();
    assert!(matches!(err, PipelineError::Io { path, .. } if path == missing));
}

#[test]
fn test_malformed_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("malformed.fasta");
    fs::write(&path, "ACGT\n>X\nACGT\n").unwrap();
    let err = read_alignment(&path).unwrap_err();
    assert!(matches!(err, PipelineError::Fasta { .. }));
}

#[test]
fn test_unwritable_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("no_such_dir").join("out.fasta");
    let err = write_alignment(&output, &[]).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }));
}
