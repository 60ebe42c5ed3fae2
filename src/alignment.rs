//! Reading, gap adjustment and writing of FASTA alignments.
//!
//! The alignment handed to tree inference must have one gap column at a fixed
//! position in every record but one, whose sequence already carries a real
//! residue there. [AdjustmentRule] describes that edit, [adjust_alignment_file]
//! applies it from file to file.
//!
//! # Example
//! ```
//! use bio::io::fasta::Record;
//! use phyloprep::alignment::AdjustmentRule;
//!
//! let rule = AdjustmentRule::default();
//! let record = Record::with_attrs("X", None, b"ACGTACGTACGTACGTACGTACGTACGT");
//! let adjusted = rule.adjust_record(&record);
//! assert_eq!(adjusted.seq(), b"ACGTACGTACGTACGTACGTACG-TACGT");
//! ```

use crate::error::{PipelineError, Result};
use bio::io::fasta;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::Path;

/// Record id that keeps its sequence unchanged by default.
pub const DEFAULT_EXCEPTION_ID: &str = "A/Victoria/1975";
/// Default 0-based column before which the gap is inserted.
pub const DEFAULT_GAP_POSITION: usize = 23;
/// Default gap character.
pub const DEFAULT_GAP: u8 = b'-';

// =#========================================================================#=
// ADJUSTMENT RULE
// =#========================================================================#=
/// Inserts a single gap character at a fixed column into every record,
/// except the one whose id equals `exception_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentRule {
    /// Id of the record left untouched
    pub exception_id: String,
    /// 0-based column the gap is inserted before
    pub position: usize,
    /// Gap character to insert
    pub gap: u8,
}

impl Default for AdjustmentRule {
    fn default() -> Self {
        Self {
            exception_id: DEFAULT_EXCEPTION_ID.to_string(),
            position: DEFAULT_GAP_POSITION,
            gap: DEFAULT_GAP,
        }
    }
}

impl AdjustmentRule {
    /// Creates a rule with the given exception, position and gap character.
    pub fn new(exception_id: impl Into<String>, position: usize, gap: u8) -> Self {
        Self {
            exception_id: exception_id.into(),
            position,
            gap,
        }
    }

    /// Returns whether `record` is the exception and stays unchanged.
    pub fn is_exception(&self, record: &fasta::Record) -> bool {
        record.id() == self.exception_id
    }

    /// Returns the adjusted copy of a record.
    ///
    /// The exception record is returned unchanged. Any other record gets the
    /// gap inserted before column `position`, or appended if the sequence is
    /// shorter than that. Id and description are kept.
    pub fn adjust_record(&self, record: &fasta::Record) -> fasta::Record {
        if self.is_exception(record) {
            return record.clone();
        }

        let seq = record.seq();
        let split = self.position.min(seq.len());
        let mut adjusted = Vec::with_capacity(seq.len() + 1);
        adjusted.extend_from_slice(&seq[..split]);
        adjusted.push(self.gap);
        adjusted.extend_from_slice(&seq[split..]);

        fasta::Record::with_attrs(record.id(), record.desc(), &adjusted)
    }

    /// Adjusts all records, keeping their order.
    ///
    /// Logs a warning if no record carries the exception id, in which case
    /// every record is adjusted.
    pub fn adjust(&self, records: &[fasta::Record]) -> Vec<fasta::Record> {
        if !records.iter().any(|r| self.is_exception(r)) {
            warn!(
                "No record with id '{}' found, the gap is inserted into all {} records",
                self.exception_id,
                records.len()
            );
        }
        records.iter().map(|r| self.adjust_record(r)).collect()
    }
}

// =#========================================================================#=
// SUMMARY
// =#========================================================================#=
/// Outcome of adjusting an alignment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentSummary {
    /// Number of records read and written
    pub num_records: usize,
    /// Number of records that received a gap
    pub num_adjusted: usize,
    /// Whether the exception record was present
    pub exception_found: bool,
    /// Distinct sequence lengths after adjustment
    pub lengths: BTreeSet<usize>,
}

impl AlignmentSummary {
    /// Returns whether all adjusted sequences have the same length.
    pub fn is_equal_length(&self) -> bool {
        self.lengths.len() <= 1
    }
}

/// Collects the distinct sequence lengths of the records.
///
/// Logs a warning if they differ, since a multiple sequence alignment is
/// expected to have equally long rows.
pub fn check_lengths(records: &[fasta::Record]) -> BTreeSet<usize> {
    let lengths: BTreeSet<usize> = records.iter().map(|r| r.seq().len()).collect();
    if lengths.len() > 1 {
        warn!("Alignment rows differ in length: {lengths:?}");
    }
    lengths
}

// =#========================================================================#=
// FILE I/O
// =#========================================================================#=
/// Reads all FASTA records of a file, in file order.
///
/// # Errors
/// * [PipelineError::Io] if the file cannot be opened
/// * [PipelineError::Fasta] if a record is malformed
pub fn read_alignment<P: AsRef<Path>>(path: P) -> Result<Vec<fasta::Record>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;

    let fasta_error = |source: io::Error| PipelineError::Fasta {
        path: path.to_path_buf(),
        source,
    };
    let mut records = Vec::new();
    for record in fasta::Reader::new(file).records() {
        let record = record.map_err(fasta_error)?;
        record
            .check()
            .map_err(|msg| fasta_error(io::Error::new(io::ErrorKind::InvalidData, msg.to_string())))?;
        records.push(record);
    }

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Writes the records to a FASTA file in order, creating or overwriting it.
///
/// # Errors
/// [PipelineError::Io] if the file cannot be created or written.
pub fn write_alignment<P: AsRef<Path>>(path: P, records: &[fasta::Record]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;

    let mut writer = fasta::Writer::new(file);
    for record in records {
        writer.write_record(record).map_err(|e| PipelineError::io(path, e))?;
    }
    writer.flush().map_err(|e| PipelineError::io(path, e))
}

/// Reads `input`, adjusts every record with `rule` and writes the result to `output`.
///
/// # Errors
/// Any read, parse or write failure, see [read_alignment] and [write_alignment].
pub fn adjust_alignment_file<P, Q>(input: P, output: Q, rule: &AdjustmentRule) -> Result<AlignmentSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let records = read_alignment(input)?;
    let exception_found = records.iter().any(|r| rule.is_exception(r));
    let adjusted = rule.adjust(&records);
    let lengths = check_lengths(&adjusted);
    write_alignment(output, &adjusted)?;

    let num_adjusted = records.iter().filter(|r| !rule.is_exception(r)).count();
    Ok(AlignmentSummary {
        num_records: adjusted.len(),
        num_adjusted,
        exception_found,
        lengths,
    })
}
