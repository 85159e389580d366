//! CLI utilities for anno-vep
//!
//! The streaming entry point lives here rather than in the binary so the
//! whole annotate pipeline can be unit tested against in-memory readers and
//! writers.

use std::io::{BufRead, Write};

use crate::csq::CsqAnnotator;
use crate::error::AnnoError;
use crate::vcf::{parse_vcf_line, VcfReader};

/// Outcome counters for one annotation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateStats {
    /// Records forwarded downstream
    pub records: u64,
    /// Records whose CSQ field was rewritten
    pub annotated: u64,
    /// Lines forwarded verbatim because they did not parse as records
    pub passed_through: u64,
    /// Whether the CSQ header Format declaration was patched
    pub schema_patched: bool,
}

/// Annotate a VCF stream.
///
/// Patches the CSQ header Format declaration once, then forwards every
/// record in input order, rewriting the CSQ field of records that carry a
/// non-empty one. A missing CSQ header declaration is reported through
/// `schema_patched: false` while records are still annotated. No record is
/// ever dropped; lines that fail to parse are forwarded verbatim.
pub fn annotate_stream<R: BufRead, W: Write>(
    mut reader: VcfReader<R>,
    writer: &mut W,
    annotator: &CsqAnnotator,
) -> Result<AnnotateStats, AnnoError> {
    let mut stats = AnnotateStats::default();

    stats.schema_patched = match reader
        .header_mut()
        .patch_csq_format(annotator.field_name(), annotator.tag())
    {
        Ok(()) => true,
        Err(AnnoError::SchemaNotFound { .. }) => false,
        Err(e) => return Err(e),
    };

    for line in &reader.header().lines {
        writeln!(writer, "{}", line).map_err(|e| AnnoError::io(e.to_string()))?;
    }

    while let Some(line) = reader.read_line()? {
        match parse_vcf_line(&line) {
            Ok(mut record) => {
                // absent or empty CSQ leaves the record untouched
                if let Some(csq) = record.info(annotator.field_name()) {
                    if !csq.is_empty() {
                        let new_csq = annotator.annotate(csq);
                        record.set_info(annotator.field_name(), new_csq);
                        stats.annotated += 1;
                    }
                }
                writeln!(writer, "{}", record).map_err(|e| AnnoError::io(e.to_string()))?;
            }
            Err(_) => {
                stats.passed_through += 1;
                writeln!(writer, "{}", line).map_err(|e| AnnoError::io(e.to_string()))?;
            }
        }
        stats.records += 1;
    }

    Ok(stats)
}
