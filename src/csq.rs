//! CSQ field annotation.
//!
//! The VEP CSQ INFO field holds one comma-separated sub-entry per
//! transcript, each itself a pipe-separated list of sub-fields. The
//! annotator splits the field on both delimiters, looks up the gene
//! identifier sub-field in the lookup table, and appends the result (or an
//! empty placeholder) as a new trailing sub-field of every transcript.
//!
//! The `Format:` declaration inside the CSQ header description documents the
//! sub-field layout; [`patch_format_description`] appends the new tag name
//! to it once, before any record is processed.

use crate::lookup::LookupTable;

/// Default INFO field name holding VEP consequence annotations
pub const CSQ_FIELD: &str = "CSQ";

/// Delimiter between transcript sub-entries within the CSQ field
pub const TRANSCRIPT_DELIM: char = ',';

/// Delimiter between sub-fields within one transcript sub-entry
pub const FIELD_DELIM: char = '|';

/// Default sub-field index of the gene identifier within a transcript
/// sub-entry (the `Gene` slot of VEP's standard CSQ layout)
pub const GENE_FIELD_INDEX: usize = 4;

/// Split a CSQ field into its transcript sub-entries, in order.
///
/// An empty field yields a single empty sub-entry, so joining the result
/// back with the transcript delimiter reproduces the input.
pub fn split_transcripts(csq: &str) -> Vec<&str> {
    csq.split(TRANSCRIPT_DELIM).collect()
}

/// Split one transcript sub-entry into its sub-fields, in order.
pub fn split_fields(transcript: &str) -> Vec<&str> {
    transcript.split(FIELD_DELIM).collect()
}

/// Join transcript sub-entries back into a CSQ field.
pub fn join_transcripts<S: AsRef<str>>(transcripts: &[S]) -> String {
    transcripts
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Append the new tag name to the `Format:` declaration of a CSQ header
/// description.
///
/// The format list runs from `Format: ` to the closing quote (or to the end
/// of the string when unquoted); the tag is appended to the list with a
/// leading pipe and the remainder is preserved. Returns `None` when the
/// description carries no `Format:` declaration.
pub fn patch_format_description(description: &str, tag: &str) -> Option<String> {
    let list_start = description.find("Format: ")? + "Format: ".len();
    let list_end = description[list_start..]
        .find('"')
        .map_or(description.len(), |i| list_start + i);

    let (head, tail) = description.split_at(list_end);
    Some(format!("{}|{}{}", head, tag, tail))
}

/// Per-record CSQ annotation engine.
///
/// Owns the lookup table and the annotation configuration for the whole
/// run; [`annotate`](CsqAnnotator::annotate) is pure and reusable across
/// records.
#[derive(Debug)]
pub struct CsqAnnotator {
    /// Gene-keyed lookup table
    table: LookupTable,
    /// Name of the sub-field appended to every transcript
    tag: String,
    /// INFO field to annotate
    field: String,
    /// Sub-field index of the lookup key within each transcript
    key_index: usize,
}

impl CsqAnnotator {
    /// Create an annotator over a loaded lookup table
    pub fn new(table: LookupTable, tag: impl Into<String>) -> Self {
        Self {
            table,
            tag: tag.into(),
            field: CSQ_FIELD.to_string(),
            key_index: GENE_FIELD_INDEX,
        }
    }

    /// Configure the INFO field to annotate (default `CSQ`)
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Configure the sub-field index of the lookup key (default 4)
    pub fn key_index(mut self, index: usize) -> Self {
        self.key_index = index;
        self
    }

    /// Name of the appended sub-field
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Name of the INFO field this annotator targets
    pub fn field_name(&self) -> &str {
        &self.field
    }

    /// Annotate one CSQ field value.
    ///
    /// Every transcript sub-entry gains exactly one trailing sub-field: the
    /// table value for its gene identifier, or an empty placeholder when the
    /// gene sub-field is missing, empty, or not in the table. Sub-entry
    /// order and count are preserved.
    pub fn annotate(&self, csq: &str) -> String {
        let annotated: Vec<String> = split_transcripts(csq)
            .iter()
            .map(|transcript| {
                let fields = split_fields(transcript);
                let gene = fields.get(self.key_index).copied().unwrap_or("");
                let value = if gene.is_empty() {
                    None
                } else {
                    self.table.query(gene)
                };
                format!("{}|{}", transcript, value.unwrap_or(""))
            })
            .collect();

        join_transcripts(&annotated)
    }
}
