//! VCF header handling.
//!
//! The header is kept as raw `##` and `#CHROM` lines so it can be written
//! back unchanged, apart from the one-time patch of the CSQ INFO line's
//! `Format:` declaration.

use crate::csq::patch_format_description;
use crate::error::AnnoError;

/// A parsed VCF file header
#[derive(Debug, Clone, Default)]
pub struct VcfHeader {
    /// Raw header lines in file order, including the final `#CHROM` line
    pub lines: Vec<String>,
}

impl VcfHeader {
    /// Number of header lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no header lines were read
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the `##INFO=<ID=<field>,...>` declaration line, if present
    pub fn info_line(&self, field: &str) -> Option<&str> {
        let prefix = format!("##INFO=<ID={},", field);
        self.lines
            .iter()
            .find(|line| line.starts_with(&prefix))
            .map(|line| line.as_str())
    }

    /// Append `|<tag>` to the `Format:` declaration of the named INFO field.
    ///
    /// Applied once, before any record is processed. Missing header line or
    /// missing `Format:` declaration is `SchemaNotFound`; the caller reports
    /// it as a warning and records are still annotated.
    pub fn patch_csq_format(&mut self, field: &str, tag: &str) -> Result<(), AnnoError> {
        let prefix = format!("##INFO=<ID={},", field);
        for line in &mut self.lines {
            if line.starts_with(&prefix) {
                if let Some(patched) = patch_format_description(line, tag) {
                    *line = patched;
                    return Ok(());
                }
            }
        }

        Err(AnnoError::SchemaNotFound {
            field: field.to_string(),
        })
    }
}
