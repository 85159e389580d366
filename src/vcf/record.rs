//! VCF record representation
//!
//! One data line of a VCF file. INFO entries are kept as an ordered list of
//! raw key/value pairs and the FORMAT/sample columns are kept verbatim, so
//! a record that is not annotated round-trips byte-for-byte through parse
//! and `Display`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single VCF record representing one variant line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcfRecord {
    /// Chromosome name (e.g., "chr1", "1", "X", "chrM")
    pub chrom: String,

    /// 1-based position of the first base in the reference allele
    pub pos: u64,

    /// Variant identifier (e.g., rsID), None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Reference allele
    pub reference: String,

    /// Alternate allele(s)
    pub alternate: Vec<String>,

    /// Raw quality column, None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// Raw filter column, None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// INFO entries in declaration order; a value of None is a flag
    #[serde(default)]
    pub info: Vec<(String, Option<String>)>,

    /// Raw FORMAT column, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Raw per-sample columns, if present
    #[serde(default)]
    pub samples: Vec<String>,
}

impl VcfRecord {
    /// Get the value of an INFO entry by key.
    ///
    /// Returns `None` for an absent key and for a valueless flag.
    pub fn info(&self, key: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Replace the value of an existing INFO entry in place, preserving its
    /// position; appends a new entry when the key is absent.
    pub fn set_info(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.info.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = Some(value),
            None => self.info.push((key.to_string(), Some(value))),
        }
    }
}

impl fmt::Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.id.as_deref().unwrap_or("."),
            self.reference,
            self.alternate.join(","),
            self.quality.as_deref().unwrap_or("."),
            self.filter.as_deref().unwrap_or("."),
        )?;

        // INFO field
        if self.info.is_empty() {
            write!(f, "\t.")?;
        } else {
            let info_str: Vec<String> = self
                .info
                .iter()
                .map(|(k, v)| match v {
                    Some(v) => format!("{}={}", k, v),
                    None => k.clone(),
                })
                .collect();
            write!(f, "\t{}", info_str.join(";"))?;
        }

        // FORMAT and samples if present
        if let Some(format) = &self.format {
            write!(f, "\t{}", format)?;
            for sample in &self.samples {
                write!(f, "\t{}", sample)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_info(info: Vec<(String, Option<String>)>) -> VcfRecord {
        VcfRecord {
            chrom: "chr1".to_string(),
            pos: 12345,
            id: None,
            reference: "A".to_string(),
            alternate: vec!["G".to_string()],
            quality: None,
            filter: None,
            info,
            format: None,
            samples: Vec::new(),
        }
    }

    #[test]
    fn test_info_get() {
        let record = record_with_info(vec![
            ("DP".to_string(), Some("42".to_string())),
            ("DB".to_string(), None),
        ]);
        assert_eq!(record.info("DP"), Some("42"));
        assert_eq!(record.info("DB"), None); // flag has no value
        assert_eq!(record.info("CSQ"), None);
    }

    #[test]
    fn test_set_info_preserves_position() {
        let mut record = record_with_info(vec![
            ("DP".to_string(), Some("42".to_string())),
            ("CSQ".to_string(), Some("a|b".to_string())),
            ("DB".to_string(), None),
        ]);
        record.set_info("CSQ", "a|b|X");
        assert_eq!(record.info.len(), 3);
        assert_eq!(record.info[1], ("CSQ".to_string(), Some("a|b|X".to_string())));
    }

    #[test]
    fn test_set_info_appends_missing_key() {
        let mut record = record_with_info(vec![]);
        record.set_info("NEW", "1");
        assert_eq!(record.info("NEW"), Some("1"));
    }

    #[test]
    fn test_display_minimal() {
        let record = record_with_info(vec![]);
        assert_eq!(record.to_string(), "chr1\t12345\t.\tA\tG\t.\t.\t.");
    }

    #[test]
    fn test_display_full() {
        let mut record = record_with_info(vec![
            ("DP".to_string(), Some("42".to_string())),
            ("DB".to_string(), None),
        ]);
        record.id = Some("rs123".to_string());
        record.quality = Some("50".to_string());
        record.filter = Some("PASS".to_string());
        record.format = Some("GT:DP".to_string());
        record.samples = vec!["0/1:30".to_string(), "1/1:25".to_string()];

        assert_eq!(
            record.to_string(),
            "chr1\t12345\trs123\tA\tG\t50\tPASS\tDP=42;DB\tGT:DP\t0/1:30\t1/1:25"
        );
    }
}
