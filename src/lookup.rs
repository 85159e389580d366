//! Gene-keyed lookup table.
//!
//! Loads a two-column tab-separated file (`key<TAB>value`, one entry per
//! line) into a sorted in-memory table and answers exact-match queries by
//! binary search. Supports both plain text and gzip-compressed input.
//!
//! # Example
//!
//! ```no_run
//! use anno_vep::lookup::LookupTable;
//!
//! let table = LookupTable::load("gene_tags.tsv").unwrap();
//! if let Some(value) = table.query("ENSG00000141510") {
//!     println!("tag value: {}", value);
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};

use crate::error::AnnoError;

/// One key/value pair from the lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Lookup key (gene identifier)
    pub key: String,
    /// Value to append as the new CSQ sub-field
    pub value: String,
}

/// Sorted, queryable lookup table.
///
/// Entries are sorted ascending by byte-wise key order once at load time and
/// never mutated afterward; [`query`](LookupTable::query) relies on that
/// invariant. Duplicate keys are resolved at load time: the last occurrence
/// in file order wins.
#[derive(Debug, Clone)]
pub struct LookupTable {
    entries: Vec<TableEntry>,
}

impl LookupTable {
    /// Load a lookup table from a tab-separated file.
    ///
    /// Automatically detects gzip compression based on `.gz` extension.
    /// Lines with an empty key or no second column are skipped; a file that
    /// yields zero valid entries is a load error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AnnoError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AnnoError::Load {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

        if path.extension().is_some_and(|ext| ext == "gz") {
            let decoder = MultiGzDecoder::new(file);
            Self::from_reader(BufReader::new(decoder), &path.display().to_string())
        } else {
            Self::from_reader(BufReader::new(file), &path.display().to_string())
        }
    }

    /// Load a lookup table from a buffered reader.
    ///
    /// `source_name` is used in error messages only.
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str) -> Result<Self, AnnoError> {
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|e| AnnoError::Load {
                path: source_name.to_string(),
                msg: format!("Failed to read line: {}", e),
            })?;

            let Some((key, rest)) = line.split_once('\t') else {
                continue;
            };
            // the value column ends at the next tab, if any
            let value = match rest.split_once('\t') {
                Some((v, _)) => v,
                None => rest,
            };
            if key.is_empty() || value.is_empty() {
                continue;
            }

            entries.push(TableEntry {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        if entries.is_empty() {
            return Err(AnnoError::Load {
                path: source_name.to_string(),
                msg: "no valid key<TAB>value entries found".to_string(),
            });
        }

        // Stable sort keeps file order within equal keys; the dedup swap
        // below then makes the last file occurrence win.
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries.dedup_by(|next, prev| {
            if next.key == prev.key {
                std::mem::swap(prev, next);
                true
            } else {
                false
            }
        });

        Ok(Self { entries })
    }

    /// Look up the value for an exact key. O(log n), read-only.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|e| e.key.as_str().cmp(key))
            .ok()
            .map(|i| self.entries[i].value.as_str())
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_query() {
        let table = LookupTable::from_reader("GENE1\tA\nGENE2\tB\n".as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.query("GENE1"), Some("A"));
        assert_eq!(table.query("GENE2"), Some("B"));
        assert_eq!(table.query("GENE9"), None);
    }

    #[test]
    fn test_unsorted_input_is_sorted_at_load() {
        let table =
            LookupTable::from_reader("ZZZ\tlast\nAAA\tfirst\nMMM\tmid\n".as_bytes(), "test")
                .unwrap();
        assert_eq!(table.query("AAA"), Some("first"));
        assert_eq!(table.query("MMM"), Some("mid"));
        assert_eq!(table.query("ZZZ"), Some("last"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        // one line without a tab, one with an empty key, one valid
        let table =
            LookupTable::from_reader("GENE1\n\tvalue\nGENE2\tB\n".as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.query("GENE1"), None);
        assert_eq!(table.query("GENE2"), Some("B"));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let table = LookupTable::from_reader("GENE1\tA\textra\n".as_bytes(), "test").unwrap();
        assert_eq!(table.query("GENE1"), Some("A"));
    }

    #[test]
    fn test_empty_table_is_load_error() {
        let result = LookupTable::from_reader("no tabs here\n".as_bytes(), "test");
        assert!(matches!(result, Err(AnnoError::Load { .. })));

        let result = LookupTable::from_reader("".as_bytes(), "test");
        assert!(matches!(result, Err(AnnoError::Load { .. })));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = LookupTable::load("/nonexistent/path/genes.tsv");
        assert!(matches!(result, Err(AnnoError::Load { .. })));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let table =
            LookupTable::from_reader("GENE1\told\nGENE2\tB\nGENE1\tnew\n".as_bytes(), "test")
                .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.query("GENE1"), Some("new"));
    }

    #[test]
    fn test_empty_value_is_skipped() {
        let result = LookupTable::from_reader("GENE1\t\n".as_bytes(), "test");
        assert!(matches!(result, Err(AnnoError::Load { .. })));
    }

    #[test]
    fn test_no_trailing_newline() {
        let table = LookupTable::from_reader("GENE1\tA".as_bytes(), "test").unwrap();
        assert_eq!(table.query("GENE1"), Some("A"));
    }
}
