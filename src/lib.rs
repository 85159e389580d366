//! anno-vep: add tags to the CSQ field of VEP-annotated VCFs
//!
//! Joins each transcript annotation of a VCF's CSQ INFO field against an
//! external two-column tab-separated lookup table keyed by gene identifier,
//! appends the looked-up value as a new trailing sub-field, and patches the
//! CSQ header line's `Format:` declaration to document the new sub-field.
//!
//! # Example
//!
//! ```
//! use anno_vep::{CsqAnnotator, LookupTable};
//!
//! let table = LookupTable::from_reader("GENE1\tA\nGENE2\tB\n".as_bytes(), "inline").unwrap();
//! let annotator = CsqAnnotator::new(table, "MY_TAG");
//!
//! let csq = "t1|x|y|z|GENE1,t2|x|y|z|GENE2";
//! assert_eq!(annotator.annotate(csq), "t1|x|y|z|GENE1|A,t2|x|y|z|GENE2|B");
//! ```

pub mod cli;
pub mod csq;
pub mod error;
pub mod lookup;
pub mod vcf;

// Re-export commonly used types
pub use csq::{patch_format_description, CsqAnnotator, CSQ_FIELD, GENE_FIELD_INDEX};
pub use error::AnnoError;
pub use lookup::{LookupTable, TableEntry};
pub use vcf::{open_vcf, parse_vcf_line, VcfHeader, VcfReader, VcfRecord};

/// Result type alias for anno-vep operations
pub type Result<T> = std::result::Result<T, AnnoError>;
