//! VCF (Variant Call Format) support
//!
//! Line-oriented VCF streaming: raw header accumulation, record parsing,
//! and byte-faithful re-serialization of untouched records.

mod header;
mod parser;
mod record;

pub use header::VcfHeader;
pub use parser::{open_vcf, parse_vcf_line, parse_vcf_string, VcfReader, VcfRecordIterator};
pub use record::VcfRecord;
