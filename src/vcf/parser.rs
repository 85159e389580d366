//! Line-based VCF parsing.
//!
//! Streams a VCF as raw text: header lines are accumulated verbatim into a
//! [`VcfHeader`], data lines are parsed into [`VcfRecord`]s whose `Display`
//! reproduces the input line. Supports plain and gzip-compressed files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::AnnoError;

use super::header::VcfHeader;
use super::record::VcfRecord;

/// Parse one VCF data line into a VcfRecord.
///
/// Expects the standard tab-separated columns; QUAL, FILTER, INFO, FORMAT
/// and sample columns are optional.
pub fn parse_vcf_line(line: &str) -> Result<VcfRecord, AnnoError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 5 {
        return Err(AnnoError::Parse {
            msg: format!(
                "Invalid VCF line: expected at least 5 fields, got {}",
                fields.len()
            ),
        });
    }

    let pos: u64 = fields[1].parse().map_err(|_| AnnoError::Parse {
        msg: format!("Invalid position '{}': not a valid integer", fields[1]),
    })?;

    let opt = |s: &str| {
        if s == "." {
            None
        } else {
            Some(s.to_string())
        }
    };

    let info = match fields.get(7) {
        None | Some(&".") => Vec::new(),
        Some(raw) => raw
            .split(';')
            .map(|entry| match entry.split_once('=') {
                Some((k, v)) => (k.to_string(), Some(v.to_string())),
                None => (entry.to_string(), None),
            })
            .collect(),
    };

    Ok(VcfRecord {
        chrom: fields[0].to_string(),
        pos,
        id: opt(fields[2]),
        reference: fields[3].to_string(),
        alternate: fields[4].split(',').map(String::from).collect(),
        quality: fields.get(5).and_then(|s| opt(*s)),
        filter: fields.get(6).and_then(|s| opt(*s)),
        info,
        format: fields.get(8).map(|s| s.to_string()),
        samples: fields.iter().skip(9).map(|s| s.to_string()).collect(),
    })
}

/// VCF reader that yields VcfRecord instances
pub struct VcfReader<R> {
    inner: R,
    header: VcfHeader,
}

impl<R: BufRead> VcfReader<R> {
    /// Create a new VCF reader, consuming all header lines up front
    pub fn new(mut reader: R) -> Result<Self, AnnoError> {
        let mut header = VcfHeader::default();
        let mut line = String::new();

        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| AnnoError::io(format!("Failed to read VCF header: {}", e)))?;
            if n == 0 {
                break; // header-only or empty input
            }
            if !line.starts_with('#') {
                return Err(AnnoError::Parse {
                    msg: "VCF data line encountered before #CHROM header line".to_string(),
                });
            }

            let trimmed = line.trim_end_matches(['\n', '\r']);
            header.lines.push(trimmed.to_string());
            // #CHROM is the last header line
            if trimmed.starts_with("#CHROM") {
                break;
            }
        }

        Ok(Self {
            inner: reader,
            header,
        })
    }

    /// Get a reference to the parsed header
    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Get a mutable reference to the header (for the one-time CSQ patch)
    pub fn header_mut(&mut self) -> &mut VcfHeader {
        &mut self.header
    }

    /// Read the next raw data line, without the trailing newline.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>, AnnoError> {
        let mut line = String::new();
        let n = self
            .inner
            .read_line(&mut line)
            .map_err(|e| AnnoError::io(format!("Failed to read VCF line: {}", e)))?;
        if n == 0 {
            return Ok(None);
        }
        line.truncate(line.trim_end_matches(['\n', '\r']).len());
        Ok(Some(line))
    }

    /// Read the next VCF record
    pub fn read_record(&mut self) -> Result<Option<VcfRecord>, AnnoError> {
        match self.read_line()? {
            Some(line) => parse_vcf_line(&line).map(Some),
            None => Ok(None),
        }
    }

    /// Iterate over all records in the VCF file
    pub fn records(self) -> VcfRecordIterator<R> {
        VcfRecordIterator {
            reader: self,
            done: false,
        }
    }
}

/// Open a VCF file from a path.
///
/// Automatically detects gzip compression based on `.gz` extension.
pub fn open_vcf<P: AsRef<Path>>(path: P) -> Result<VcfReader<Box<dyn BufRead>>, AnnoError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| AnnoError::io(format!("Failed to open VCF file '{}': {}", path.display(), e)))?;

    let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    VcfReader::new(reader)
}

/// Parse VCF from a string
pub fn parse_vcf_string(vcf_content: &str) -> Result<VcfReader<BufReader<&[u8]>>, AnnoError> {
    VcfReader::new(BufReader::new(vcf_content.as_bytes()))
}

/// Iterator over VCF records
pub struct VcfRecordIterator<R> {
    reader: VcfReader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for VcfRecordIterator<R> {
    type Item = Result<VcfRecord, AnnoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_VCF: &str = "\
##fileformat=VCFv4.2
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\trs1\tA\tG\t50\tPASS\tDP=42
chr2\t200\t.\tC\tT,TA\t.\t.\t.
";

    #[test]
    fn test_parse_line_round_trip() {
        let lines = [
            "chr1\t100\trs1\tA\tG\t50\tPASS\tDP=42;DB;CSQ=a|b,c|d",
            "chr2\t200\t.\tC\tT,TA\t.\t.\t.",
            "chr3\t300\t.\tG\tA\t99.5\tq10\tDP=7\tGT:DP\t0/1:30\t1/1:25",
        ];
        for line in lines {
            let record = parse_vcf_line(line).unwrap();
            assert_eq!(record.to_string(), line);
        }
    }

    #[test]
    fn test_parse_line_too_few_fields() {
        assert!(matches!(
            parse_vcf_line("chr1\t100\t.\tA"),
            Err(AnnoError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_line_bad_position() {
        assert!(matches!(
            parse_vcf_line("chr1\tnot-a-number\t.\tA\tG"),
            Err(AnnoError::Parse { .. })
        ));
    }

    #[test]
    fn test_reader_splits_header_and_records() {
        let reader = parse_vcf_string(SAMPLE_VCF).unwrap();
        assert_eq!(reader.header().len(), 3);
        assert!(reader.header().lines[2].starts_with("#CHROM"));

        let records: Vec<VcfRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chrom, "chr1");
        assert_eq!(records[0].info("DP"), Some("42"));
        assert_eq!(records[1].alternate, vec!["T", "TA"]);
        assert!(records[1].info.is_empty());
    }

    #[test]
    fn test_reader_rejects_headerless_data() {
        let result = parse_vcf_string("chr1\t100\t.\tA\tG\n");
        assert!(matches!(result, Err(AnnoError::Parse { .. })));
    }

    #[test]
    fn test_reader_header_only() {
        let reader = parse_vcf_string("##fileformat=VCFv4.2\n").unwrap();
        assert_eq!(reader.header().len(), 1);
        let records: Vec<_> = reader.records().collect();
        assert!(records.is_empty());
    }
}
