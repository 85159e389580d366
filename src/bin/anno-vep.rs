//! anno-vep CLI
//!
//! Adds a tag to the CSQ field of a VEP-annotated VCF, joined from a
//! two-column tab-separated lookup table keyed by the gene identifier
//! sub-field.

use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anno_vep::cli::annotate_stream;
use anno_vep::vcf::{open_vcf, VcfReader};
use anno_vep::{AnnoError, CsqAnnotator, LookupTable, CSQ_FIELD, GENE_FIELD_INDEX};

#[derive(Parser)]
#[command(name = "anno-vep")]
#[command(version, about = "Add tags to the CSQ field of VEP-annotated VCFs")]
#[command(
    long_about = "Append a new sub-field to every transcript annotation of the CSQ INFO \
field, looked up from a two-column tab-separated table keyed by gene identifier. The CSQ \
header's Format declaration is patched to document the new sub-field.

Examples:
  anno-vep GNOMAD_FLAG gene_flags.tsv -i input.vcf.gz -o output.vcf
  zcat input.vcf.gz | anno-vep PANEL genes.tsv > output.vcf"
)]
struct Cli {
    /// Name of the sub-field to append to every CSQ transcript annotation
    tag: String,

    /// Lookup table: one `key<TAB>value` entry per line (.gz supported)
    table: PathBuf,

    /// Input VCF file (use - for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Output VCF file (use - for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// INFO field to annotate
    #[arg(long, default_value = CSQ_FIELD)]
    csq_field: String,

    /// Zero-based sub-field index of the gene identifier within each
    /// transcript annotation
    #[arg(long, default_value_t = GENE_FIELD_INDEX)]
    gene_index: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("anno-vep: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AnnoError> {
    let table = LookupTable::load(&cli.table)?;
    let annotator = CsqAnnotator::new(table, cli.tag.clone())
        .field(cli.csq_field.clone())
        .key_index(cli.gene_index);

    let mut writer: BufWriter<Box<dyn Write>> = match &cli.output {
        Some(path) if path.to_string_lossy() != "-" => {
            let file = std::fs::File::create(path).map_err(|e| {
                AnnoError::io(format!("Failed to create '{}': {}", path.display(), e))
            })?;
            BufWriter::new(Box::new(file))
        }
        _ => BufWriter::new(Box::new(io::stdout())),
    };

    let stats = if cli.input.to_string_lossy() == "-" {
        let stdin = io::stdin();
        let reader = VcfReader::new(stdin.lock())?;
        annotate_stream(reader, &mut writer, &annotator)?
    } else {
        let reader = open_vcf(&cli.input)?;
        annotate_stream(reader, &mut writer, &annotator)?
    };

    writer
        .flush()
        .map_err(|e| AnnoError::io(e.to_string()))?;

    if !stats.schema_patched {
        eprintln!(
            "anno-vep: warning: {}",
            AnnoError::SchemaNotFound {
                field: cli.csq_field.clone()
            }
        );
    }
    eprintln!(
        "anno-vep: {} records written, {} annotated",
        stats.records, stats.annotated
    );

    Ok(())
}
