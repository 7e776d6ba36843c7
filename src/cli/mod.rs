//! Command-line interface for rgsam.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **collect**: collect the read groups of a SAM or FASTQ file into an `@RG` header
//! - **tag**: tag every record of a SAM file with its read group
//! - **qnames**: list the supported read name formats
//! - **version**: print the version
//!
//! ## Usage
//!
//! ```text
//! # Collect read groups from a FASTQ file
//! rgsam collect -i NA12878.fq.gz -s NA12878 -o NA12878.rg.txt
//!
//! # Pipe an aligner's output through the tagger
//! bwa mem ref.fa NA12878.fq.gz | rgsam tag -r NA12878.rg.txt -o NA12878.sam
//!
//! # Read names from an older instrument
//! rgsam collect -i run1.sam -q illumina-1.0 -o run1.rg.txt
//! ```

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::core::types::ReadNameFormat;

pub mod collect;
pub mod qnames;
pub mod tag;

/// Platform written to `@RG PL` when none is given
pub const DEFAULT_PLATFORM: &str = "illumina";

#[derive(Parser)]
#[command(name = "rgsam")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Infer read groups from read names and tag SAM records with them")]
#[command(
    long_about = "rgsam infers a read group for each read from the flowcell and lane encoded in its name.\n\nFiles with reads from more than one sample or library are not supported.\nThe read group ID and platform unit (PU) are both set to <flowcell>_<lane>.\n\n- `collect` writes the distinct read groups of a SAM or FASTQ file as @RG header lines\n- `tag` rewrites a SAM file so its header carries those lines and each record an RG tag"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect read-group information from a SAM or FASTQ file
    Collect(collect::CollectArgs),

    /// Tag reads in a SAM file with their read group
    Tag(tag::TagArgs),

    /// List supported read name formats
    Qnames,

    /// Print version
    Version,
}

/// The requested read name format, or the default with a warning
pub(crate) fn resolve_read_name_format(requested: Option<ReadNameFormat>) -> ReadNameFormat {
    requested.unwrap_or_else(|| {
        let format = ReadNameFormat::default();
        warn!("Read name format is not specified; assuming `{format}`");
        format
    })
}
