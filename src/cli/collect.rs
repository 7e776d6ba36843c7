use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::{resolve_read_name_format, DEFAULT_PLATFORM};
use crate::core::read_group::ReadGroupMetadata;
use crate::core::types::{InputFormat, ReadNameFormat};
use crate::pipeline::{Collector, CollectorConfig};
use crate::utils::io::{display_path, is_stdio, open_input, open_output};
use crate::utils::validation::{file_extension, file_stem, validate_header_value};

#[derive(Args)]
pub struct CollectArgs {
    /// Input SAM or FASTQ file, optionally gzipped. Use '-' or omit for stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output read-group header file. Use '-' or omit for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input file format (inferred from the input file extension by default)
    #[arg(short, long, value_enum)]
    pub format: Option<InputFormat>,

    /// Read name format: illumina-1.0, illumina-1.8 or broad-1.0 [default: illumina-1.8]
    #[arg(short, long)]
    pub qnformat: Option<ReadNameFormat>,

    /// Sample name (defaults to the input file name without extension)
    #[arg(short, long)]
    pub sample: Option<String>,

    /// Library name (defaults to the sample name)
    #[arg(short, long)]
    pub library: Option<String>,

    /// Sequencing platform
    #[arg(short, long, default_value = DEFAULT_PLATFORM)]
    pub platform: String,
}

/// Execute collect subcommand
///
/// # Errors
///
/// Returns an error if the metadata is invalid, a file cannot be opened, or
/// the input cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CollectArgs, verbose: bool) -> anyhow::Result<()> {
    let read_name_format = resolve_read_name_format(args.qnformat);
    let input = args.input.as_deref();

    let metadata = resolve_metadata(&args, input)?;
    let input_format = resolve_input_format(args.format, input)?;

    let reader = open_input(input)
        .with_context(|| format!("Failed to open input {}", display_path(input, "stdin")))?;
    let mut writer = open_output(args.output.as_deref()).with_context(|| {
        format!(
            "Failed to create output {}",
            display_path(args.output.as_deref(), "stdout")
        )
    })?;

    let collector = Collector::new(CollectorConfig {
        read_name_format,
        input_format,
        metadata,
    });
    let read_groups = collector.run(reader, &mut writer)?;

    if verbose {
        for read_group in read_groups.iter() {
            info!(read_group = %read_group, "Read group");
        }
    }
    if read_groups.contains("") {
        warn!("Some read names did not match `{read_name_format}`; an empty read group was collected");
    }

    Ok(())
}

/// Sample, library and platform with defaults applied
fn resolve_metadata(args: &CollectArgs, input: Option<&Path>) -> anyhow::Result<ReadGroupMetadata> {
    let sample = match &args.sample {
        Some(sample) => sample.clone(),
        None => {
            let path = input
                .filter(|p| !is_stdio(Some(*p)))
                .context("--sample must be specified when reading from stdin")?;
            file_stem(path).with_context(|| {
                format!(
                    "Cannot derive a sample name from {}; use --sample",
                    path.display()
                )
            })?
        }
    };
    let library = args.library.clone().unwrap_or_else(|| sample.clone());

    validate_header_value("sample", &sample)?;
    validate_header_value("library", &library)?;
    validate_header_value("platform", &args.platform)?;

    Ok(ReadGroupMetadata::new(sample, library, args.platform.clone()))
}

/// The requested input format, or the one implied by the input's extension
fn resolve_input_format(
    requested: Option<InputFormat>,
    input: Option<&Path>,
) -> anyhow::Result<InputFormat> {
    if let Some(format) = requested {
        return Ok(format);
    }

    let Some(path) = input.filter(|p| !is_stdio(Some(*p))) else {
        warn!("Input file name and format are not specified; assuming SAM");
        return Ok(InputFormat::Sam);
    };

    match file_extension(path) {
        None => {
            warn!(input = %path.display(), "Input file format could not be inferred; assuming SAM");
            Ok(InputFormat::Sam)
        }
        Some(ext) => InputFormat::from_extension(&ext).ok_or_else(|| {
            anyhow::anyhow!("Unsupported input file format '{ext}'; use --format sam or --format fastq")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_args(input: Option<&str>, sample: Option<&str>) -> CollectArgs {
        CollectArgs {
            input: input.map(PathBuf::from),
            output: None,
            format: None,
            qnformat: None,
            sample: sample.map(str::to_string),
            library: None,
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }

    #[test]
    fn test_metadata_defaults_from_input_stem() {
        let args = collect_args(Some("/data/NA12878.fq.gz"), None);
        let metadata = resolve_metadata(&args, args.input.as_deref()).unwrap();
        assert_eq!(metadata, ReadGroupMetadata::new("NA12878", "NA12878", "illumina"));
    }

    #[test]
    fn test_metadata_requires_sample_for_stdin() {
        for input in [None, Some("-")] {
            let args = collect_args(input, None);
            assert!(resolve_metadata(&args, args.input.as_deref()).is_err());
        }
        let args = collect_args(None, Some("s1"));
        let metadata = resolve_metadata(&args, None).unwrap();
        assert_eq!(metadata.library, "s1");
    }

    #[test]
    fn test_metadata_rejects_tabs() {
        let args = collect_args(None, Some("bad\tsample"));
        assert!(resolve_metadata(&args, None).is_err());
    }

    #[test]
    fn test_resolve_input_format() {
        let sam = Some(Path::new("x.sam"));
        let fastq = Some(Path::new("x.fastq.gz"));
        assert_eq!(resolve_input_format(None, sam).unwrap(), InputFormat::Sam);
        assert_eq!(resolve_input_format(None, fastq).unwrap(), InputFormat::Fastq);
        assert_eq!(
            resolve_input_format(Some(InputFormat::Fastq), sam).unwrap(),
            InputFormat::Fastq
        );
        assert_eq!(resolve_input_format(None, None).unwrap(), InputFormat::Sam);
        assert_eq!(
            resolve_input_format(None, Some(Path::new("noext"))).unwrap(),
            InputFormat::Sam
        );
        assert!(resolve_input_format(None, Some(Path::new("x.bam"))).is_err());
    }
}
