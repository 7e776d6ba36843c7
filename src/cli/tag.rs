use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::{info, warn};

use crate::core::types::ReadNameFormat;
use crate::pipeline::Tagger;
use crate::utils::io::{display_path, is_stdio, open_input, open_output};

#[derive(Args)]
pub struct TagArgs {
    /// Input SAM file, optionally gzipped. Use '-' or omit for stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Read-group header file, as written by `rgsam collect`. Use '-' for stdin
    /// when --input is a file
    #[arg(short = 'r', long = "rg", required = true)]
    pub read_groups: PathBuf,

    /// Output SAM file. Use '-' or omit for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read name format: illumina-1.0, illumina-1.8 or broad-1.0 [default: the
    /// format recorded in the read-group header, else illumina-1.8]
    #[arg(short, long)]
    pub qnformat: Option<ReadNameFormat>,
}

/// Execute tag subcommand
///
/// # Errors
///
/// Returns an error if both the read-group header and the input are stdin, a
/// file cannot be opened, the read-group header holds no `@RG` lines, or
/// reading or writing fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TagArgs, verbose: bool) -> anyhow::Result<()> {
    let input = args.input.as_deref();

    if is_stdio(Some(args.read_groups.as_path())) && is_stdio(input) {
        bail!("--rg and --input cannot both read from stdin; pass the SAM input with --input");
    }

    let header = open_input(Some(args.read_groups.as_path())).with_context(|| {
        format!(
            "Failed to open read-group header {}; it can be created with `rgsam collect`",
            args.read_groups.display()
        )
    })?;
    let reader = open_input(input)
        .with_context(|| format!("Failed to open input {}", display_path(input, "stdin")))?;
    let mut writer = open_output(args.output.as_deref()).with_context(|| {
        format!(
            "Failed to create output {}",
            display_path(args.output.as_deref(), "stdout")
        )
    })?;

    let tagger = Tagger::from_header(args.qnformat, header).with_context(|| {
        format!(
            "Failed to load read groups from {}",
            args.read_groups.display()
        )
    })?;

    if verbose {
        info!(
            read_groups = tagger.read_groups().len(),
            format = %tagger.read_name_format(),
            "Loaded read-group header"
        );
    }

    let summary = tagger.run(reader, &mut writer)?;

    if !summary.unknown_read_groups.is_empty() {
        warn!(
            "{} of {} records had one of {} read groups not found in {}",
            summary.unknown_records(),
            summary.records,
            summary.unknown_read_groups.len(),
            args.read_groups.display()
        );
    }

    Ok(())
}
