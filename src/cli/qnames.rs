use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::types::ReadNameFormat;

/// A read name format as listed by `rgsam qnames`
#[derive(Debug, Serialize)]
pub struct FormatDescription {
    pub format: &'static str,
    pub example: &'static str,
}

/// Supported read name formats keyed by name
#[must_use]
pub fn describe_formats() -> BTreeMap<&'static str, FormatDescription> {
    ReadNameFormat::ALL
        .into_iter()
        .map(|format| {
            (
                format.name(),
                FormatDescription {
                    format: format.template(),
                    example: format.example(),
                },
            )
        })
        .collect()
}

/// Execute qnames subcommand
///
/// # Errors
///
/// Returns an error if the listing cannot be serialized.
pub fn run() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&describe_formats())?);
    Ok(())
}
