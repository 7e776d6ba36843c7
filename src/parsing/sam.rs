use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::read_group::{ReadGroupMetadata, ReadGroupSet, ReadGroupTable};
use crate::core::record::{OptionalField, OptionalFields, RawRecord};
use crate::core::types::ReadNameFormat;
use crate::utils::io::read_line;

/// Number of mandatory, positional fields in a SAM data line
pub const CORE_FIELD_COUNT: usize = 11;

/// First byte of every SAM header line
pub const HEADER_PREFIX: u8 = b'@';

/// Record type of read group header lines
pub const READ_GROUP_RECORD: &[u8] = b"@RG";

/// Start of the comment line naming the read name format of a read-group header
pub const FORMAT_COMMENT_PREFIX: &[u8] = b"@CO\tQF:";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported read name format: {0} (expected one of illumina-1.0, illumina-1.8, broad-1.0)")]
    UnsupportedFormat(String),

    #[error("No @RG lines found in read-group header")]
    MissingReadGroups,

    #[error("Malformed FASTQ record {record}: expected '+' separator line, found '{found}'")]
    MalformedRecord { record: u64, found: String },
}

/// Split a SAM data line into its verbatim core and its optional fields.
///
/// Returns `None` for an empty line, which marks the end of the record stream.
/// A line with no optional fields keeps the whole line as its core. The line
/// need not be UTF-8.
#[must_use]
pub fn decode(line: &[u8]) -> Option<RawRecord> {
    if line.is_empty() {
        return None;
    }

    let boundary = line
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'\t')
        .map(|(i, _)| i)
        .nth(CORE_FIELD_COUNT - 1);

    let record = match boundary {
        Some(boundary) => RawRecord::new(
            &line[..boundary],
            line[boundary + 1..]
                .split(|&b| b == b'\t')
                .map(OptionalField::parse)
                .collect(),
        ),
        None => RawRecord::new(line, OptionalFields::new()),
    };

    Some(record)
}

/// Render a record back to a SAM data line (without line terminator)
#[must_use]
pub fn encode(record: &RawRecord) -> Vec<u8> {
    let mut line = record.core.clone();
    for field in &record.fields {
        line.push(b'\t');
        field.append_to(&mut line);
    }
    line
}

/// Write a record as one SAM data line
///
/// # Errors
///
/// Returns any error raised by the writer.
pub fn write_record<W: Write>(writer: &mut W, record: &RawRecord) -> std::io::Result<()> {
    let mut line = encode(record);
    line.push(b'\n');
    writer.write_all(&line)
}

/// True if the line's record type is exactly `@RG`
#[must_use]
pub fn is_read_group_line(line: &[u8]) -> bool {
    line.split(|&b| b == b'\t').next() == Some(READ_GROUP_RECORD)
}

/// Value of the `ID` field of an `@RG` line
#[must_use]
pub fn read_group_id(line: &[u8]) -> Option<&[u8]> {
    line.split(|&b| b == b'\t')
        .skip(1)
        .find_map(|field| field.strip_prefix(b"ID:"))
}

/// The read name format named by an `@CO\tQF:<format>` line.
///
/// `None` for any other line, or (with a warning) an unrecognized format name.
#[must_use]
pub fn recorded_format(line: &[u8]) -> Option<ReadNameFormat> {
    let name = String::from_utf8_lossy(line.strip_prefix(FORMAT_COMMENT_PREFIX)?);
    match name.parse() {
        Ok(format) => Some(format),
        Err(_) => {
            warn!(format = %name, "Unrecognized read name format in read-group header, ignoring");
            None
        }
    }
}

/// `@RG` lines loaded from a read-group header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGroupHeader {
    pub read_groups: ReadGroupTable,
    /// Format named by the `@CO\tQF:` line that follows the `@RG` lines, if any
    pub read_name_format: Option<ReadNameFormat>,
}

/// Load the leading run of `@RG` lines from a read-group header.
///
/// Reading stops at the first blank line or the first line that is not an
/// `@RG` line; when that line is `@CO\tQF:<format>` the format is recorded.
/// `@RG` lines are stored verbatim, keyed by their `ID`. One without an `ID`
/// is skipped with a warning and loading continues.
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails, or `ParseError::MissingReadGroups`
/// if no `@RG` lines were found.
pub fn read_read_groups<R: BufRead>(mut reader: R) -> Result<ReadGroupHeader, ParseError> {
    let mut read_groups = ReadGroupTable::new();
    let mut read_name_format = None;
    let mut line = Vec::new();

    while read_line(&mut reader, &mut line)? > 0 {
        if !is_read_group_line(&line) {
            read_name_format = recorded_format(&line);
            break;
        }

        match read_group_id(&line) {
            Some(id) => {
                let id = String::from_utf8_lossy(id).into_owned();
                read_groups.insert(id, line.as_slice());
            }
            None => warn!(
                line = %String::from_utf8_lossy(&line),
                "@RG line has no ID field, ignoring"
            ),
        }
    }

    if read_groups.is_empty() {
        return Err(ParseError::MissingReadGroups);
    }

    debug!(
        read_groups = read_groups.len(),
        format = ?read_name_format,
        "Loaded read groups"
    );
    Ok(ReadGroupHeader {
        read_groups,
        read_name_format,
    })
}

/// Write the `@CO` line recording which read name format produced the read groups
///
/// # Errors
///
/// Returns any error raised by the writer.
pub fn write_format_comment<W: Write>(
    writer: &mut W,
    format: ReadNameFormat,
) -> std::io::Result<()> {
    writer.write_all(FORMAT_COMMENT_PREFIX)?;
    writeln!(writer, "{format}")
}

/// Write one freshly minted `@RG` line per collected read group, followed by
/// the format comment
///
/// # Errors
///
/// Returns any error raised by the writer.
pub fn write_read_group_set<W: Write>(
    writer: &mut W,
    read_groups: &ReadGroupSet,
    metadata: &ReadGroupMetadata,
    format: ReadNameFormat,
) -> std::io::Result<()> {
    for entry in read_groups.entries(metadata) {
        writeln!(writer, "{entry}")?;
    }
    write_format_comment(writer, format)
}

/// Write previously loaded `@RG` lines verbatim, followed by the format comment
///
/// # Errors
///
/// Returns any error raised by the writer.
pub fn write_read_group_table<W: Write>(
    writer: &mut W,
    table: &ReadGroupTable,
    format: ReadNameFormat,
) -> std::io::Result<()> {
    for line in table.lines() {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    write_format_comment(writer, format)
}
