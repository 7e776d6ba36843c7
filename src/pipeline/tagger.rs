use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::core::read_group::ReadGroupTable;
use crate::core::record::{OptionalField, RawRecord};
use crate::core::types::ReadNameFormat;
use crate::parsing::read_name::infer;
use crate::parsing::sam::{self, ParseError, HEADER_PREFIX};
use crate::utils::io::read_line;

/// Counts from one tagging run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSummary {
    /// Header lines copied from the input
    pub header_lines: u64,
    /// `@RG` lines dropped from the input header
    pub dropped_read_groups: u64,
    /// Data records tagged and written
    pub records: u64,
    /// Read groups absent from the loaded header, with the number of records
    /// tagged with each
    pub unknown_read_groups: BTreeMap<String, u64>,
}

impl TagSummary {
    /// Records tagged with a read group absent from the loaded header
    #[must_use]
    pub fn unknown_records(&self) -> u64 {
        self.unknown_read_groups.values().sum()
    }
}

/// Rewrites a SAM stream so that every record carries the `RG` tag derived
/// from its read name, and the header carries a known set of `@RG` lines.
///
/// Tagging runs in two phases. The `@RG` lines are loaded once from a header
/// written by the collector ([`Tagger::from_header`]). The SAM stream is then
/// transformed one line at a time ([`Tagger::run`]): existing `@RG` lines are
/// dropped, other header lines are copied byte for byte, the loaded `@RG`
/// lines are written, and each data record is tagged. A record whose read
/// group is not among the loaded ones is logged as a warning and still tagged.
pub struct Tagger {
    read_name_format: ReadNameFormat,
    read_groups: ReadGroupTable,
}

impl Tagger {
    #[must_use]
    pub fn new(read_name_format: ReadNameFormat, read_groups: ReadGroupTable) -> Self {
        Self {
            read_name_format,
            read_groups,
        }
    }

    /// Load the `@RG` lines from a read-group header.
    ///
    /// Read names are parsed with `requested` when given, otherwise with the
    /// format the header records in its `@CO\tQF:` line, otherwise with the
    /// default format. A requested format that differs from the recorded one
    /// is used, with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading fails, or `ParseError::MissingReadGroups`
    /// if the header holds no `@RG` lines.
    pub fn from_header<R: BufRead>(
        requested: Option<ReadNameFormat>,
        header: R,
    ) -> Result<Self, ParseError> {
        let header = sam::read_read_groups(header)?;

        let read_name_format = match (requested, header.read_name_format) {
            (Some(requested), Some(recorded)) if requested != recorded => {
                warn!(
                    "Read name format `{requested}` differs from `{recorded}` recorded in the read-group header"
                );
                requested
            }
            (Some(requested), _) => requested,
            (None, Some(recorded)) => {
                debug!(format = %recorded, "Using read name format recorded in read-group header");
                recorded
            }
            (None, None) => {
                let format = ReadNameFormat::default();
                warn!("Read name format is neither specified nor recorded in the read-group header; assuming `{format}`");
                format
            }
        };

        Ok(Self::new(read_name_format, header.read_groups))
    }

    #[must_use]
    pub fn read_name_format(&self) -> ReadNameFormat {
        self.read_name_format
    }

    #[must_use]
    pub fn read_groups(&self) -> &ReadGroupTable {
        &self.read_groups
    }

    /// Tag every record of `reader` and write the result to `writer`.
    ///
    /// Lines are handled as raw bytes, so header lines and record fields that
    /// are not UTF-8 pass through unchanged. An empty line ends the stream.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading or writing fails.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        writer: &mut W,
    ) -> Result<TagSummary, ParseError> {
        let mut summary = TagSummary::default();
        let mut line = Vec::with_capacity(1024);
        let mut has_record = false;

        while read_line(&mut reader, &mut line)? > 0 {
            if line.first() != Some(&HEADER_PREFIX) {
                has_record = true;
                break;
            }
            if sam::is_read_group_line(&line) {
                summary.dropped_read_groups += 1;
            } else {
                writer.write_all(&line)?;
                writer.write_all(b"\n")?;
                summary.header_lines += 1;
            }
        }

        if summary.dropped_read_groups > 0 {
            debug!(
                dropped = summary.dropped_read_groups,
                "Replaced existing @RG header lines"
            );
        }
        sam::write_read_group_table(writer, &self.read_groups, self.read_name_format)?;

        while has_record {
            let Some(mut record) = sam::decode(&line) else {
                break;
            };
            self.tag_record(&mut record, &mut summary);
            sam::write_record(writer, &record)?;
            has_record = read_line(&mut reader, &mut line)? > 0;
        }

        writer.flush()?;

        info!(records = summary.records, "Tagged records");
        Ok(summary)
    }

    /// Set the record's `RG` tag to the read group inferred from its name
    fn tag_record(&self, record: &mut RawRecord, summary: &mut TagSummary) {
        let read_group = infer(self.read_name_format, &record.read_name());

        if !self.read_groups.contains(&read_group) {
            warn!(
                read_group = %read_group,
                read_name = %record.read_name(),
                "Read group not found in read-group header"
            );
            *summary
                .unknown_read_groups
                .entry(read_group.clone())
                .or_insert(0) += 1;
        }

        record
            .fields
            .replace_or_append(OptionalField::read_group(read_group));
        summary.records += 1;
    }
}
