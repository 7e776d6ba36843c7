use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::core::read_group::{ReadGroupMetadata, ReadGroupSet};
use crate::core::types::{InputFormat, ReadNameFormat};
use crate::parsing::fastq::FastqReader;
use crate::parsing::read_name::infer;
use crate::parsing::sam::{self, ParseError, HEADER_PREFIX};
use crate::utils::io::read_line;

/// Configuration for a collection run
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Grammar used to derive read groups from read names
    pub read_name_format: ReadNameFormat,
    /// Whether the input is SAM or FASTQ
    pub input_format: InputFormat,
    /// Sample, library and platform written to every `@RG` line
    pub metadata: ReadGroupMetadata,
}

/// Collects the distinct read groups of a SAM or FASTQ stream and renders them
/// as an `@RG` header block
pub struct Collector {
    config: CollectorConfig,
}

impl Collector {
    #[must_use]
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Collect read groups from `reader` and write the header block to `writer`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading or writing fails, or
    /// `ParseError::MalformedRecord` for a malformed FASTQ record.
    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<ReadGroupSet, ParseError> {
        let read_groups = match self.config.input_format {
            InputFormat::Sam => self.collect_sam(reader)?,
            InputFormat::Fastq => self.collect_fastq(reader)?,
        };

        info!(read_groups = read_groups.len(), "Collected read groups");

        sam::write_read_group_set(
            writer,
            &read_groups,
            &self.config.metadata,
            self.config.read_name_format,
        )?;
        writer.flush()?;

        Ok(read_groups)
    }

    /// Read groups of a stream of read identifiers
    pub fn collect_names<I, S>(&self, names: I) -> ReadGroupSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut read_groups = ReadGroupSet::new();
        for name in names {
            self.insert(&mut read_groups, name.as_ref());
        }
        read_groups
    }

    /// Read groups of the data lines of a SAM stream. Header lines are skipped;
    /// an empty line ends the stream.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading fails.
    pub fn collect_sam<R: BufRead>(&self, mut reader: R) -> Result<ReadGroupSet, ParseError> {
        let mut read_groups = ReadGroupSet::new();
        let mut records: u64 = 0;
        let mut line = Vec::with_capacity(1024);

        while read_line(&mut reader, &mut line)? > 0 {
            if line.first() == Some(&HEADER_PREFIX) {
                continue;
            }
            let Some(record) = sam::decode(&line) else {
                break;
            };
            self.insert(&mut read_groups, &record.read_name());
            records += 1;
        }

        debug!(records, "Read SAM records");
        Ok(read_groups)
    }

    /// Read groups of the records of a FASTQ stream
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading fails, or `ParseError::MalformedRecord`
    /// if a record's separator line is not `+`.
    pub fn collect_fastq<R: BufRead>(&self, reader: R) -> Result<ReadGroupSet, ParseError> {
        let mut read_groups = ReadGroupSet::new();
        let mut fastq = FastqReader::new(reader);

        for record in fastq.by_ref() {
            let record = record?;
            self.insert(&mut read_groups, &record.read_name());
        }

        debug!(records = fastq.records_read(), "Read FASTQ records");
        Ok(read_groups)
    }

    fn insert(&self, read_groups: &mut ReadGroupSet, name: &str) {
        let key = infer(self.config.read_name_format, name);
        if read_groups.insert(key) {
            debug!(read_name = %name, "New read group");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(input_format: InputFormat) -> Collector {
        Collector::new(CollectorConfig {
            read_name_format: ReadNameFormat::Illumina18,
            input_format,
            metadata: ReadGroupMetadata::new("NA12878", "lib1", "illumina"),
        })
    }

    fn sam_line(name: &str) -> String {
        format!("{name}\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\tIIII")
    }

    #[test]
    fn test_collect_names_deduplicates_and_sorts() {
        let names = [
            "I:1:FCB:2:1:1:1",
            "I:1:FCA:1:1:1:1",
            "I:1:FCB:2:1:1:2",
            "I:1:FCA:3:1:1:1",
        ];
        let read_groups = collector(InputFormat::Sam).collect_names(names);
        let keys: Vec<&str> = read_groups.iter().collect();
        assert_eq!(keys, vec!["FCA_1", "FCA_3", "FCB_2"]);
    }

    #[test]
    fn test_collect_is_order_independent() {
        let names = ["I:1:FCB:2:1:1:1", "I:1:FCA:1:1:1:1", "unparseable"];
        let forward = collector(InputFormat::Sam).collect_names(names);
        let reverse = collector(InputFormat::Sam).collect_names(names.iter().rev());
        assert_eq!(forward, reverse);
        // Degenerate keys are kept
        assert!(forward.contains(""));
    }

    #[test]
    fn test_collect_sam_skips_header_and_stops_at_blank_line() {
        let sam = format!(
            "@HD\tVN:1.6\n{}\n@CO\tmid-stream comment\n{}\n\n{}\n",
            sam_line("I:1:FC1:1:1:1:1"),
            sam_line("I:1:FC1:2:1:1:1"),
            sam_line("I:1:FC9:9:1:1:1"),
        );
        let read_groups = collector(InputFormat::Sam)
            .collect_sam(sam.as_bytes())
            .unwrap();
        let keys: Vec<&str> = read_groups.iter().collect();
        assert_eq!(keys, vec!["FC1_1", "FC1_2"]);
    }

    #[test]
    fn test_collect_fastq() {
        let fastq = "@I:1:FC1:1:1:1:1 1:N:0:ACGT\nAC\n+\nII\n@I:1:FC1:2:1:1:1\nAC\n+\nII\n";
        let read_groups = collector(InputFormat::Fastq)
            .collect_fastq(fastq.as_bytes())
            .unwrap();
        assert_eq!(read_groups.len(), 2);
        assert!(read_groups.contains("FC1_1"));
    }

    #[test]
    fn test_collect_fastq_malformed() {
        let fastq = "@I:1:FC1:1:1:1:1\nAC\nII\n";
        let err = collector(InputFormat::Fastq)
            .collect_fastq(fastq.as_bytes())
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedRecord { record: 1, .. }));
    }

    #[test]
    fn test_run_writes_header() {
        let sam = format!(
            "{}\n{}\n",
            sam_line("I:1:FC2:1:1:1:1"),
            sam_line("I:1:FC1:1:1:1:1")
        );
        let mut out = Vec::new();
        let read_groups = collector(InputFormat::Sam)
            .run(sam.as_bytes(), &mut out)
            .unwrap();

        assert_eq!(read_groups.len(), 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "@RG\tID:FC1_1\tPU:FC1_1\tSM:NA12878\tLB:lib1\tPL:illumina\n\
             @RG\tID:FC2_1\tPU:FC2_1\tSM:NA12878\tLB:lib1\tPL:illumina\n\
             @CO\tQF:illumina-1.8\n"
        );
    }

    #[test]
    fn test_run_on_empty_input_writes_only_comment() {
        let mut out = Vec::new();
        let read_groups = collector(InputFormat::Sam)
            .run("".as_bytes(), &mut out)
            .unwrap();
        assert!(read_groups.is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "@CO\tQF:illumina-1.8\n");
    }

    #[test]
    fn test_collect_sam_tolerates_non_utf8_lines() {
        let mut sam = b"@HD\tVN:1.6\n@CO\tcaf\xe9\n".to_vec();
        sam.extend_from_slice(sam_line("I:1:FC1:1:1:1:1").as_bytes());
        sam.extend_from_slice(b"\tCO:Z:\xff\n");

        let read_groups = collector(InputFormat::Sam)
            .collect_sam(sam.as_slice())
            .unwrap();
        let keys: Vec<&str> = read_groups.iter().collect();
        assert_eq!(keys, vec!["FC1_1"]);
    }
}
