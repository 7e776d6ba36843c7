//! Streaming reader for four-line FASTQ records.
//!
//! Each record is an identifier line starting with `@`, a sequence line, a
//! `+` separator line and a quality line. Only the identifier is needed to
//! infer a read group, but the whole record is consumed so the stream stays
//! aligned. Records are read one at a time into reused buffers.

use std::borrow::Cow;
use std::io::BufRead;

use crate::parsing::sam::ParseError;
use crate::utils::io::read_line;

/// Literal separator line between sequence and quality
pub const SEPARATOR: &[u8] = b"+";

/// One FASTQ record, as raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// Identifier line without its leading `@`
    pub name: Vec<u8>,
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
}

impl FastqRecord {
    /// The identifier as text. Invalid UTF-8 is replaced with U+FFFD.
    #[must_use]
    pub fn read_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// Iterator over the records of a FASTQ stream.
///
/// The stream ends at EOF or at an empty identifier line. A separator line
/// other than `+`, including one missing because the stream ended mid-record,
/// is a [`ParseError::MalformedRecord`]; iteration stops after the first error.
pub struct FastqReader<R: BufRead> {
    reader: R,
    name: Vec<u8>,
    sequence: Vec<u8>,
    separator: Vec<u8>,
    quality: Vec<u8>,
    records: u64,
    finished: bool,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            name: Vec::with_capacity(256),
            sequence: Vec::with_capacity(256),
            separator: Vec::with_capacity(8),
            quality: Vec::with_capacity(256),
            records: 0,
            finished: false,
        }
    }

    /// Number of records read so far
    pub fn records_read(&self) -> u64 {
        self.records
    }

    fn read_record(&mut self) -> Result<Option<FastqRecord>, ParseError> {
        read_line(&mut self.reader, &mut self.name)?;
        if self.name.is_empty() {
            return Ok(None);
        }

        read_line(&mut self.reader, &mut self.sequence)?;
        read_line(&mut self.reader, &mut self.separator)?;
        if self.separator != SEPARATOR {
            return Err(ParseError::MalformedRecord {
                record: self.records + 1,
                found: String::from_utf8_lossy(&self.separator).into_owned(),
            });
        }
        read_line(&mut self.reader, &mut self.quality)?;

        self.records += 1;
        let name = self.name.strip_prefix(b"@").unwrap_or(self.name.as_slice());
        Ok(Some(FastqRecord {
            name: name.to_vec(),
            sequence: self.sequence.clone(),
            quality: self.quality.clone(),
        }))
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = Result<FastqRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.read_record().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(text: &str) -> Vec<Result<FastqRecord, ParseError>> {
        FastqReader::new(text.as_bytes()).collect()
    }

    #[test]
    fn test_reads_records() {
        let fastq = "@EAS139:136:FC706VJ:2:2104:15343:197393 1:Y:18:ATCACG\nACGT\n+\nIIII\n\
                     @EAS139:136:FC706VJ:3:2104:15343:197394\nTTGA\n+\nJJJJ\n";
        let records: Vec<FastqRecord> = read_all(fastq).into_iter().map(Result::unwrap).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].read_name(),
            "EAS139:136:FC706VJ:2:2104:15343:197393 1:Y:18:ATCACG"
        );
        assert_eq!(records[0].sequence, b"ACGT");
        assert_eq!(records[0].quality, b"IIII");
        assert_eq!(records[1].read_name(), "EAS139:136:FC706VJ:3:2104:15343:197394");
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = read_all("@r1\r\nAC\r\n+\r\nII\r\n");
        assert_eq!(records.len(), 1);
        let record = records.into_iter().next().unwrap().unwrap();
        assert_eq!(record.name, b"r1");
        assert_eq!(record.quality, b"II");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let records = read_all("@r1\nAC\n+\nII");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().quality, b"II");
    }

    #[test]
    fn test_empty_identifier_line_ends_stream() {
        let records = read_all("@r1\nAC\n+\nII\n\n@r2\nAC\n+\nII\n");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(read_all("").is_empty());
    }

    #[test]
    fn test_bad_separator_is_malformed() {
        let records = read_all("@r1\nAC\n+\nII\n@r2\nAC\n-\nII\n@r3\nAC\n+\nII\n");
        assert_eq!(records.len(), 2);
        assert!(records[0].is_ok());
        match &records[1] {
            Err(ParseError::MalformedRecord { record, found }) => {
                assert_eq!(*record, 2);
                assert_eq!(found, "-");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_record_is_malformed() {
        let records = read_all("@r1\nAC\n");
        assert_eq!(records.len(), 1);
        assert!(matches!(
            records[0],
            Err(ParseError::MalformedRecord { record: 1, .. })
        ));
    }

    #[test]
    fn test_records_read() {
        let mut reader = FastqReader::new("@r1\nA\n+\nI\n@r2\nA\n+\nI\n".as_bytes());
        for record in reader.by_ref() {
            record.unwrap();
        }
        assert_eq!(reader.records_read(), 2);
    }

    #[test]
    fn test_non_utf8_identifier() {
        let mut reader = FastqReader::new(&b"@r\xe91\nAC\n+\nII\n"[..]);
        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.name, b"r\xe91");
        assert_eq!(record.read_name(), "r\u{fffd}1");
        assert!(reader.next().is_none());
    }
}
