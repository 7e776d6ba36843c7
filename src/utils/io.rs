//! Opening input and output streams.
//!
//! An absent path or `-` selects stdin/stdout. Inputs ending in `.gz` or
//! `.bgz` are decompressed on the fly; outputs are always written uncompressed.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::info;

use crate::utils::validation::is_gzipped;

/// Path that selects stdin or stdout
pub const STDIO_PATH: &str = "-";

/// True if `path` is absent or `-`
#[must_use]
pub fn is_stdio(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p == Path::new(STDIO_PATH))
}

/// The path for messages, or `stdio` (e.g. "stdin") when it selects stdin/stdout
#[must_use]
pub fn display_path(path: Option<&Path>, stdio: &str) -> String {
    match path {
        Some(path) if !is_stdio(Some(path)) => path.display().to_string(),
        _ => stdio.to_string(),
    }
}

/// Read one line into `buf` as raw bytes, without its `\n` or `\r\n` terminator.
///
/// Returns the number of bytes consumed, which is 0 only at EOF. The bytes
/// need not be UTF-8.
///
/// # Errors
///
/// Returns any error raised by the reader.
pub fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    buf.clear();
    let consumed = reader.read_until(b'\n', buf)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(consumed)
}

/// Open a buffered reader over a file, or stdin
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_input(path: Option<&Path>) -> std::io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            let file = File::open(path)?;
            if is_gzipped(path) {
                Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
            } else {
                Ok(Box::new(BufReader::new(file)))
            }
        }
        _ => {
            info!("Reading from stdin");
            Ok(Box::new(std::io::stdin().lock()))
        }
    }
}

/// Create a buffered writer over a file, or stdout
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(path: Option<&Path>) -> std::io::Result<Box<dyn Write>> {
    match path {
        Some(path) if !is_stdio(Some(path)) => {
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        _ => {
            info!("Writing to stdout");
            Ok(Box::new(BufWriter::new(std::io::stdout().lock())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Read;

    #[test]
    fn test_is_stdio() {
        assert!(is_stdio(None));
        assert!(is_stdio(Some(Path::new("-"))));
        assert!(!is_stdio(Some(Path::new("in.sam"))));
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(None, "stdin"), "stdin");
        assert_eq!(display_path(Some(Path::new("-")), "stdout"), "stdout");
        assert_eq!(display_path(Some(Path::new("a.sam")), "stdin"), "a.sam");
    }

    #[test]
    fn test_read_line_keeps_raw_bytes() {
        let mut reader: &[u8] = b"caf\xe9\r\nplain\n\nlast";
        let mut buf = Vec::new();

        assert_eq!(read_line(&mut reader, &mut buf).unwrap(), 6);
        assert_eq!(buf, b"caf\xe9");
        assert_eq!(read_line(&mut reader, &mut buf).unwrap(), 6);
        assert_eq!(buf, b"plain");
        assert_eq!(read_line(&mut reader, &mut buf).unwrap(), 1);
        assert!(buf.is_empty());
        assert_eq!(read_line(&mut reader, &mut buf).unwrap(), 4);
        assert_eq!(buf, b"last");
        assert_eq!(read_line(&mut reader, &mut buf).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_open_plain_and_gzipped_input() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("reads.sam");
        std::fs::write(&plain, "line1\nline2\n").unwrap();

        let gzipped = dir.path().join("reads.sam.gz");
        let mut encoder = GzEncoder::new(File::create(&gzipped).unwrap(), Compression::default());
        encoder.write_all(b"line1\nline2\n").unwrap();
        encoder.finish().unwrap();

        for path in [plain, gzipped] {
            let mut text = String::new();
            open_input(Some(path.as_path()))
                .unwrap()
                .read_to_string(&mut text)
                .unwrap();
            assert_eq!(text, "line1\nline2\n");
        }
    }

    #[test]
    fn test_open_missing_input() {
        assert!(open_input(Some(Path::new("/definitely/not/here.sam"))).is_err());
    }

    #[test]
    fn test_open_output_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sam");
        {
            let mut out = open_output(Some(path.as_path())).unwrap();
            out.write_all(b"@HD\tVN:1.6\n").unwrap();
            out.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "@HD\tVN:1.6\n");
    }
}
