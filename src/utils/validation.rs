//! Centralized validation and helper functions.

use std::path::Path;

/// Extensions marking a gzip (or BGZF) compressed file
pub const GZIP_EXTENSIONS: [&str; 2] = ["gz", "bgz"];

/// Metadata validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} '{value}' contains a tab or line break")]
    InvalidCharacter { field: &'static str, value: String },
}

/// Check that a value can be embedded in a tab-delimited `@RG` header line.
///
/// # Examples
///
/// ```
/// use rgsam::utils::validation::validate_header_value;
///
/// assert!(validate_header_value("sample", "NA12878").is_ok());
/// assert!(validate_header_value("sample", "").is_err());
/// assert!(validate_header_value("library", "lib\t1").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::Empty` for an empty value, or
/// `ValidationError::InvalidCharacter` if it contains a tab, CR or LF.
pub fn validate_header_value(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.contains(['\t', '\n', '\r']) {
        return Err(ValidationError::InvalidCharacter {
            field,
            value: value.escape_default().to_string(),
        });
    }
    Ok(())
}

/// True if the path ends in a gzip extension
#[must_use]
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| GZIP_EXTENSIONS.contains(&ext.as_str()))
}

/// Path with a trailing gzip extension removed
fn without_gzip_extension(path: &Path) -> &Path {
    if is_gzipped(path) {
        path.file_stem().map_or(path, Path::new)
    } else {
        path
    }
}

/// Lowercase file extension, looking through a trailing `.gz`/`.bgz`
///
/// # Examples
///
/// ```
/// use rgsam::utils::validation::file_extension;
/// use std::path::Path;
///
/// assert_eq!(file_extension(Path::new("reads.FQ.gz")), Some("fq".to_string()));
/// assert_eq!(file_extension(Path::new("dir/aln.sam")), Some("sam".to_string()));
/// assert_eq!(file_extension(Path::new("aln")), None);
/// ```
#[must_use]
pub fn file_extension(path: &Path) -> Option<String> {
    without_gzip_extension(path)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
}

/// File name without directory or extension, looking through a trailing `.gz`/`.bgz`
///
/// # Examples
///
/// ```
/// use rgsam::utils::validation::file_stem;
/// use std::path::Path;
///
/// assert_eq!(file_stem(Path::new("/data/NA12878.sam")), Some("NA12878".to_string()));
/// assert_eq!(file_stem(Path::new("NA12878.fastq.gz")), Some("NA12878".to_string()));
/// ```
#[must_use]
pub fn file_stem(path: &Path) -> Option<String> {
    without_gzip_extension(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
