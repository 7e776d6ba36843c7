//! Parsers for read names, SAM records and FASTQ records.
//!
//! This module provides:
//!
//! - **Read names**: infer a `<flowcell>_<lane>` read group from a read identifier
//! - **SAM records**: split a data line into its verbatim core and optional
//!   fields, and write it back byte for byte; read and write `@RG` header blocks
//! - **FASTQ records**: stream four-line records
//!
//! ## Example
//!
//! ```rust
//! use rgsam::core::record::OptionalField;
//! use rgsam::core::types::ReadNameFormat;
//! use rgsam::parsing::{read_name, sam};
//!
//! let line = "EAS139:136:FC706VJ:2:2104:15343:197393\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\tIIII\tRG:Z:old";
//! let mut record = sam::decode(line.as_bytes()).unwrap();
//!
//! let read_group = read_name::infer(ReadNameFormat::Illumina18, &record.read_name());
//! assert_eq!(read_group, "FC706VJ_2");
//!
//! record.fields.replace_or_append(OptionalField::read_group(read_group));
//! assert!(sam::encode(&record).ends_with(b"\tIIII\tRG:Z:FC706VJ_2"));
//! ```
//!
//! ## Read Name Formats
//!
//! | Format | Layout | Read group |
//! |--------|--------|------------|
//! | illumina-1.0 | `{flowcell}-{instrument}:{run}:{lane}:...` | `HWUSI_73` |
//! | illumina-1.8 | `{instrument}:{run}:{flowcell}:{lane}:...` | `FC706VJ_2` |
//! | broad-1.0 | `{flowcell,5}...:{barcode}:{lane}:...` | `H0164_2` |

pub mod fastq;
pub mod read_name;
pub mod sam;
