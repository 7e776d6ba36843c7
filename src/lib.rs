//! # rgsam
//!
//! A library for adding read-group information to SAM files.
//!
//! Sequencers encode the flowcell and lane that produced each read in the read
//! name. Downstream tools expect that provenance as SAM read groups: an `@RG`
//! header line per flowcell lane, and an `RG:Z:` tag on every record.
//!
//! `rgsam` works in two passes over the reads:
//!
//! 1. **Collect**: scan a SAM or FASTQ stream, infer a `<flowcell>_<lane>` read
//!    group from every read name, and write the distinct read groups as an
//!    `@RG` header block
//! 2. **Tag**: read that header block, then stream a SAM file through, replacing
//!    its `@RG` lines with the collected ones and tagging every record
//!
//! ## Features
//!
//! - **Three read name grammars**: illumina-1.0, illumina-1.8 and broad-1.0
//! - **Verbatim records**: core fields and untouched optional fields are
//!   written back byte for byte
//! - **Streaming**: only the distinct read groups are held in memory
//! - **Gzip input**: `.gz` and `.bgz` inputs are decompressed on the fly
//!
//! ## Example
//!
//! ```rust
//! use rgsam::{infer, ReadNameFormat};
//!
//! let read_group = infer(ReadNameFormat::Illumina18, "EAS139:136:FC706VJ:2:2104:15343:197393");
//! assert_eq!(read_group, "FC706VJ_2");
//!
//! let read_group = infer(ReadNameFormat::Broad10, "H0164ALXX140820:2:1101:10003:23460");
//! assert_eq!(read_group, "H0164_2");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Read name formats, SAM records and read-group collections
//! - [`parsing`]: Read name grammars and the SAM and FASTQ codecs
//! - [`pipeline`]: The collect and tag pipelines
//! - [`utils`]: Input/output plumbing and metadata validation
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::read_group::{ReadGroupMetadata, ReadGroupSet, ReadGroupTable};
pub use core::record::{OptionalField, OptionalFields, RawRecord, Tag};
pub use core::types::*;
pub use parsing::read_name::infer;
pub use parsing::sam::{ParseError, ReadGroupHeader};
pub use pipeline::tagger::TagSummary;
pub use pipeline::{Collector, CollectorConfig, Tagger};
