//! Read group collection and tagging pipelines.
//!
//! - [`Collector`]: reduce a SAM or FASTQ stream to its distinct read groups
//!   and write them as an `@RG` header block
//! - [`Tagger`]: load such a header block, then rewrite a SAM stream so every
//!   record carries its `RG` tag
//!
//! Both pipelines are single pass and hold only the distinct read groups in
//! memory, never the records themselves.
//!
//! ## Example
//!
//! ```rust
//! use rgsam::core::read_group::ReadGroupMetadata;
//! use rgsam::core::types::{InputFormat, ReadNameFormat};
//! use rgsam::pipeline::{Collector, CollectorConfig, Tagger};
//!
//! let sam = "EAS139:136:FC706VJ:2:2104:15343:197393\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\tIIII\n";
//!
//! let collector = Collector::new(CollectorConfig {
//!     read_name_format: ReadNameFormat::Illumina18,
//!     input_format: InputFormat::Sam,
//!     metadata: ReadGroupMetadata::new("sample", "library", "illumina"),
//! });
//! let mut header = Vec::new();
//! collector.run(sam.as_bytes(), &mut header).unwrap();
//!
//! // The header records the format it was collected with
//! let tagger = Tagger::from_header(None, header.as_slice()).unwrap();
//! assert_eq!(tagger.read_name_format(), ReadNameFormat::Illumina18);
//!
//! let mut tagged = Vec::new();
//! let summary = tagger.run(sam.as_bytes(), &mut tagged).unwrap();
//!
//! assert_eq!(summary.records, 1);
//! assert!(String::from_utf8(tagged).unwrap().contains("\tRG:Z:FC706VJ_2\n"));
//! ```

pub mod collector;
pub mod tagger;

pub use collector::{Collector, CollectorConfig};
pub use tagger::Tagger;
