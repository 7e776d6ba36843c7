//! Core data types for read group inference and tagging.
//!
//! - [`ReadNameFormat`]: the closed set of read name grammars
//! - [`InputFormat`]: SAM or FASTQ input to the collector
//! - [`RawRecord`], [`OptionalFields`], [`OptionalField`]: a SAM record split into
//!   its verbatim core and its typed optional fields
//! - [`ReadGroupSet`], [`ReadGroupTable`]: read groups held during collection
//!   and tagging
//!
//! ## Read Groups
//!
//! A read group key is `<flowcell>_<lane>`, derived from the read name. When a
//! name does not carry all expected delimiters the key degrades to the flowcell
//! alone, or to the empty string. Degraded keys are still keys: they are
//! collected and tagged like any other.
//!
//! [`ReadNameFormat`]: types::ReadNameFormat
//! [`InputFormat`]: types::InputFormat
//! [`RawRecord`]: record::RawRecord
//! [`OptionalFields`]: record::OptionalFields
//! [`OptionalField`]: record::OptionalField
//! [`ReadGroupSet`]: read_group::ReadGroupSet
//! [`ReadGroupTable`]: read_group::ReadGroupTable

pub mod read_group;
pub mod record;
pub mod types;
