use std::collections::{BTreeMap, BTreeSet};

/// Sample, library and platform stamped onto every collected read group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGroupMetadata {
    pub sample: String,
    pub library: String,
    pub platform: String,
}

impl ReadGroupMetadata {
    #[must_use]
    pub fn new(
        sample: impl Into<String>,
        library: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            sample: sample.into(),
            library: library.into(),
            platform: platform.into(),
        }
    }
}

/// One `@RG` header line minted during collection. `ID` and `PU` are both the
/// read group key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGroupEntry<'a> {
    pub id: &'a str,
    pub metadata: &'a ReadGroupMetadata,
}

impl std::fmt::Display for ReadGroupEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "@RG\tID:{id}\tPU:{id}\tSM:{}\tLB:{}\tPL:{}",
            self.metadata.sample,
            self.metadata.library,
            self.metadata.platform,
            id = self.id,
        )
    }
}

/// Distinct read group keys seen during a collection pass, iterated in
/// ascending lexical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadGroupSet(BTreeSet<String>);

impl ReadGroupSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not already present
    pub fn insert(&mut self, key: String) -> bool {
        self.0.insert(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Header entries for every key, all sharing `metadata`
    pub fn entries<'a>(
        &'a self,
        metadata: &'a ReadGroupMetadata,
    ) -> impl Iterator<Item = ReadGroupEntry<'a>> {
        self.iter().map(move |id| ReadGroupEntry { id, metadata })
    }
}

/// `@RG` header lines loaded from a previous collection, keyed by `ID` and
/// kept as the exact bytes read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadGroupTable(BTreeMap<String, Vec<u8>>);

impl ReadGroupTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header line under `id`. A later line with the same ID wins.
    pub fn insert(&mut self, id: impl Into<String>, line: impl Into<Vec<u8>>) {
        self.0.insert(id.into(), line.into());
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Header lines in ascending ID order
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.0.values().map(Vec::as_slice)
    }
}
