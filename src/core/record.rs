use std::borrow::Cow;

/// Two-character optional field tag (e.g. `RG`, `NM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 2]);

impl Tag {
    /// The read group tag
    pub const READ_GROUP: Self = Self(*b"RG");

    /// Build a tag from two ASCII bytes; `None` if either byte is not ASCII
    #[must_use]
    pub fn new(bytes: [u8; 2]) -> Option<Self> {
        bytes.iter().all(u8::is_ascii).then_some(Self(bytes))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII, checked on construction
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `tag:type:value` annotation following the core fields of a SAM record.
///
/// The value is held as raw bytes. Malformed fields are kept partially
/// populated rather than rejected:
///
/// - `TT:X:value` sets tag, type and value
/// - `TT:rest` (no second colon at the expected position) sets only the tag;
///   `rest` is held as the value
/// - anything else sets neither tag nor type; the whole text is held as the value
///
/// Writing a field back out reproduces the bytes it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalField {
    pub tag: Option<Tag>,
    pub value_type: Option<char>,
    pub value: Vec<u8>,
}

impl OptionalField {
    #[must_use]
    pub fn new(tag: Tag, value_type: char, value: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: Some(tag),
            value_type: Some(value_type),
            value: value.into(),
        }
    }

    /// `RG:Z:<read_group>`
    #[must_use]
    pub fn read_group(read_group: impl Into<Vec<u8>>) -> Self {
        Self::new(Tag::READ_GROUP, 'Z', read_group)
    }

    /// Parse a single optional field. Never fails; see the type docs for how
    /// malformed text is held.
    #[must_use]
    pub fn parse(text: &[u8]) -> Self {
        let tag = match text {
            [a, b, b':', ..] => Tag::new([*a, *b]),
            _ => None,
        };

        let Some(tag) = tag else {
            return Self {
                tag: None,
                value_type: None,
                value: text.to_vec(),
            };
        };

        if let [_, _, _, value_type, b':', value @ ..] = text {
            if value_type.is_ascii() {
                return Self::new(tag, char::from(*value_type), value);
            }
        }

        Self {
            tag: Some(tag),
            value_type: None,
            value: text[3..].to_vec(),
        }
    }

    /// True when tag and type were both recovered
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.tag.is_some() && self.value_type.is_some()
    }

    /// Append the field's SAM text to `out`
    pub fn append_to(&self, out: &mut Vec<u8>) {
        if let Some(tag) = self.tag {
            out.extend_from_slice(tag.as_str().as_bytes());
            out.push(b':');
            if let Some(value_type) = self.value_type {
                let mut buf = [0; 4];
                out.extend_from_slice(value_type.encode_utf8(&mut buf).as_bytes());
                out.push(b':');
            }
        }
        out.extend_from_slice(&self.value);
    }
}

impl std::fmt::Display for OptionalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut text = Vec::new();
        self.append_to(&mut text);
        write!(f, "{}", String::from_utf8_lossy(&text))
    }
}

/// Ordered list of a record's optional fields.
///
/// Duplicate tags are preserved as read; only [`OptionalFields::replace_or_append`]
/// collapses them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalFields(Vec<OptionalField>);

impl OptionalFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: OptionalField) {
        self.0.push(field);
    }

    /// First field carrying `tag`
    #[must_use]
    pub fn get(&self, tag: Tag) -> Option<&OptionalField> {
        self.0.iter().find(|field| field.tag == Some(tag))
    }

    /// Remove every field sharing `field`'s tag, then append `field` at the end.
    ///
    /// Afterwards exactly one field carries the tag. Other fields keep their
    /// relative order.
    pub fn replace_or_append(&mut self, field: OptionalField) {
        if field.tag.is_some() {
            self.0.retain(|existing| existing.tag != field.tag);
        }
        self.0.push(field);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionalField> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<OptionalField> for OptionalFields {
    fn from_iter<I: IntoIterator<Item = OptionalField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OptionalFields {
    type Item = &'a OptionalField;
    type IntoIter = std::slice::Iter<'a, OptionalField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A SAM data record whose 11 core fields are kept verbatim and unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Core fields exactly as read, still tab-delimited
    pub core: Vec<u8>,
    pub fields: OptionalFields,
}

impl RawRecord {
    #[must_use]
    pub fn new(core: impl Into<Vec<u8>>, fields: OptionalFields) -> Self {
        Self {
            core: core.into(),
            fields,
        }
    }

    /// QNAME: the core up to the first tab. Invalid UTF-8 is replaced with U+FFFD.
    #[must_use]
    pub fn read_name(&self) -> Cow<'_, str> {
        let end = self
            .core
            .iter()
            .position(|&b| b == b'\t')
            .unwrap_or(self.core.len());
        String::from_utf8_lossy(&self.core[..end])
    }
}
