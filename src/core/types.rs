use crate::parsing::sam::ParseError;

/// Read name grammar used to derive a read group from a read identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadNameFormat {
    /// Illumina v1.0: `@{flowcell}-{instrument}:{run}:{lane}:{x}:{y}#{sample}/{pair}`
    Illumina10,
    /// Illumina v1.8: `@{instrument}:{run}:{flowcell}:{lane}:{tile}:{x}:{y}`
    #[default]
    Illumina18,
    /// Broad v1.0: `@{flowcell,5}:{barcode}:{lane}:{tile}:{x}:{y}`
    Broad10,
}

impl ReadNameFormat {
    /// Every supported format, in the order they are listed to users
    pub const ALL: [Self; 3] = [Self::Illumina10, Self::Illumina18, Self::Broad10];

    /// The name used on the command line and in `@CO QF:` header comments
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Illumina10 => "illumina-1.0",
            Self::Illumina18 => "illumina-1.8",
            Self::Broad10 => "broad-1.0",
        }
    }

    /// Template describing the layout of a read name
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            Self::Illumina10 => "@{flowcell}-{instrument}:{run}:{lane}:{x}:{y}#{sample}/{pair}",
            Self::Illumina18 => "@{instrument}:{run}:{flowcell}:{lane}:{tile}:{x}:{y}",
            Self::Broad10 => "@{flowcell,5}:{barcode}:{lane}:{tile}:{x}:{y}",
        }
    }

    /// A representative read name in this format
    #[must_use]
    pub fn example(self) -> &'static str {
        match self {
            Self::Illumina10 => "@HWUSI-EAS100R:6:73:941:1973#0/1",
            Self::Illumina18 => "@EAS139:136:FC706VJ:2:2104:15343:197393",
            Self::Broad10 => "@H0164ALXX140820:2:1101:10003:23460",
        }
    }
}

impl std::fmt::Display for ReadNameFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ReadNameFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| ParseError::UnsupportedFormat(s.to_string()))
    }
}

/// File format of the reads fed to the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Sam,
    #[value(alias = "fq")]
    Fastq,
}

impl InputFormat {
    /// Map a (lowercase) file extension onto an input format
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "sam" => Some(Self::Sam),
            "fastq" | "fq" => Some(Self::Fastq),
            _ => None,
        }
    }
}
