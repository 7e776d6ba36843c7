//! Read group inference from read names.
//!
//! Each grammar locates a flowcell and a lane within the read identifier and
//! joins them as `<flowcell>_<lane>`. Parsing is best effort: when the lane
//! cannot be located the key is the flowcell alone, and when the flowcell
//! cannot be located the key is empty. No input is rejected.

use crate::core::types::ReadNameFormat;

/// Infer the read group key of `identifier` (a read name without its leading `@`)
#[must_use]
pub fn infer(format: ReadNameFormat, identifier: &str) -> String {
    let (flowcell, lane) = match format {
        ReadNameFormat::Illumina10 => illumina10(identifier),
        ReadNameFormat::Illumina18 => illumina18(identifier),
        ReadNameFormat::Broad10 => broad10(identifier),
    };

    match (flowcell, lane) {
        (Some(flowcell), Some(lane)) => format!("{flowcell}_{lane}"),
        (Some(flowcell), None) => flowcell.to_string(),
        (None, _) => String::new(),
    }
}

/// The field after the `n`-th colon, ending at the next colon or end of input
fn colon_field(s: &str, n: usize) -> Option<&str> {
    s.split(':').nth(n)
}

/// `{flowcell}-{instrument}:{run}:{lane}:...`: flowcell precedes the first `-`;
/// lane is the field after the second colon that follows it.
fn illumina10(name: &str) -> (Option<&str>, Option<&str>) {
    match name.split_once('-') {
        Some((flowcell, rest)) => (Some(flowcell), colon_field(rest, 2)),
        None => (None, None),
    }
}

/// `{instrument}:{run}:{flowcell}:{lane}:...`
fn illumina18(name: &str) -> (Option<&str>, Option<&str>) {
    match colon_field(name, 2) {
        Some(flowcell) => (Some(flowcell), colon_field(name, 3)),
        None => (None, None),
    }
}

/// Flowcell is the first five characters, whatever they are; lane is the field
/// after the first colon at or beyond them.
fn broad10(name: &str) -> (Option<&str>, Option<&str>) {
    const FLOWCELL_LEN: usize = 5;

    let split = name
        .char_indices()
        .nth(FLOWCELL_LEN)
        .map_or(name.len(), |(i, _)| i);
    let (flowcell, rest) = name.split_at(split);

    let lane = rest
        .split_once(':')
        .and_then(|(_, after)| colon_field(after, 0));

    (Some(flowcell), lane)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illumina18() {
        assert_eq!(
            infer(
                ReadNameFormat::Illumina18,
                "EAS139:136:FC706VJ:2:2104:15343:197393"
            ),
            "FC706VJ_2"
        );
    }

    #[test]
    fn test_illumina18_with_fastq_comment() {
        assert_eq!(
            infer(
                ReadNameFormat::Illumina18,
                "EAS139:136:FC706VJ:2:2104:15343:197393 1:Y:18:ATCACG"
            ),
            "FC706VJ_2"
        );
    }

    #[test]
    fn test_illumina18_degrades() {
        assert_eq!(infer(ReadNameFormat::Illumina18, "EAS139:136:FC706VJ"), "FC706VJ");
        assert_eq!(infer(ReadNameFormat::Illumina18, "EAS139:136:FC706VJ:7"), "FC706VJ_7");
        assert_eq!(infer(ReadNameFormat::Illumina18, "EAS139:136"), "");
        assert_eq!(infer(ReadNameFormat::Illumina18, "read1"), "");
        assert_eq!(infer(ReadNameFormat::Illumina18, ""), "");
    }

    #[test]
    fn test_illumina10() {
        assert_eq!(
            infer(ReadNameFormat::Illumina10, "HWUSI-EAS100R:6:73:941:1973#0/1"),
            "HWUSI_73"
        );
    }

    #[test]
    fn test_illumina10_degrades() {
        assert_eq!(infer(ReadNameFormat::Illumina10, "HWUSI-EAS100R:6"), "HWUSI");
        assert_eq!(infer(ReadNameFormat::Illumina10, "HWUSI-EAS100R"), "HWUSI");
        assert_eq!(infer(ReadNameFormat::Illumina10, "HWUSI:EAS100R:6:73"), "");
    }

    #[test]
    fn test_broad10() {
        assert_eq!(
            infer(ReadNameFormat::Broad10, "H0164ALXX140820:2:1101:10003:23460"),
            "H0164_2"
        );
    }

    #[test]
    fn test_broad10_flowcell_is_verbatim_prefix() {
        // Colons inside the first five characters belong to the flowcell
        assert_eq!(infer(ReadNameFormat::Broad10, "1:2:3:4:5"), "1:2:3_4");
        assert_eq!(infer(ReadNameFormat::Broad10, "12345:8:9"), "12345_8");
    }

    #[test]
    fn test_broad10_degrades() {
        assert_eq!(infer(ReadNameFormat::Broad10, "H0164ALXX140820"), "H0164");
        assert_eq!(infer(ReadNameFormat::Broad10, "H01"), "H01");
        assert_eq!(infer(ReadNameFormat::Broad10, ""), "");
    }

    #[test]
    fn test_broad10_multibyte_prefix() {
        assert_eq!(infer(ReadNameFormat::Broad10, "ééééé:x:3"), "ééééé_x");
    }
}
