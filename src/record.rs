use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One archived version of a sequence record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: u32,
    pub metadata: Map<String, Value>,
    /// Normalized sequence: no header lines, no whitespace, uppercase
    pub sequence: String,
}

impl VersionRecord {
    pub fn new(version: u32, metadata: Map<String, Value>, fasta: &str) -> Self {
        Self {
            version,
            metadata,
            sequence: normalize_sequence(fasta),
        }
    }
}

/// Strip FASTA header lines and all whitespace, then uppercase
pub fn normalize_sequence(fasta: &str) -> String {
    fasta
        .lines()
        .filter(|line| !line.trim().starts_with('>'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_and_whitespace_are_dropped() {
        let fasta = ">PP_00003PJ.2 some description\nacgt nn\r\nTTGA\n  > indented header\n\tccc\n";
        assert_eq!(normalize_sequence(fasta), "ACGTNNTTGACCC");
    }

    #[test]
    fn empty_and_header_only() {
        assert_eq!(normalize_sequence(""), "");
        assert_eq!(normalize_sequence(">only a header\n"), "");
    }

    #[test]
    fn record_normalizes_its_sequence() {
        let record = VersionRecord::new(3, Map::new(), ">x\nac\ngt\n");
        assert_eq!(record.version, 3);
        assert_eq!(record.sequence, "ACGT");
    }
}
