use super::types::{DiffSegment, SegmentKind, Side};
use similar::{Algorithm, ChangeTag, TextDiffConfig};

/// Atomic unit the diff compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Char,
    Word,
    Line,
}

/// Compute a minimal edit script between `old` and `new`.
///
/// Missing input is diffed as the empty string. Consecutive units with the same
/// tag are merged, so every segment holds the original substring verbatim.
pub fn diff<'a, 'b>(
    old: impl Into<Option<&'a str>>,
    new: impl Into<Option<&'b str>>,
    granularity: Granularity,
) -> Vec<DiffSegment> {
    let old = old.into().unwrap_or_default();
    let new = new.into().unwrap_or_default();

    let mut config = TextDiffConfig::default();
    config.algorithm(Algorithm::Myers);
    let text_diff = match granularity {
        Granularity::Char => config.diff_chars(old, new),
        Granularity::Word => config.diff_words(old, new),
        Granularity::Line => config.diff_lines(old, new),
    };

    let mut segments: Vec<DiffSegment> = Vec::new();
    for change in text_diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Equal,
            ChangeTag::Insert => SegmentKind::Added,
            ChangeTag::Delete => SegmentKind::Removed,
        };
        let value = change.value();
        if value.is_empty() {
            continue;
        }

        match segments.last_mut() {
            Some(last) if last.kind == kind => last.value.push_str(value),
            _ => segments.push(DiffSegment::new(value, kind)),
        }
    }

    segments
}

/// Rebuild the text of one side from an edit script
pub fn side_text(segments: &[DiffSegment], side: Side) -> String {
    segments
        .iter()
        .filter(|s| s.visible_on(side))
        .map(|s| s.value.as_str())
        .collect()
}

pub fn old_text(segments: &[DiffSegment]) -> String {
    side_text(segments, Side::Old)
}

pub fn new_text(segments: &[DiffSegment]) -> String {
    side_text(segments, Side::New)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: &[(&str, &str)] = &[
        ("", ""),
        ("", "ACGT"),
        ("ACGT", ""),
        ("ACGT", "ACGT"),
        ("ACGTACGT", "ACTTACGA"),
        ("NNNNACGT", "ACGTNNNN"),
        ("the quick brown fox", "the slow brown dog"),
        ("a\nb\nc\n", "a\nx\nc\nd"),
        ("我爱你", "我不爱你"),
    ];

    #[test]
    fn round_trip_all_granularities() {
        for granularity in [Granularity::Char, Granularity::Word, Granularity::Line] {
            for (old, new) in PAIRS {
                let segments = diff(*old, *new, granularity);
                assert_eq!(old_text(&segments), *old, "{granularity:?} {old:?} -> {new:?}");
                assert_eq!(new_text(&segments), *new, "{granularity:?} {old:?} -> {new:?}");
            }
        }
    }

    #[test]
    fn missing_input_is_empty_text() {
        let segments = diff(None::<&str>, Some("ACGT"), Granularity::Char);
        assert_eq!(segments, vec![DiffSegment::new("ACGT", SegmentKind::Added)]);

        assert!(diff(None::<&str>, None::<&str>, Granularity::Line).is_empty());
    }

    #[test]
    fn adjacent_units_are_merged() {
        let segments = diff("AAAA", "AAGGGAA", Granularity::Char);
        assert_eq!(
            segments,
            vec![
                DiffSegment::new("AA", SegmentKind::Equal),
                DiffSegment::new("GGG", SegmentKind::Added),
                DiffSegment::new("AA", SegmentKind::Equal),
            ]
        );
    }

    #[test]
    fn substitution_puts_removal_first() {
        let segments = diff("AACAA", "AATAA", Granularity::Char);
        assert_eq!(
            segments,
            vec![
                DiffSegment::new("AA", SegmentKind::Equal),
                DiffSegment::new("C", SegmentKind::Removed),
                DiffSegment::new("T", SegmentKind::Added),
                DiffSegment::new("AA", SegmentKind::Equal),
            ]
        );
    }

    #[test]
    fn word_segments_keep_whitespace() {
        let segments = diff("hello cat", "hello dog", Granularity::Word);
        assert_eq!(segments[0], DiffSegment::new("hello ", SegmentKind::Equal));
        assert!(
            segments
                .iter()
                .any(|s| s.kind == SegmentKind::Removed && s.value == "cat")
        );
        assert!(
            segments
                .iter()
                .any(|s| s.kind == SegmentKind::Added && s.value == "dog")
        );
    }

    #[test]
    fn line_segments_keep_newlines() {
        let segments = diff("a\nb\n", "a\nc\n", Granularity::Line);
        assert_eq!(
            segments,
            vec![
                DiffSegment::new("a\n", SegmentKind::Equal),
                DiffSegment::new("b\n", SegmentKind::Removed),
                DiffSegment::new("c\n", SegmentKind::Added),
            ]
        );
    }

    #[test]
    fn identical_input_is_one_equal_segment() {
        let segments = diff("ACGT", "ACGT", Granularity::Char);
        assert_eq!(segments, vec![DiffSegment::new("ACGT", SegmentKind::Equal)]);
    }

    #[test]
    fn deterministic() {
        for (old, new) in PAIRS {
            assert_eq!(
                diff(*old, *new, Granularity::Char),
                diff(*old, *new, Granularity::Char)
            );
        }
    }
}
