use super::engine::{Granularity, diff};
use super::stats::{DiffStats, segment_stats};
use super::types::{DiffSegment, PositionedSpan, SegmentKind, Side};

/// Render the text visible on one side, tagging each run with its position range.
///
/// Positions are 1-based, inclusive and count characters of that side only, so text
/// that exists only in the other version never advances the counter.
pub fn render_side(segments: &[DiffSegment], side: Side) -> Vec<PositionedSpan> {
    let mut pos = 0usize;
    let mut spans = Vec::new();

    for segment in segments {
        if !segment.visible_on(side) || segment.value.is_empty() {
            continue;
        }
        let start = pos + 1;
        pos += segment.value.chars().count();
        spans.push(PositionedSpan {
            text: segment.value.clone(),
            kind: segment.kind,
            start,
            end: pos,
        });
    }

    spans
}

/// Outcome of comparing two sequence versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceComparison {
    Identical {
        sequence: String,
    },
    Differs {
        old: Vec<PositionedSpan>,
        new: Vec<PositionedSpan>,
        stats: DiffStats,
    },
}

impl SequenceComparison {
    pub fn compare(sequence1: Option<&str>, sequence2: Option<&str>) -> Self {
        let sequence1 = sequence1.unwrap_or_default();
        let sequence2 = sequence2.unwrap_or_default();

        if sequence1 == sequence2 {
            return Self::Identical {
                sequence: sequence1.to_string(),
            };
        }

        let segments = diff(sequence1, sequence2, Granularity::Char);
        Self::Differs {
            old: render_side(&segments, Side::Old),
            new: render_side(&segments, Side::New),
            stats: segment_stats(&segments),
        }
    }

    pub fn is_identical(&self) -> bool {
        matches!(self, Self::Identical { .. })
    }

    /// Spans for the old and new panel. Identical sequences fill both with one equal span.
    pub fn panels(&self) -> (Vec<PositionedSpan>, Vec<PositionedSpan>) {
        match self {
            Self::Identical { sequence } => {
                let whole = [DiffSegment::new(sequence.as_str(), SegmentKind::Equal)];
                let spans = render_side(&whole, Side::Old);
                (spans.clone(), spans)
            }
            Self::Differs { old, new, .. } => (old.clone(), new.clone()),
        }
    }
}
