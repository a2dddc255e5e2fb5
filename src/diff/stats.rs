use super::engine::{Granularity, diff};
use super::types::{DiffSegment, FieldDiffRecord, RowKind, RowPair, SegmentKind};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Count added and removed characters of an edit script
pub fn segment_stats(segments: &[DiffSegment]) -> DiffStats {
    let mut stats = DiffStats::default();

    for segment in segments {
        match segment.kind {
            SegmentKind::Added => stats.added += segment.value.chars().count(),
            SegmentKind::Removed => stats.removed += segment.value.chars().count(),
            SegmentKind::Equal => {}
        }
    }

    stats
}

/// Calculate character-level statistics from reconciled rows
pub fn row_stats(rows: &[RowPair]) -> DiffStats {
    let mut stats = DiffStats::default();

    for row in rows {
        match row.kind {
            RowKind::Equal => {}
            RowKind::Added => stats.added += row.new.chars().count(),
            RowKind::Removed => stats.removed += row.old.chars().count(),
            RowKind::Changed => {
                let row_stats = segment_stats(&diff(row.old.as_str(), row.new.as_str(), Granularity::Char));
                stats.added += row_stats.added;
                stats.removed += row_stats.removed;
            }
        }
    }

    stats
}

pub fn changed_field_count(records: &[FieldDiffRecord]) -> usize {
    records.iter().filter(|r| !r.same).count()
}
