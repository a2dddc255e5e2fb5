//! Text comparison core: edit scripts, metadata field diffs, row pairing and
//! position-addressed sequence panels.

mod engine;
mod metadata;
mod positions;
mod rows;
mod stats;
mod types;

pub use engine::{Granularity, diff, new_text, old_text, side_text};
pub use metadata::{FieldLayout, compute_metadata_diff, format_value, is_multi_line};
pub use positions::{SequenceComparison, render_side};
pub use rows::{reconcile_lines, render_row};
pub use stats::{DiffStats, changed_field_count, row_stats, segment_stats};
pub use types::{
    DiffSegment, Emphasis, FieldDiffRecord, Highlight, PositionedSpan, RowKind, RowPair,
    SegmentKind, Side,
};
