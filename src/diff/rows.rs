use super::engine::{Granularity, diff};
use super::types::{Emphasis, Highlight, RowKind, RowPair, SegmentKind, Side};

/// Split a line-diff segment into lines, dropping the empty tail left by a final newline
fn split_lines(value: &str) -> Vec<&str> {
    if value.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = value.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Pair up the lines of a line-level diff for two-column display.
///
/// A removed block directly followed by an added block is zipped positionally into
/// `Changed` rows, padding the shorter side with empty strings. This is a heuristic:
/// no attempt is made to find a better pairing across blocks.
pub fn reconcile_lines(old: &str, new: &str) -> Vec<RowPair> {
    let segments = diff(old, new, Granularity::Line);
    let mut rows = Vec::new();
    let mut i = 0usize;

    while i < segments.len() {
        let segment = &segments[i];
        match segment.kind {
            SegmentKind::Added => {
                for line in split_lines(&segment.value) {
                    rows.push(RowPair::new("", line, RowKind::Added));
                }
            }
            SegmentKind::Removed => {
                let removed_lines = split_lines(&segment.value);
                match segments.get(i + 1) {
                    Some(next) if next.kind == SegmentKind::Added => {
                        let added_lines = split_lines(&next.value);
                        let max = removed_lines.len().max(added_lines.len());
                        for j in 0..max {
                            rows.push(RowPair::new(
                                removed_lines.get(j).copied().unwrap_or_default(),
                                added_lines.get(j).copied().unwrap_or_default(),
                                RowKind::Changed,
                            ));
                        }
                        // the added block is consumed by the pairing
                        i += 1;
                    }
                    _ => {
                        for line in removed_lines {
                            rows.push(RowPair::new(line, "", RowKind::Removed));
                        }
                    }
                }
            }
            SegmentKind::Equal => {
                for line in split_lines(&segment.value) {
                    rows.push(RowPair::new(line, line, RowKind::Equal));
                }
            }
        }
        i += 1;
    }

    rows
}

/// Render one side of a row into styled runs.
///
/// Changed rows get a character-level diff so only the differing runs are emphasized.
pub fn render_row(row: &RowPair, side: Side) -> Vec<Highlight> {
    let text = match side {
        Side::Old => &row.old,
        Side::New => &row.new,
    };

    match (row.kind, side) {
        (RowKind::Equal, _) => vec![Highlight::new(text.as_str(), Emphasis::Plain)],
        (RowKind::Added, Side::New) => vec![Highlight::new(text.as_str(), Emphasis::Added)],
        (RowKind::Removed, Side::Old) => vec![Highlight::new(text.as_str(), Emphasis::Removed)],
        (RowKind::Added, Side::Old) | (RowKind::Removed, Side::New) => vec![Highlight::blank()],
        (RowKind::Changed, _) => {
            let highlights: Vec<Highlight> = diff(row.old.as_str(), row.new.as_str(), Granularity::Char)
                .into_iter()
                .filter(|segment| segment.visible_on(side))
                .map(|segment| {
                    let emphasis = match segment.kind {
                        SegmentKind::Equal => Emphasis::Plain,
                        SegmentKind::Added => Emphasis::Added,
                        SegmentKind::Removed => Emphasis::Removed,
                    };
                    Highlight::new(segment.value, emphasis)
                })
                .collect();

            if highlights.is_empty() {
                vec![Highlight::blank()]
            } else {
                highlights
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn old_lines(rows: &[RowPair]) -> Vec<&str> {
        rows.iter()
            .filter(|r| r.kind != RowKind::Added && !(r.kind == RowKind::Changed && r.old.is_empty()))
            .map(|r| r.old.as_str())
            .collect()
    }

    fn new_lines(rows: &[RowPair]) -> Vec<&str> {
        rows.iter()
            .filter(|r| r.kind != RowKind::Removed && !(r.kind == RowKind::Changed && r.new.is_empty()))
            .map(|r| r.new.as_str())
            .collect()
    }

    #[test]
    fn unchanged_lines() {
        let rows = reconcile_lines("a\nb\n", "a\nb\n");
        assert_eq!(
            rows,
            vec![
                RowPair::new("a", "a", RowKind::Equal),
                RowPair::new("b", "b", RowKind::Equal),
            ]
        );
    }

    #[test]
    fn removed_added_pair() {
        let rows = reconcile_lines("a\nold\nc\n", "a\nnew\nc\n");
        assert_eq!(
            rows,
            vec![
                RowPair::new("a", "a", RowKind::Equal),
                RowPair::new("old", "new", RowKind::Changed),
                RowPair::new("c", "c", RowKind::Equal),
            ]
        );
    }

    #[test]
    fn changed_block_pads_shorter_side() {
        let rows = reconcile_lines("A\nB\n", "X\n");
        assert_eq!(
            rows,
            vec![
                RowPair::new("A", "X", RowKind::Changed),
                RowPair::new("B", "", RowKind::Changed),
            ]
        );
    }

    #[test]
    fn pure_removal_and_addition() {
        let rows = reconcile_lines("a\nb\nc\n", "a\nc\n");
        assert_eq!(rows[1], RowPair::new("b", "", RowKind::Removed));

        let rows = reconcile_lines("a\nc\n", "a\nb\nc\n");
        assert_eq!(rows[1], RowPair::new("", "b", RowKind::Added));

        let rows = reconcile_lines("", "x\ny\n");
        assert_eq!(
            rows,
            vec![
                RowPair::new("", "x", RowKind::Added),
                RowPair::new("", "y", RowKind::Added),
            ]
        );
    }

    #[test]
    fn rows_rebuild_both_sides() {
        let old = "{\n  \"a\": 1,\n  \"b\": 2,\n  \"c\": 3\n}";
        let new = "{\n  \"a\": 1,\n  \"b\": 20,\n  \"d\": 4,\n  \"e\": 5\n}";
        let rows = reconcile_lines(old, new);
        assert_eq!(old_lines(&rows), old.lines().collect::<Vec<_>>());
        assert_eq!(new_lines(&rows), new.lines().collect::<Vec<_>>());
        assert_eq!(rows, reconcile_lines(old, new));
    }

    #[test]
    fn blank_lines_survive() {
        let rows = reconcile_lines("a\n\nb\n", "a\n\nb\n");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], RowPair::new("", "", RowKind::Equal));
    }

    #[test]
    fn changed_row_highlights_only_differences() {
        let row = RowPair::new("collected 2020", "collected 2021", RowKind::Changed);

        let old = render_row(&row, Side::Old);
        assert_eq!(old[0], Highlight::new("collected 202", Emphasis::Plain));
        assert_eq!(old[1], Highlight::new("0", Emphasis::Removed));
        assert!(old.iter().all(|h| h.emphasis != Emphasis::Added));

        let new = render_row(&row, Side::New);
        assert_eq!(new[1], Highlight::new("1", Emphasis::Added));
        assert!(new.iter().all(|h| h.emphasis != Emphasis::Removed));
    }

    #[test]
    fn changed_row_against_padding_is_blank_on_padded_side() {
        let row = RowPair::new("B", "", RowKind::Changed);
        assert_eq!(render_row(&row, Side::New), vec![Highlight::blank()]);
        assert_eq!(
            render_row(&row, Side::Old),
            vec![Highlight::new("B", Emphasis::Removed)]
        );
    }

    #[test]
    fn one_sided_rows() {
        let added = RowPair::new("", "x", RowKind::Added);
        assert_eq!(render_row(&added, Side::Old), vec![Highlight::blank()]);
        assert_eq!(
            render_row(&added, Side::New),
            vec![Highlight::new("x", Emphasis::Added)]
        );

        let equal = RowPair::new("same", "same", RowKind::Equal);
        assert_eq!(
            render_row(&equal, Side::Old),
            vec![Highlight::new("same", Emphasis::Plain)]
        );
    }
}
