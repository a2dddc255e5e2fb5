use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Equal,
    Added,
    Removed,
}

/// One run of text in an edit script, tagged with how it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub value: String,
    pub kind: SegmentKind,
}

impl DiffSegment {
    pub fn new(value: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Whether this segment is part of the text shown on `side`
    pub fn visible_on(&self, side: Side) -> bool {
        match side {
            Side::Old => self.kind != SegmentKind::Added,
            Side::New => self.kind != SegmentKind::Removed,
        }
    }
}

/// Which of the two compared versions a panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Old,
    New,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiffRecord {
    pub key: String,
    pub v1: Option<Value>,
    pub v2: Option<Value>,
    pub same: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Equal,
    Added,
    Removed,
    Changed,
}

/// One aligned row of a two-column line diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowPair {
    pub old: String,
    pub new: String,
    pub kind: RowKind,
}

impl RowPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>, kind: RowKind) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            kind,
        }
    }
}

/// Visible text of one side, with its 1-based inclusive character range in that side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionedSpan {
    pub text: String,
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Added,
    Removed,
    /// Nothing to show on this side of the row
    Blank,
}

/// A styled run inside one cell of a rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Highlight {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    pub fn blank() -> Self {
        Self::new("", Emphasis::Blank)
    }
}
