//! Text edits and the per-violation edit set.
//!
//! Edits address the original file text with half-open byte ranges. An
//! [`EditSet`] is only constructible from edits whose ranges do not overlap,
//! so a surfaced fix is always applicable as one contiguous patch.

use std::fmt;

use crate::source::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the ranges share text or one is an insertion point strictly
    /// inside the other. Touching ranges do not overlap.
    pub fn overlaps(&self, other: TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Edit {
    Delete { range: TextRange },
    InsertAfter { at: usize, text: String },
    Replace { range: TextRange, text: String },
}

impl Edit {
    pub fn delete(range: TextRange) -> Self {
        Edit::Delete { range }
    }

    pub fn insert_text_after(token: Token<'_>, text: impl Into<String>) -> Self {
        Edit::InsertAfter {
            at: token.range.end,
            text: text.into(),
        }
    }

    pub fn replace(range: TextRange, text: impl Into<String>) -> Self {
        Edit::Replace {
            range,
            text: text.into(),
        }
    }

    /// Range of original text consumed by the edit (empty for insertions).
    pub fn range(&self) -> TextRange {
        match self {
            Edit::Delete { range } | Edit::Replace { range, .. } => *range,
            Edit::InsertAfter { at, .. } => TextRange::empty(*at),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Edit::Delete { .. } => "",
            Edit::InsertAfter { text, .. } | Edit::Replace { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditConflict {
    pub first: TextRange,
    pub second: TextRange,
}

impl fmt::Display for EditConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edit {} overlaps edit {}", self.second, self.first)
    }
}

impl std::error::Error for EditConflict {}

/// Conflict-free edits for one violation, sorted by start offset. Insertions
/// at the same offset keep their emission order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    pub fn new(mut edits: Vec<Edit>) -> Result<Self, EditConflict> {
        // stable: insertions at one offset keep emission order and precede
        // an edit consuming text from that offset
        edits.sort_by_key(|e| {
            let r = e.range();
            (r.start, r.end)
        });
        for pair in edits.windows(2) {
            let (a, b) = (pair[0].range(), pair[1].range());
            if b.start < a.end {
                return Err(EditConflict { first: a, second: b });
            }
        }
        Ok(Self { edits })
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Smallest range covering every edit.
    pub fn range(&self) -> Option<TextRange> {
        let first = self.edits.first()?.range();
        let end = self.edits.iter().map(|e| e.range().end).max()?;
        Some(TextRange::new(first.start, end))
    }

    /// Collapses the set into a single replacement of [`EditSet::range`],
    /// keeping the original text between edits.
    pub fn merged(&self, source: &str) -> Option<(TextRange, String)> {
        let range = self.range()?;
        let mut out = String::new();
        let mut cursor = range.start;
        for edit in &self.edits {
            let r = edit.range();
            out.push_str(source.get(cursor..r.start)?);
            out.push_str(edit.text());
            cursor = r.end;
        }
        out.push_str(source.get(cursor..range.end)?);
        Some((range, out))
    }
}

/// Validates the edits gathered for one violation.
///
/// Overlap means a matcher computed intersecting spans, which is a bug in the
/// matcher rather than something the input can cause; the fix is dropped.
pub fn compose(edits: Vec<Edit>) -> Option<EditSet> {
    match EditSet::new(edits) {
        Ok(set) if !set.is_empty() => Some(set),
        Ok(_) => None,
        Err(conflict) => {
            tracing::error!(%conflict, "dropping fix with overlapping edits");
            debug_assert!(false, "overlapping edits: {conflict}");
            None
        }
    }
}
