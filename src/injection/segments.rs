//! Splitting host content into literal runs around interpolation holes.

use crate::syntax::HostText;
use crate::text::TextRange;

/// One contiguous literal run of a host element, with optional local
/// wrapping text.
///
/// Rules only wrap the whole injection today, so the local prefix and
/// suffix are always empty when produced by [`literal_segments`]. They are
/// honored by the assembler for callers that build segments themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub prefix: String,
    /// Relative to the host content start
    pub range: TextRange,
    pub suffix: String,
}

impl TextSegment {
    pub fn new(range: TextRange) -> Self {
        Self {
            prefix: String::new(),
            range,
            suffix: String::new(),
        }
    }

    pub fn with_wrapping(
        prefix: impl Into<String>,
        range: TextRange,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            range,
            suffix: suffix.into(),
        }
    }
}

/// Ranges of the maximal literal runs between interpolation holes.
///
/// Empty runs are dropped, so content that is empty or made only of holes
/// yields no ranges at all.
pub fn extract_literal_segments(host: &HostText) -> Vec<TextRange> {
    let len = host.content.len();
    let mut ranges = Vec::with_capacity(host.holes.len() + 1);
    let mut cursor = 0;

    for hole in &host.holes {
        let start = hole.start.min(len);
        if start > cursor {
            ranges.push(TextRange::new(cursor, start));
        }
        cursor = cursor.max(hole.end.min(len));
    }
    if len > cursor {
        ranges.push(TextRange::new(cursor, len));
    }

    ranges
}

/// [`extract_literal_segments`] as segments with empty local wrapping.
pub fn literal_segments(host: &HostText) -> Vec<TextSegment> {
    extract_literal_segments(host)
        .into_iter()
        .map(TextSegment::new)
        .collect()
}
