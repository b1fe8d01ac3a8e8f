//! Turning literal segments into wrapped placements and a virtual document.

use super::document::{VirtualDocument, VirtualDocumentBuilder};
use super::rules::MatchRule;
use super::segments::TextSegment;
use crate::syntax::HostText;
use crate::text::TextRange;

/// A host range together with the exact text placed around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub prefix: String,
    /// Relative to the host content start
    pub range: TextRange,
    pub suffix: String,
}

/// Apply the rule's outer wrapping to a run of segments.
///
/// The outer prefix goes before the first segment only and the outer suffix
/// after the last one only; each segment keeps its own local wrapping
/// inside that.
pub fn build_placements(segments: &[TextSegment], rule: &MatchRule) -> Vec<Placement> {
    let last = segments.len().saturating_sub(1);

    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let outer_prefix = if index == 0 { rule.prefix() } else { "" };
            let outer_suffix = if index == last { rule.suffix() } else { "" };
            Placement {
                prefix: format!("{outer_prefix}{}", segment.prefix),
                range: segment.range,
                suffix: format!("{}{outer_suffix}", segment.suffix),
            }
        })
        .collect()
}

/// Build one virtual document covering every placement.
///
/// Returns `None` without starting a document when there is nothing to
/// place.
pub fn assemble(
    host: &HostText,
    placements: &[Placement],
    language: &str,
) -> Option<VirtualDocument> {
    if placements.is_empty() {
        return None;
    }

    let mut builder = VirtualDocumentBuilder::new(language);
    for placement in placements {
        builder.add_segment(host, placement.range, &placement.prefix, &placement.suffix);
    }
    builder.finish()
}
