//! Virtual documents spliced together from host ranges and wrapper text.
//!
//! A [`VirtualDocumentBuilder`] is the only way to create a
//! [`VirtualDocument`]. It is consumed by [`VirtualDocumentBuilder::finish`],
//! so callers either get a complete document or nothing.

use serde::Serialize;

use crate::syntax::HostText;
use crate::text::TextRange;

/// Language every injected document is tagged with.
pub const STYLESHEET_LANGUAGE: &str = "less";

/// Metadata key under which multi-segment documents carry their content
/// ranges.
pub const INJECTED_FILE_RANGES_KEY: &str = "injectedFileRanges";

/// One host range placed into a virtual document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shred {
    pub prefix: String,
    pub suffix: String,
    /// Absolute source range of the injected literal text
    pub host_range: TextRange,
    /// Range in the generated text, prefix and suffix included
    pub range: TextRange,
}

impl Shred {
    /// Range in the generated text holding only source characters.
    pub fn source_range(&self) -> TextRange {
        TextRange::new(
            self.range.start + self.prefix.len(),
            self.range.end - self.suffix.len(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualDocument {
    pub language: String,
    pub text: String,
    pub shreds: Vec<Shred>,
    #[serde(rename = "injectedFileRanges", skip_serializing_if = "Option::is_none")]
    content_ranges: Option<Vec<TextRange>>,
}

impl VirtualDocument {
    /// Metadata attached under `key`, if any.
    pub fn metadata(&self, key: &str) -> Option<&[TextRange]> {
        if key == INJECTED_FILE_RANGES_KEY {
            self.content_ranges.as_deref()
        } else {
            None
        }
    }

    /// Content ranges of a multi-segment document. `None` means the document
    /// maps onto its source as one contiguous piece.
    pub fn content_ranges(&self) -> Option<&[TextRange]> {
        self.content_ranges.as_deref()
    }

    pub fn set_content_ranges(&mut self, ranges: Option<Vec<TextRange>>) {
        self.content_ranges = ranges;
    }

    /// Absolute source ranges this document was spliced from.
    pub fn host_ranges(&self) -> impl Iterator<Item = TextRange> + '_ {
        self.shreds.iter().map(|shred| shred.host_range)
    }

    /// Map an offset in the generated text back to the source file.
    ///
    /// Offsets inside wrapper text have no source counterpart.
    pub fn to_host_offset(&self, doc_offset: usize) -> Option<usize> {
        self.shreds.iter().find_map(|shred| {
            let source = shred.source_range();
            source
                .contains(doc_offset)
                .then(|| shred.host_range.start + (doc_offset - source.start))
        })
    }

    /// Map a source offset into the generated text.
    pub fn to_document_offset(&self, host_offset: usize) -> Option<usize> {
        self.shreds.iter().find_map(|shred| {
            shred
                .host_range
                .contains(host_offset)
                .then(|| shred.source_range().start + (host_offset - shred.host_range.start))
        })
    }
}

/// Incrementally assembles one virtual document.
#[derive(Debug)]
pub struct VirtualDocumentBuilder {
    language: String,
    text: String,
    shreds: Vec<Shred>,
}

impl VirtualDocumentBuilder {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: String::new(),
            shreds: Vec::new(),
        }
    }

    /// Append `prefix`, the host content at `range`, and `suffix`.
    ///
    /// `range` is relative to the host content and is clamped to it.
    pub fn add_segment(
        &mut self,
        host: &HostText,
        range: TextRange,
        prefix: &str,
        suffix: &str,
    ) -> &mut Self {
        let len = host.content.len();
        let start = range.start.min(len);
        let range = TextRange::new(start, range.end.clamp(start, len));

        let doc_start = self.text.len();
        self.text.push_str(prefix);
        self.text.push_str(host.slice(range));
        self.text.push_str(suffix);

        self.shreds.push(Shred {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            host_range: host.to_source_range(range),
            range: TextRange::new(doc_start, self.text.len()),
        });
        self
    }

    /// Finalize the document. A builder that received no segment produces
    /// nothing.
    pub fn finish(self) -> Option<VirtualDocument> {
        if self.shreds.is_empty() {
            return None;
        }
        Some(VirtualDocument {
            language: self.language,
            text: self.text,
            shreds: self.shreds,
            content_ranges: None,
        })
    }
}

/// Record where the real content of each shred lives in the generated text.
///
/// A shred's content range runs from its start to its end minus its suffix,
/// so the outer prefix stays attached to the first shred. Only documents
/// with more than one shred get the metadata.
pub fn record_content_ranges(document: &mut VirtualDocument) {
    let ranges: Vec<TextRange> = document
        .shreds
        .iter()
        .map(|shred| TextRange::new(shred.range.start, shred.range.end - shred.suffix.len()))
        .collect();

    let ranges = (ranges.len() > 1).then_some(ranges);
    document.set_content_ranges(ranges);
}
