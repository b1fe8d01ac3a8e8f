//! Host syntax tree abstraction.
//!
//! The injection logic never looks at a concrete grammar. It asks a
//! [`SyntaxNode`] a handful of structural questions (what kind of node are
//! you, what is your name, who is your parent) and reads the literal text of
//! host elements through [`HostText`]. [`javascript`] provides the
//! tree-sitter backed implementation.

pub mod interpolation;
pub mod javascript;

pub use interpolation::{HoleSyntax, scan_interpolations};
pub use javascript::{JsNode, collect_hosts, parse_javascript};

use crate::text::TextRange;

/// Structural classification of a node, as far as injection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A template literal (`` `...` ``), possibly with `${...}` holes
    TemplateLiteral,
    /// A plain quoted string literal
    StringLiteral,
    /// The quoted value of a markup attribute (`css="..."`)
    AttributeValue,
    /// A tagged-template invocation (`` tag`...` ``)
    TaggedTemplate,
    /// A call expression that is not a tagged template
    Call,
    /// A name reference: a bare identifier or a member access
    Reference,
    /// A markup attribute (`name="value"`)
    Attribute,
    Other,
}

impl NodeKind {
    /// Whether nodes of this kind can carry injected text at all.
    pub fn is_host_candidate(self) -> bool {
        matches!(
            self,
            NodeKind::TemplateLiteral | NodeKind::StringLiteral | NodeKind::AttributeValue
        )
    }
}

/// Read-only view of a node in the host language's syntax tree.
pub trait SyntaxNode: Sized {
    fn kind(&self) -> NodeKind;

    fn parent(&self) -> Option<Self>;

    /// Named children in source order, comments excluded.
    fn children(&self) -> Vec<Self>;

    fn first_child(&self) -> Option<Self> {
        self.children().into_iter().next()
    }

    /// The referenced name of a [`NodeKind::Reference`] (for `a.b` this is
    /// `b`) or the attribute name of a [`NodeKind::Attribute`].
    fn name(&self) -> Option<&str>;

    /// The tag expression of a [`NodeKind::TaggedTemplate`].
    fn tag(&self) -> Option<Self>;

    /// Literal content of a host candidate, delimiters stripped.
    fn host_text(&self) -> Option<HostText>;
}

/// Content of a host element with its interpolation holes located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostText {
    pub kind: NodeKind,
    /// Absolute byte offset of `content` in the source file.
    pub offset: usize,
    pub content: String,
    /// Interpolation holes relative to the content start, sorted and
    /// non-overlapping.
    pub holes: Vec<TextRange>,
}

impl HostText {
    pub fn new(
        kind: NodeKind,
        offset: usize,
        content: impl Into<String>,
        holes: Vec<TextRange>,
    ) -> Self {
        Self {
            kind,
            offset,
            content: content.into(),
            holes,
        }
    }

    /// Build host text for content that has no tree to take holes from.
    ///
    /// The hole syntax follows the kind: `${...}` in template literals,
    /// `{...}` in attribute values, none in plain strings.
    pub fn scan(kind: NodeKind, offset: usize, content: impl Into<String>) -> Self {
        let content = content.into();
        let syntax = match kind {
            NodeKind::TemplateLiteral => HoleSyntax::DollarBrace,
            NodeKind::AttributeValue => HoleSyntax::Brace,
            _ => HoleSyntax::None,
        };
        let holes = scan_interpolations(&content, syntax);
        Self {
            kind,
            offset,
            content,
            holes,
        }
    }

    /// Absolute source range of a content-relative range.
    pub fn to_source_range(&self, range: TextRange) -> TextRange {
        range.shift(self.offset)
    }

    pub fn slice(&self, range: TextRange) -> &str {
        self.content.get(range.as_range()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_picks_hole_syntax_by_kind() {
        let template = HostText::scan(NodeKind::TemplateLiteral, 0, "a ${b} {c}");
        assert_eq!(template.holes, vec![TextRange::new(2, 6)]);

        let attribute = HostText::scan(NodeKind::AttributeValue, 0, "a ${b} {c}");
        assert_eq!(
            attribute.holes,
            vec![TextRange::new(3, 6), TextRange::new(7, 10)]
        );

        let string = HostText::scan(NodeKind::StringLiteral, 0, "a ${b}");
        assert!(string.holes.is_empty());
    }

    #[test]
    fn test_to_source_range_and_slice() {
        let host = HostText::scan(NodeKind::TemplateLiteral, 20, "color: red;");
        let range = TextRange::new(0, 5);
        assert_eq!(host.to_source_range(range), TextRange::new(20, 25));
        assert_eq!(host.slice(range), "color");
        assert_eq!(host.slice(TextRange::new(5, 50)), "");
    }

    #[test]
    fn test_host_candidates() {
        assert!(NodeKind::TemplateLiteral.is_host_candidate());
        assert!(NodeKind::StringLiteral.is_host_candidate());
        assert!(NodeKind::AttributeValue.is_host_candidate());
        assert!(!NodeKind::TaggedTemplate.is_host_candidate());
        assert!(!NodeKind::Reference.is_host_candidate());
    }
}
