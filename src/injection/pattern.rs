//! Structural predicates over host syntax nodes.

use crate::syntax::{NodeKind, SyntaxNode};

/// A shape a node must have for a rule to apply.
///
/// Host-level variants ([`NodePattern::TaggedTemplate`],
/// [`NodePattern::AttributeNamed`]) are tested against the candidate host
/// element; the remaining variants describe the tag expression or its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePattern {
    /// A template literal passed to a tagged-template invocation whose tag
    /// matches the inner pattern.
    TaggedTemplate(Box<NodePattern>),
    /// A reference whose name starts with one of the prefixes.
    NamePrefix(Vec<String>),
    /// A reference with exactly this name. For `a.b` the name is `b`.
    ExactName(String),
    /// Any node whose first child matches, e.g. `styled` in `styled.div`.
    FirstChild(Box<NodePattern>),
    /// A call expression with a direct child reference of this name, e.g.
    /// `styled(Base).attrs({...})`.
    HasChildNamed(String),
    /// The value of a markup attribute with this name.
    AttributeNamed(String),
    Or(Vec<NodePattern>),
}

impl NodePattern {
    pub fn tagged_template(tag: NodePattern) -> Self {
        NodePattern::TaggedTemplate(Box::new(tag))
    }

    pub fn name_prefix<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        NodePattern::NamePrefix(prefixes.into_iter().map(Into::into).collect())
    }

    pub fn exact_name(name: impl Into<String>) -> Self {
        NodePattern::ExactName(name.into())
    }

    pub fn first_child(pattern: NodePattern) -> Self {
        NodePattern::FirstChild(Box::new(pattern))
    }

    pub fn has_child_named(name: impl Into<String>) -> Self {
        NodePattern::HasChildNamed(name.into())
    }

    pub fn attribute_named(name: impl Into<String>) -> Self {
        NodePattern::AttributeNamed(name.into())
    }

    /// A name, or any expression whose leftmost part is that name:
    /// `styled`, `styled.div`, `styled(Button)`.
    pub fn rooted_at_prefix<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        let prefix = Self::name_prefix(prefixes);
        NodePattern::Or(vec![prefix.clone(), Self::first_child(prefix)])
    }

    pub fn accepts<N: SyntaxNode>(&self, node: &N) -> bool {
        match self {
            NodePattern::TaggedTemplate(tag) => {
                if node.kind() != NodeKind::TemplateLiteral {
                    return false;
                }
                node.parent()
                    .and_then(|invocation| invocation.tag())
                    .is_some_and(|tag_node| tag.accepts(&tag_node))
            }
            NodePattern::NamePrefix(prefixes) => reference_name(node)
                .is_some_and(|name| prefixes.iter().any(|p| name.starts_with(p.as_str()))),
            NodePattern::ExactName(expected) => {
                reference_name(node).is_some_and(|name| name == expected)
            }
            NodePattern::FirstChild(pattern) => node
                .first_child()
                .is_some_and(|child| pattern.accepts(&child)),
            NodePattern::HasChildNamed(expected) => {
                node.kind() == NodeKind::Call
                    && node
                        .children()
                        .iter()
                        .any(|child| reference_name(child).is_some_and(|name| name == expected))
            }
            NodePattern::AttributeNamed(expected) => {
                node.kind() == NodeKind::AttributeValue
                    && node.parent().is_some_and(|attribute| {
                        attribute.kind() == NodeKind::Attribute
                            && attribute.name().is_some_and(|name| name == expected)
                    })
            }
            NodePattern::Or(patterns) => patterns.iter().any(|pattern| pattern.accepts(node)),
        }
    }
}

fn reference_name<N: SyntaxNode>(node: &N) -> Option<&str> {
    if node.kind() == NodeKind::Reference {
        node.name()
    } else {
        None
    }
}
