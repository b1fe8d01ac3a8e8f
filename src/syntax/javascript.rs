//! tree-sitter backed [`SyntaxNode`] for JavaScript and JSX.

use std::cell::RefCell;

use tree_sitter::{Node, Parser, Tree};

use super::{HostText, NodeKind, SyntaxNode};
use crate::error::{InjectError, InjectResult};
use crate::text::TextRange;

// One parser per thread so rayon workers never contend on it.
thread_local! {
    static PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

fn new_parser() -> InjectResult<Parser> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
    Ok(parser)
}

/// Parse JavaScript (JSX included) with this thread's cached parser.
///
/// `path` is only used to label the error.
pub fn parse_javascript(source: &str, path: &str) -> InjectResult<Tree> {
    PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(new_parser()?);
        }
        let Some(parser) = slot.as_mut() else {
            return Err(InjectError::parse(path));
        };
        parser
            .parse(source, None)
            .ok_or_else(|| InjectError::parse(path))
    })
}

/// A tree-sitter node paired with the source it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct JsNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> JsNode<'a> {
    pub fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    pub fn node(&self) -> Node<'a> {
        self.node
    }

    pub fn text(&self) -> &'a str {
        self.text_of(self.node)
    }

    fn text_of(&self, node: Node<'a>) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn wrap(&self, node: Node<'a>) -> Self {
        Self::new(node, self.source)
    }

    /// Strip one delimiter on each side, tolerating a missing closer in
    /// trees with syntax errors.
    fn delimited_content(&self, delimiters: &[char]) -> Option<TextRange> {
        let text = self.text();
        let first = text.chars().next()?;
        if !delimiters.contains(&first) {
            return None;
        }
        let start = self.node.start_byte() + first.len_utf8();
        let end = if text.len() > first.len_utf8() && text.ends_with(first) {
            self.node.end_byte() - first.len_utf8()
        } else {
            self.node.end_byte()
        };
        Some(TextRange::new(start, end.max(start)))
    }
}

impl<'a> SyntaxNode for JsNode<'a> {
    fn kind(&self) -> NodeKind {
        match self.node.kind() {
            "template_string" => NodeKind::TemplateLiteral,
            "string" => {
                let in_attribute = self
                    .node
                    .parent()
                    .is_some_and(|parent| parent.kind() == "jsx_attribute");
                if in_attribute {
                    NodeKind::AttributeValue
                } else {
                    NodeKind::StringLiteral
                }
            }
            "call_expression" => {
                let tagged = self
                    .node
                    .child_by_field_name("arguments")
                    .is_some_and(|arguments| arguments.kind() == "template_string");
                if tagged {
                    NodeKind::TaggedTemplate
                } else {
                    NodeKind::Call
                }
            }
            "identifier" | "member_expression" => NodeKind::Reference,
            "jsx_attribute" => NodeKind::Attribute,
            _ => NodeKind::Other,
        }
    }

    fn parent(&self) -> Option<Self> {
        self.node.parent().map(|parent| self.wrap(parent))
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| self.wrap(child))
            .collect()
    }

    fn name(&self) -> Option<&str> {
        match self.node.kind() {
            "identifier" => Some(self.text()),
            "member_expression" => self
                .node
                .child_by_field_name("property")
                .map(|property| self.text_of(property)),
            "jsx_attribute" => self
                .node
                .named_child(0)
                .map(|attribute_name| self.text_of(attribute_name)),
            _ => None,
        }
    }

    fn tag(&self) -> Option<Self> {
        if self.kind() != NodeKind::TaggedTemplate {
            return None;
        }
        self.node
            .child_by_field_name("function")
            .map(|function| self.wrap(function))
    }

    fn host_text(&self) -> Option<HostText> {
        let kind = self.kind();
        let content = match kind {
            NodeKind::TemplateLiteral => self.delimited_content(&['`'])?,
            NodeKind::StringLiteral | NodeKind::AttributeValue => {
                self.delimited_content(&['"', '\''])?
            }
            _ => return None,
        };

        let holes = if kind == NodeKind::TemplateLiteral {
            let mut cursor = self.node.walk();
            self.node
                .named_children(&mut cursor)
                .filter(|child| child.kind() == "template_substitution")
                .map(|hole| {
                    let start = hole.start_byte().clamp(content.start, content.end);
                    let end = hole.end_byte().clamp(content.start, content.end);
                    TextRange::new(start - content.start, end - content.start)
                })
                .collect()
        } else {
            Vec::new()
        };

        let text = self.source.get(content.as_range())?;
        Some(HostText::new(kind, content.start, text, holes))
    }
}

/// Collect every host candidate in the tree, in document order.
pub fn collect_hosts<'a>(tree: &'a Tree, source: &'a str) -> Vec<JsNode<'a>> {
    let mut hosts = Vec::new();
    let mut cursor = tree.walk();

    loop {
        let node = JsNode::new(cursor.node(), source);
        if node.kind().is_host_candidate() {
            hosts.push(node);
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return hosts;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts_of(source: &str) -> Vec<(NodeKind, String)> {
        let tree = parse_javascript(source, "test.js").expect("parse javascript");
        collect_hosts(&tree, source)
            .into_iter()
            .filter_map(|node| node.host_text())
            .map(|host| (host.kind, host.content))
            .collect()
    }

    #[test]
    fn test_collects_templates_strings_and_attributes() {
        let source = r#"const a = "plain"; const b = css`color: red;`; <div css="margin: 0;" />;"#;
        let hosts = hosts_of(source);
        assert_eq!(
            hosts,
            vec![
                (NodeKind::StringLiteral, "plain".to_string()),
                (NodeKind::TemplateLiteral, "color: red;".to_string()),
                (NodeKind::AttributeValue, "margin: 0;".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_holes_come_from_substitutions() {
        let source = "css`a ${b} c`;";
        let tree = parse_javascript(source, "test.js").expect("parse javascript");
        let host = collect_hosts(&tree, source)
            .into_iter()
            .find_map(|node| node.host_text())
            .expect("template host");

        assert_eq!(host.offset, 4);
        assert_eq!(host.content, "a ${b} c");
        assert_eq!(host.holes, vec![TextRange::new(2, 6)]);
    }

    #[test]
    fn test_tagged_template_classification() {
        let source = "styled.div`x`; styled(Button)`y`; f(1);";
        let tree = parse_javascript(source, "test.js").expect("parse javascript");
        let templates: Vec<_> = collect_hosts(&tree, source)
            .into_iter()
            .filter(|node| node.kind() == NodeKind::TemplateLiteral)
            .collect();
        assert_eq!(templates.len(), 2);

        let call = templates[0].parent().expect("call");
        assert_eq!(call.kind(), NodeKind::TaggedTemplate);
        let tag = call.tag().expect("tag");
        assert_eq!(tag.kind(), NodeKind::Reference);
        assert_eq!(tag.name(), Some("div"));
        let object = tag.first_child().expect("object");
        assert_eq!(object.name(), Some("styled"));

        let tag = templates[1]
            .parent()
            .and_then(|call| call.tag())
            .expect("tag");
        assert_eq!(tag.kind(), NodeKind::Call);
        let callee = tag.first_child().expect("callee");
        assert_eq!(callee.name(), Some("styled"));
    }

    #[test]
    fn test_attribute_name() {
        let source = r#"<Box sx="padding: 0;" />;"#;
        let tree = parse_javascript(source, "test.jsx").expect("parse javascript");
        let value = collect_hosts(&tree, source)
            .into_iter()
            .find(|node| node.kind() == NodeKind::AttributeValue)
            .expect("attribute value");
        let attribute = value.parent().expect("attribute");
        assert_eq!(attribute.kind(), NodeKind::Attribute);
        assert_eq!(attribute.name(), Some("sx"));
    }

    #[test]
    fn test_empty_template() {
        let source = "css``;";
        let hosts = hosts_of(source);
        assert_eq!(hosts, vec![(NodeKind::TemplateLiteral, String::new())]);
    }
}
