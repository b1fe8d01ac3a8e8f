//! Match rules and the built-in CSS-in-JS conventions.

use std::sync::LazyLock;

use super::pattern::NodePattern;
use crate::syntax::SyntaxNode;

/// Wrapper that turns a bare declaration list into a rule set.
pub const COMPONENT_PROPS_PREFIX: &str = "div {";
pub const COMPONENT_PROPS_SUFFIX: &str = "}";

/// Wrapper that turns keyframe selectors into an `@keyframes` block.
pub const KEYFRAMES_PREFIX: &str = "@keyframes foo {";
pub const KEYFRAMES_SUFFIX: &str = "}";

/// A structural pattern plus the text wrapped around everything it injects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRule {
    pub pattern: NodePattern,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl MatchRule {
    pub fn new(pattern: NodePattern, prefix: Option<String>, suffix: Option<String>) -> Self {
        Self {
            pattern,
            prefix,
            suffix,
        }
    }

    /// Content is a declaration list: wrap it in `div { ... }`.
    pub fn block(pattern: NodePattern) -> Self {
        Self::new(
            pattern,
            Some(COMPONENT_PROPS_PREFIX.to_string()),
            Some(COMPONENT_PROPS_SUFFIX.to_string()),
        )
    }

    /// Content is a list of keyframe selectors.
    pub fn keyframes(pattern: NodePattern) -> Self {
        Self::new(
            pattern,
            Some(KEYFRAMES_PREFIX.to_string()),
            Some(KEYFRAMES_SUFFIX.to_string()),
        )
    }

    /// Content is already a complete stylesheet.
    pub fn unwrapped(pattern: NodePattern) -> Self {
        Self::new(pattern, None, None)
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or_default()
    }

    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or_default()
    }

    pub fn accepts<N: SyntaxNode>(&self, node: &N) -> bool {
        self.pattern.accepts(node)
    }
}

fn tagged(name: &str) -> NodePattern {
    NodePattern::tagged_template(NodePattern::exact_name(name))
}

static BUILTIN_RULES: LazyLock<Vec<MatchRule>> = LazyLock::new(|| {
    vec![
        MatchRule::block(NodePattern::tagged_template(
            NodePattern::rooted_at_prefix(["styled"]),
        )),
        MatchRule::block(NodePattern::attribute_named("css")),
        MatchRule::block(tagged("extend")),
        MatchRule::block(NodePattern::tagged_template(
            NodePattern::has_child_named("attrs"),
        )),
        MatchRule::block(tagged("css")),
        MatchRule::unwrapped(tagged("injectGlobal")),
        MatchRule::unwrapped(tagged("createGlobalStyle")),
        MatchRule::keyframes(tagged("keyframes")),
    ]
});

/// Framework conventions recognized out of the box, in priority order.
pub fn builtin_rules() -> &'static [MatchRule] {
    &BUILTIN_RULES
}

/// First rule accepting `host`: built-ins in order, then custom rules in
/// order. `None` means the host is not an injection site.
pub fn find_match<'r, N: SyntaxNode>(
    host: &N,
    builtin: &'r [MatchRule],
    custom: &'r [MatchRule],
) -> Option<&'r MatchRule> {
    builtin
        .iter()
        .find(|rule| rule.accepts(host))
        .or_else(|| custom.iter().find(|rule| rule.accepts(host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{collect_hosts, parse_javascript};

    fn match_first_host(source: &str, custom: &[MatchRule]) -> Option<MatchRule> {
        let tree = parse_javascript(source, "test.js").expect("parse javascript");
        let hosts = collect_hosts(&tree, source);
        let host = hosts.first().expect("host candidate");
        find_match(host, builtin_rules(), custom).cloned()
    }

    #[test]
    fn test_builtin_wrappers() {
        let cases = [
            ("styled.div`a`", COMPONENT_PROPS_PREFIX),
            ("styled(Button)`a`", COMPONENT_PROPS_PREFIX),
            ("Button.extend`a`", COMPONENT_PROPS_PREFIX),
            ("styled.div.attrs({})`a`", COMPONENT_PROPS_PREFIX),
            ("css`a`", COMPONENT_PROPS_PREFIX),
            ("injectGlobal`a`", ""),
            ("createGlobalStyle`a`", ""),
            ("keyframes`a`", KEYFRAMES_PREFIX),
        ];
        for (source, prefix) in cases {
            let rule = match_first_host(source, &[])
                .unwrap_or_else(|| panic!("{source} should match a built-in"));
            assert_eq!(rule.prefix(), prefix, "prefix for {source}");
        }
    }

    #[test]
    fn test_css_attribute_is_builtin() {
        let rule = match_first_host(r#"<div css="color: red;" />"#, &[]).expect("match");
        assert_eq!(rule.pattern, NodePattern::attribute_named("css"));
    }

    #[test]
    fn test_no_match_is_none() {
        assert!(match_first_host("html`<p></p>`", &[]).is_none());
        assert!(match_first_host(r#"const s = "color: red;""#, &[]).is_none());
    }

    #[test]
    fn test_custom_rules_apply_after_builtins() {
        let custom = vec![MatchRule::keyframes(tagged("anim"))];
        let rule = match_first_host("anim`from {} to {}`", &custom).expect("custom match");
        assert_eq!(rule.prefix(), KEYFRAMES_PREFIX);
    }

    #[test]
    fn test_builtin_wins_over_overlapping_custom_rule() {
        let custom = vec![MatchRule::new(
            tagged("css"),
            Some("custom {".to_string()),
            Some("}}".to_string()),
        )];
        let rule = match_first_host("css`color: red;`", &custom).expect("match");
        assert_eq!(rule.prefix(), COMPONENT_PROPS_PREFIX);
        assert_eq!(rule.suffix(), COMPONENT_PROPS_SUFFIX);
    }

    #[test]
    fn test_builtin_order_is_stable() {
        let rules = builtin_rules();
        assert_eq!(rules.len(), 8);
        assert_eq!(rules[1].pattern, NodePattern::attribute_named("css"));
        assert_eq!(rules[7].prefix(), KEYFRAMES_PREFIX);
    }
}
