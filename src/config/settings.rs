use serde::{Deserialize, Serialize};

use crate::error::{InjectError, InjectResult};
use crate::injection::{MatchRule, NodePattern};

/// Contents of a `styled-inject.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectionSettings {
    #[serde(default)]
    pub injections: Vec<RuleConfig>,
}

impl InjectionSettings {
    /// Compile every entry into a [`MatchRule`], keeping file order.
    ///
    /// Fails on the first invalid entry so a typo never silently drops a
    /// rule.
    pub fn to_rules(&self) -> InjectResult<Vec<MatchRule>> {
        self.injections
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_rule(index))
            .collect()
    }
}

/// Wrapper applied to a custom rule when no explicit prefix/suffix is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Wrap {
    /// `div { ... }`
    #[default]
    Block,
    /// `@keyframes foo { ... }`
    Keyframes,
    #[serde(rename = "none")]
    Unwrapped,
}

/// One user-defined injection site.
///
/// Exactly one of `tag`, `tagPrefix`, `call` or `attribute` selects the
/// site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Tagged template whose tag has exactly this name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Tagged template whose tag, or the leftmost part of it, starts with this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_prefix: Option<String>,
    /// Tagged template whose tag is a call containing a reference with this name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
    /// Markup attribute with this name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default)]
    pub wrap: Wrap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl RuleConfig {
    /// Compile this entry. `index` is only used in error messages.
    pub fn to_rule(&self, index: usize) -> InjectResult<MatchRule> {
        let pattern = self.pattern(index)?;

        if self.prefix.is_some() || self.suffix.is_some() {
            return Ok(MatchRule::new(
                pattern,
                self.prefix.clone(),
                self.suffix.clone(),
            ));
        }

        Ok(match self.wrap {
            Wrap::Block => MatchRule::block(pattern),
            Wrap::Keyframes => MatchRule::keyframes(pattern),
            Wrap::Unwrapped => MatchRule::unwrapped(pattern),
        })
    }

    fn pattern(&self, index: usize) -> InjectResult<NodePattern> {
        let selectors = [
            ("tag", &self.tag),
            ("tagPrefix", &self.tag_prefix),
            ("call", &self.call),
            ("attribute", &self.attribute),
        ];
        let mut set = selectors
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)));

        let Some((key, value)) = set.next() else {
            return Err(InjectError::rule(
                index,
                "one of tag, tagPrefix, call or attribute is required",
            ));
        };
        if let Some((other, _)) = set.next() {
            return Err(InjectError::rule(
                index,
                format!("{key} and {other} cannot be combined"),
            ));
        }
        if value.is_empty() {
            return Err(InjectError::rule(index, format!("{key} must not be empty")));
        }

        Ok(match key {
            "tag" => NodePattern::tagged_template(NodePattern::exact_name(value)),
            "tagPrefix" => NodePattern::tagged_template(NodePattern::rooted_at_prefix([value])),
            "call" => NodePattern::tagged_template(NodePattern::has_child_named(value)),
            _ => NodePattern::attribute_named(value),
        })
    }
}
