//! Default configuration values for styled-inject.
//!
//! This module provides the defaults used by `config init` to generate a
//! configuration template.

use super::settings::{InjectionSettings, RuleConfig, Wrap};

const TEMPLATE_HEADER: &str = "\
# styled-inject configuration
#
# Built-in rules (styled.*, css, keyframes, injectGlobal, createGlobalStyle,
# .extend, .attrs(...), the css attribute) always apply first. Entries below
# are tried afterwards, in order.
#
# Each entry takes exactly one of:
#   tag = \"name\"         tagged template with this tag
#   tagPrefix = \"name\"   tag, or its leftmost part, starting with this
#   call = \"name\"        tag is a call containing a reference with this name
#   attribute = \"name\"   markup attribute value
# and optionally wrap = \"block\" | \"keyframes\" | \"none\", or an explicit
# prefix/suffix pair.

";

/// Returns the default settings: no custom rules.
pub fn default_settings() -> InjectionSettings {
    InjectionSettings::default()
}

/// An illustrative entry, emitted commented out in the template.
pub fn example_rule() -> RuleConfig {
    RuleConfig {
        tag: Some("myCss".to_string()),
        wrap: Wrap::Block,
        ..Default::default()
    }
}

/// Render the `config init` template.
pub fn default_config_template() -> Result<String, toml::ser::Error> {
    let defaults = toml::to_string_pretty(&default_settings())?;
    let example = toml::to_string_pretty(&InjectionSettings {
        injections: vec![example_rule()],
    })?;

    let mut template = String::from(TEMPLATE_HEADER);
    template.push_str(&defaults);
    template.push('\n');
    for line in example.lines() {
        if line.is_empty() {
            template.push('\n');
        } else {
            template.push_str("# ");
            template.push_str(line);
            template.push('\n');
        }
    }
    Ok(template)
}
