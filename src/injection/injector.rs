//! Per-host and per-file injection entry points.

use super::document::{STYLESHEET_LANGUAGE, VirtualDocument, record_content_ranges};
use super::placement::{assemble, build_placements};
use super::rules::find_match;
use super::segments::literal_segments;
use crate::config::RuleSnapshot;
use crate::error::InjectResult;
use crate::syntax::{SyntaxNode, collect_hosts, parse_javascript};

/// Decide whether `host` embeds stylesheet text and, if so, build its
/// virtual document.
///
/// Every "no" is silent: not a host candidate, no rule matches, or nothing
/// but interpolations to inject.
pub fn inject_host<N: SyntaxNode>(host: &N, rules: &RuleSnapshot) -> Option<VirtualDocument> {
    if !host.kind().is_host_candidate() {
        return None;
    }
    let rule = find_match(host, rules.builtin(), rules.custom())?;
    let text = host.host_text()?;

    let segments = literal_segments(&text);
    if segments.is_empty() {
        log::debug!(
            target: "styled_inject::injector",
            "Matched host at {} has no literal content, skipping",
            text.offset
        );
        return None;
    }

    let placements = build_placements(&segments, rule);
    for placement in &placements {
        log::trace!(
            target: "styled_inject::injector",
            "Placing {} with prefix {:?} and suffix {:?}",
            text.to_source_range(placement.range),
            placement.prefix,
            placement.suffix
        );
    }

    let mut document = assemble(&text, &placements, STYLESHEET_LANGUAGE)?;
    record_content_ranges(&mut document);

    log::debug!(
        target: "styled_inject::injector",
        "Injected {} segment(s) at {} as {}",
        document.shreds.len(),
        text.offset,
        document.language
    );
    Some(document)
}

/// Parse JavaScript/JSX source and collect the virtual documents of every
/// injection site, in document order.
pub fn inject_source(
    source: &str,
    path: &str,
    rules: &RuleSnapshot,
) -> InjectResult<Vec<VirtualDocument>> {
    let tree = parse_javascript(source, path)?;
    let documents = collect_hosts(&tree, source)
        .iter()
        .filter_map(|host| inject_host(host, rules))
        .collect();
    Ok(documents)
}
