//! Stylesheet injection into JavaScript template literals and attributes.
//!
//! The pipeline for one host element:
//! 1. [`rules::find_match`] picks the first rule whose pattern accepts it
//! 2. [`segments::literal_segments`] splits its content around holes
//! 3. [`placement::build_placements`] applies the rule's wrapping
//! 4. [`placement::assemble`] splices one [`VirtualDocument`]
//! 5. [`document::record_content_ranges`] attaches range metadata
//!
//! [`injector::inject_host`] runs all of it.

pub mod document;
pub mod injector;
pub mod pattern;
pub mod placement;
pub mod rules;
pub mod segments;

pub use document::{
    INJECTED_FILE_RANGES_KEY, STYLESHEET_LANGUAGE, Shred, VirtualDocument,
    VirtualDocumentBuilder, record_content_ranges,
};
pub use injector::{inject_host, inject_source};
pub use pattern::NodePattern;
pub use placement::{Placement, assemble, build_placements};
pub use rules::{
    COMPONENT_PROPS_PREFIX, COMPONENT_PROPS_SUFFIX, KEYFRAMES_PREFIX, KEYFRAMES_SUFFIX,
    MatchRule, builtin_rules, find_match,
};
pub use segments::{TextSegment, extract_literal_segments, literal_segments};
