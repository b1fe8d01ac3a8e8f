pub mod config;
pub mod error;
pub mod injection;
pub mod syntax;
pub mod text;

pub use config::{RuleSnapshot, RuleStore};
pub use error::{InjectError, InjectResult};
pub use injection::{MatchRule, NodePattern, VirtualDocument, inject_host, inject_source};
pub use syntax::{HostText, NodeKind, SyntaxNode};
pub use text::TextRange;
