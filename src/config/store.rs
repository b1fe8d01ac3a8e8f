//! Custom rule storage shared across threads.
//!
//! User-level rules sit in an `ArcSwap`, project-level rules in a `DashMap`
//! keyed by project root. Readers never hold a lock while injecting: they
//! take a [`RuleSnapshot`] and work from that.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;

use super::user::{load_user_config, project_config_path};
use super::{InjectionSettings, load_settings_file};
use crate::error::InjectResult;
use crate::injection::{MatchRule, builtin_rules};

/// Immutable view of the rules in effect for one project.
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    builtin: &'static [MatchRule],
    custom: Arc<[MatchRule]>,
}

impl RuleSnapshot {
    /// Built-in rules followed by the given custom rules.
    pub fn with_custom(custom: Vec<MatchRule>) -> Self {
        Self {
            builtin: builtin_rules(),
            custom: custom.into(),
        }
    }

    pub fn builtin_only() -> Self {
        Self::with_custom(Vec::new())
    }

    pub fn builtin(&self) -> &[MatchRule] {
        self.builtin
    }

    pub fn custom(&self) -> &[MatchRule] {
        &self.custom
    }
}

impl Default for RuleSnapshot {
    fn default() -> Self {
        Self::builtin_only()
    }
}

/// Stores custom rules for the user and for each project.
pub struct RuleStore {
    user_rules: ArcSwap<Vec<MatchRule>>,
    project_rules: DashMap<PathBuf, Arc<Vec<MatchRule>>>,
}

impl std::fmt::Debug for RuleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleStore")
            .field("user_rules", &self.user_rules.load().len())
            .field("projects", &self.project_rules.len())
            .finish()
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStore {
    pub fn new() -> Self {
        Self {
            user_rules: ArcSwap::new(Arc::new(Vec::new())),
            project_rules: DashMap::new(),
        }
    }

    pub fn set_user_rules(&self, rules: Vec<MatchRule>) {
        self.user_rules.store(Arc::new(rules));
    }

    pub fn set_project_rules(&self, root: impl Into<PathBuf>, rules: Vec<MatchRule>) {
        self.project_rules.insert(root.into(), Arc::new(rules));
    }

    pub fn remove_project(&self, root: &Path) {
        self.project_rules.remove(root);
    }

    /// Replace the user rules with the ones from the user config file.
    ///
    /// A missing file clears them. An unreadable or invalid file is logged
    /// and also clears them. Returns the number of rules now in effect.
    pub fn reload_user(&self) -> usize {
        let rules = compile_or_warn(load_user_config(), "user config");
        let count = rules.len();
        self.set_user_rules(rules);
        count
    }

    /// Replace the rules of the project at `root` with the ones from its
    /// config file, with the same fallbacks as [`RuleStore::reload_user`].
    pub fn reload_project(&self, root: &Path) -> usize {
        let path = project_config_path(root);
        let rules = compile_or_warn(load_settings_file(&path), &path.display().to_string());
        let count = rules.len();
        self.set_project_rules(root, rules);
        count
    }

    /// Rules in effect for `root`: built-ins, then the project's rules, then
    /// the user's rules.
    pub fn snapshot(&self, root: Option<&Path>) -> RuleSnapshot {
        let user = self.user_rules.load_full();
        let project = root.and_then(|root| {
            self.project_rules
                .get(root)
                .map(|entry| Arc::clone(entry.value()))
        });

        let custom: Vec<MatchRule> = project
            .iter()
            .flat_map(|rules| rules.iter())
            .chain(user.iter())
            .cloned()
            .collect();
        RuleSnapshot::with_custom(custom)
    }
}

fn compile_or_warn(
    loaded: InjectResult<Option<InjectionSettings>>,
    source: &str,
) -> Vec<MatchRule> {
    let compiled = loaded.and_then(|settings| match settings {
        Some(settings) => settings.to_rules(),
        None => Ok(Vec::new()),
    });

    match compiled {
        Ok(rules) => {
            log::debug!(
                target: "styled_inject::config",
                "Loaded {} custom rule(s) from {}",
                rules.len(),
                source
            );
            rules
        }
        Err(err) => {
            log::warn!(
                target: "styled_inject::config",
                "Ignoring custom rules from {}: {}",
                source,
                err
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::injection::NodePattern;
    use std::fs;
    use std::thread;

    fn tag_rule(name: &str) -> MatchRule {
        MatchRule::block(NodePattern::tagged_template(NodePattern::exact_name(name)))
    }

    #[test]
    fn test_snapshot_orders_project_before_user() {
        let store = RuleStore::new();
        store.set_user_rules(vec![tag_rule("user")]);
        store.set_project_rules("/project", vec![tag_rule("project")]);

        let snapshot = store.snapshot(Some(Path::new("/project")));
        assert_eq!(snapshot.custom(), &[tag_rule("project"), tag_rule("user")]);
        assert_eq!(snapshot.builtin().len(), builtin_rules().len());

        let other = store.snapshot(Some(Path::new("/elsewhere")));
        assert_eq!(other.custom(), &[tag_rule("user")]);

        let none = store.snapshot(None);
        assert_eq!(none.custom(), &[tag_rule("user")]);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_updates() {
        let store = RuleStore::new();
        store.set_project_rules("/p", vec![tag_rule("before")]);
        let snapshot = store.snapshot(Some(Path::new("/p")));

        store.set_project_rules("/p", vec![tag_rule("after")]);
        store.set_user_rules(vec![tag_rule("user")]);

        assert_eq!(snapshot.custom(), &[tag_rule("before")]);
    }

    #[test]
    fn test_remove_project() {
        let store = RuleStore::new();
        store.set_project_rules("/p", vec![tag_rule("x")]);
        store.remove_project(Path::new("/p"));
        assert!(store.snapshot(Some(Path::new("/p"))).custom().is_empty());
    }

    #[test]
    fn test_reload_project_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[[injections]]\ntag = \"myCss\"\n\n[[injections]]\nattribute = \"sx\"\n",
        )
        .expect("write config");

        let store = RuleStore::new();
        assert_eq!(store.reload_project(dir.path()), 2);
        let snapshot = store.snapshot(Some(dir.path()));
        assert_eq!(snapshot.custom()[0], tag_rule("myCss"));
    }

    #[test]
    fn test_reload_project_with_invalid_file_clears_rules() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RuleStore::new();
        store.set_project_rules(dir.path(), vec![tag_rule("stale")]);

        fs::write(dir.path().join(CONFIG_FILE_NAME), "[[injections]]\n").expect("write config");
        assert_eq!(store.reload_project(dir.path()), 0);
        assert!(store.snapshot(Some(dir.path())).custom().is_empty());
    }

    #[test]
    fn test_reload_project_without_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RuleStore::new();
        assert_eq!(store.reload_project(dir.path()), 0);
    }

    #[test]
    fn test_concurrent_readers_see_whole_rule_lists() {
        let store = Arc::new(RuleStore::new());
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    let rules = (0..(i % 5)).map(|n| tag_rule(&format!("r{n}"))).collect();
                    store.set_project_rules("/p", rules);
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snapshot = store.snapshot(Some(Path::new("/p")));
                        for (n, rule) in snapshot.custom().iter().enumerate() {
                            assert_eq!(*rule, tag_rule(&format!("r{n}")));
                        }
                    }
                })
            })
            .collect();

        writer.join().expect("writer");
        for reader in readers {
            reader.join().expect("reader");
        }
    }
}
