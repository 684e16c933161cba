//! Merge rules and per-path policy.
//!
//! A [`MergePolicy`] decides how two nodes at the same path combine. Defaults
//! cover the common case (scalars replace, sequences concatenate, mappings
//! deep-merge); per-path rules override the default where a document needs
//! different behavior, such as keyed union for loader-rule lists.

use std::collections::BTreeMap;

use crate::node::NodeKind;
use crate::path::NodePath;

/// How two nodes at the same path combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeRule {
    /// The overlay value replaces the base value wholesale.
    Replace,
    /// Sequences concatenate: base elements first, overlay elements after,
    /// relative order preserved within each source.
    Concatenate,
    /// Mappings merge recursively, key by key.
    DeepMerge,
    /// Sequences of named entries union by an identity field.
    ///
    /// Entries whose identity field matches are deep-merged in place at the
    /// base entry's position; entries without a match are appended, overlay
    /// entries in overlay order. Entries lacking the identity field fall back
    /// to append.
    KeyedUnion {
        /// Name of the identity field (for example `test` or `name`).
        key: String,
    },
}

/// Per-path merge policy with kind-based defaults.
///
/// Paths are dotted keys with sequence indices stripped, so a rule for
/// `module.rules` governs that sequence wherever it appears under the root.
///
/// # Examples
///
/// ```
/// use strata::{MergePolicy, MergeRule};
///
/// let policy = MergePolicy::new()
///     .with_keyed_union("module.rules", "test")
///     .with_rule("entry", MergeRule::Replace);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MergePolicy {
    rules: BTreeMap<String, MergeRule>,
    sequence_default: Option<MergeRule>,
}

impl MergePolicy {
    /// Creates a policy with only the kind-based defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a rule for a dotted path, replacing any previous rule there.
    #[must_use]
    pub fn with_rule(mut self, path: &str, rule: MergeRule) -> Self {
        self.rules.insert(path.to_string(), rule);
        self
    }

    /// Installs a keyed-union rule for a sequence path.
    ///
    /// Convenience for `with_rule(path, MergeRule::KeyedUnion { .. })`.
    #[must_use]
    pub fn with_keyed_union(self, path: &str, key: &str) -> Self {
        self.with_rule(
            path,
            MergeRule::KeyedUnion {
                key: key.to_string(),
            },
        )
    }

    /// Changes the default rule applied to sequences with no per-path rule.
    ///
    /// The built-in default is [`MergeRule::Concatenate`].
    #[must_use]
    pub fn with_sequence_default(mut self, rule: MergeRule) -> Self {
        self.sequence_default = Some(rule);
        self
    }

    /// Resolves the rule for a node of `kind` at `path`.
    ///
    /// A per-path rule wins; otherwise mappings deep-merge, sequences use the
    /// sequence default, and scalars replace.
    #[must_use]
    pub fn rule_for(&self, path: &NodePath, kind: NodeKind) -> MergeRule {
        if let Some(rule) = self.rules.get(&path.rule_key()) {
            return rule.clone();
        }
        match kind {
            NodeKind::Mapping => MergeRule::DeepMerge,
            NodeKind::Sequence => self
                .sequence_default
                .clone()
                .unwrap_or(MergeRule::Concatenate),
            NodeKind::Scalar => MergeRule::Replace,
        }
    }

    /// Iterates the installed per-path rules.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &MergeRule)> {
        self.rules.iter().map(|(path, rule)| (path.as_str(), rule))
    }
}
