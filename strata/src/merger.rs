//! Merging of layered configuration documents.
//!
//! This module implements the merge of a base document with an ordered list
//! of overlay documents, producing one immutable [`EffectiveConfig`]. The
//! merge is a pure transform: inputs are never mutated and the output shares
//! no structure with them.

use crate::diagnostics::Diagnostic;
use crate::error::{DocumentRole, Error, Result};
use crate::node::{ConfigNode, NodeKind};
use crate::path::NodePath;
use crate::policy::{MergePolicy, MergeRule};

/// Merges configuration documents according to a [`MergePolicy`].
///
/// Overlays are applied pairwise, left to right, each result becoming the
/// accumulator for the next. Later overlays win on scalar conflicts.
///
/// # Examples
///
/// ```
/// use strata::{ConfigMerger, ConfigNode};
///
/// let base: ConfigNode = serde_yaml::from_str("mode: development\noutput:\n  path: dist").unwrap();
/// let overlay: ConfigNode = serde_yaml::from_str("mode: production").unwrap();
///
/// let merged = ConfigMerger::new().merge(&base, &[overlay]).unwrap();
/// assert_eq!(merged.get("mode"), Some(&ConfigNode::from("production")));
/// assert_eq!(merged.get("output.path"), Some(&ConfigNode::from("dist")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigMerger {
    policy: MergePolicy,
}

impl ConfigMerger {
    /// Creates a merger with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a merger with an explicit policy.
    #[must_use]
    pub fn with_policy(policy: MergePolicy) -> Self {
        Self { policy }
    }

    /// Merges `base` with `overlays`, in order.
    ///
    /// # Merging rules
    ///
    /// - A key present on only one side is kept unchanged.
    /// - Scalar vs scalar: the overlay wins, whatever the scalar types.
    /// - Mapping vs mapping: recursive deep merge (unless a path rule says
    ///   replace). Keys are never dropped.
    /// - Sequence vs sequence: concatenate by default, or the path's
    ///   configured rule (replace or keyed union).
    /// - Kind mismatch: the overlay wins and a type-mismatch diagnostic is
    ///   recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonMappingRoot`] if `base` or any overlay is not a
    /// mapping at the root.
    pub fn merge(&self, base: &ConfigNode, overlays: &[ConfigNode]) -> Result<EffectiveConfig> {
        Self::require_mapping_root(base, DocumentRole::Base)?;
        for (index, overlay) in overlays.iter().enumerate() {
            Self::require_mapping_root(overlay, DocumentRole::Overlay(index))?;
        }

        let mut diagnostics = Vec::new();
        let mut accumulator = base.clone();
        for overlay in overlays {
            accumulator =
                self.merge_nodes(&NodePath::root(), &accumulator, overlay, &mut diagnostics);
        }

        Ok(EffectiveConfig {
            root: accumulator,
            diagnostics,
        })
    }

    fn require_mapping_root(document: &ConfigNode, role: DocumentRole) -> Result<()> {
        if document.is_mapping() {
            Ok(())
        } else {
            Err(Error::NonMappingRoot {
                role,
                kind: document.kind(),
            })
        }
    }

    fn merge_nodes(
        &self,
        path: &NodePath,
        base: &ConfigNode,
        overlay: &ConfigNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ConfigNode {
        match (base, overlay) {
            (ConfigNode::Mapping(base_entries), ConfigNode::Mapping(overlay_entries)) => {
                if self.policy.rule_for(path, NodeKind::Mapping) == MergeRule::Replace {
                    overlay.clone()
                } else {
                    self.merge_mappings(path, base_entries, overlay_entries, diagnostics)
                }
            }
            (ConfigNode::Sequence(base_items), ConfigNode::Sequence(overlay_items)) => {
                match self.policy.rule_for(path, NodeKind::Sequence) {
                    MergeRule::Replace => overlay.clone(),
                    MergeRule::KeyedUnion { key } => {
                        self.keyed_union(path, base_items, overlay_items, &key, diagnostics)
                    }
                    // DeepMerge has no meaning for sequences; treat as the
                    // concatenate default.
                    MergeRule::Concatenate | MergeRule::DeepMerge => {
                        let mut items = base_items.clone();
                        items.extend(overlay_items.iter().cloned());
                        ConfigNode::Sequence(items)
                    }
                }
            }
            _ if base.kind() == NodeKind::Scalar && overlay.kind() == NodeKind::Scalar => {
                overlay.clone()
            }
            _ => {
                let diagnostic =
                    Diagnostic::type_mismatch(path.to_string(), base.kind(), overlay.kind());
                diagnostic.warn();
                diagnostics.push(diagnostic);
                overlay.clone()
            }
        }
    }

    fn merge_mappings(
        &self,
        path: &NodePath,
        base: &std::collections::BTreeMap<String, ConfigNode>,
        overlay: &std::collections::BTreeMap<String, ConfigNode>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ConfigNode {
        let mut merged = base.clone();
        for (key, overlay_value) in overlay {
            let merged_value = match base.get(key) {
                Some(base_value) => self.merge_nodes(
                    &path.child_key(key),
                    base_value,
                    overlay_value,
                    diagnostics,
                ),
                None => overlay_value.clone(),
            };
            merged.insert(key.clone(), merged_value);
        }
        ConfigNode::Mapping(merged)
    }

    /// Unions two sequences of named entries by an identity field.
    ///
    /// An overlay entry whose identity matches a base entry deep-merges into
    /// that entry at its base position. Everything else is appended: base
    /// entries stay first in base order, unmatched overlay entries follow in
    /// overlay order. Entries without the identity field never match.
    fn keyed_union(
        &self,
        path: &NodePath,
        base_items: &[ConfigNode],
        overlay_items: &[ConfigNode],
        key: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ConfigNode {
        fn identity_of<'a>(item: &'a ConfigNode, key: &str) -> Option<&'a ConfigNode> {
            let value = item.as_mapping()?.get(key)?;
            value.is_scalar().then_some(value)
        }

        let mut merged = base_items.to_vec();
        for overlay_item in overlay_items {
            let matched = identity_of(overlay_item, key).and_then(|overlay_id| {
                merged
                    .iter()
                    .position(|existing| identity_of(existing, key) == Some(overlay_id))
            });
            match matched {
                Some(position) => {
                    merged[position] = self.merge_nodes(
                        &path.child_index(position),
                        &merged[position],
                        overlay_item,
                        diagnostics,
                    );
                }
                None => merged.push(overlay_item.clone()),
            }
        }
        ConfigNode::Sequence(merged)
    }
}

/// The immutable result of a merge.
///
/// Contains every key reachable from the base or any overlay, with scalar
/// leaves reflecting the last overlay that touched them, plus the
/// diagnostics recorded while merging. No further mutation occurs; the
/// consumer reads it as the external tool's operating parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    root: ConfigNode,
    diagnostics: Vec<Diagnostic>,
}

impl EffectiveConfig {
    /// Borrows the root mapping.
    #[must_use]
    pub const fn root(&self) -> &ConfigNode {
        &self.root
    }

    /// Looks up a value by dotted path. See [`ConfigNode::get`].
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ConfigNode> {
        self.root.get(path)
    }

    /// The diagnostics recorded while merging, in emission order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the config, returning the root node.
    #[must_use]
    pub fn into_node(self) -> ConfigNode {
        self.root
    }

    /// Renders the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Renders the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}
