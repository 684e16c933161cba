//! Configuration document value model.
//!
//! A configuration document is a tree of [`ConfigNode`] values: scalars,
//! sequences, and string-keyed mappings. The type is deliberately a tagged
//! variant rather than a dynamic value so merge logic can pattern-match
//! exhaustively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single value in a configuration document.
///
/// Documents are tree-shaped by construction: a node owns its children, so
/// cycles cannot be expressed and every traversal terminates.
///
/// # Examples
///
/// ```
/// use strata::ConfigNode;
///
/// let node: ConfigNode = serde_yaml::from_str("mode: development\nport: 8090").unwrap();
/// assert!(node.is_mapping());
/// assert_eq!(node.get("mode"), Some(&ConfigNode::from("development")));
/// assert_eq!(node.get("port"), Some(&ConfigNode::from(8090)));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// An explicit null value.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar.
    String(String),
    /// An ordered sequence of nodes.
    Sequence(Vec<ConfigNode>),
    /// A mapping from string keys to nodes.
    ///
    /// Non-string keys are rejected at parse time; configuration documents
    /// are addressed by dotted string paths throughout.
    Mapping(BTreeMap<String, ConfigNode>),
}

/// Coarse classification of a node, used by merge dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Null, boolean, integer, float, or string.
    Scalar,
    /// An ordered sequence.
    Sequence,
    /// A string-keyed mapping.
    Mapping,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Sequence => write!(f, "sequence"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

impl ConfigNode {
    /// Returns the coarse kind of this node.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::{ConfigNode, NodeKind};
    ///
    /// assert_eq!(ConfigNode::from(true).kind(), NodeKind::Scalar);
    /// assert_eq!(ConfigNode::Sequence(vec![]).kind(), NodeKind::Sequence);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_) => {
                NodeKind::Scalar
            }
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Returns true if this node is a mapping.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Returns true if this node is a scalar (including null).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.kind(), NodeKind::Scalar)
    }

    /// Borrows the mapping entries, if this node is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, ConfigNode>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Borrows the sequence elements, if this node is a sequence.
    #[must_use]
    pub const fn as_sequence(&self) -> Option<&Vec<ConfigNode>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the string value, if this node is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a descendant by dotted path.
    ///
    /// Each path segment descends one mapping level; a segment that parses
    /// as an integer indexes into a sequence instead. Returns `None` if any
    /// segment is missing or addresses a node of the wrong kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::ConfigNode;
    ///
    /// let doc: ConfigNode = serde_yaml::from_str(
    ///     "output:\n  path: dist\nrules:\n  - test: css",
    /// ).unwrap();
    ///
    /// assert_eq!(doc.get("output.path"), Some(&ConfigNode::from("dist")));
    /// assert_eq!(doc.get("rules.0.test"), Some(&ConfigNode::from("css")));
    /// assert_eq!(doc.get("output.missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ConfigNode> {
        let mut current = self;
        for segment in path.split('.') {
            current = match current {
                Self::Mapping(entries) => entries.get(segment)?,
                Self::Sequence(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl From<bool> for ConfigNode {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigNode {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ConfigNode {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(items: Vec<ConfigNode>) -> Self {
        Self::Sequence(items)
    }
}

impl From<BTreeMap<String, ConfigNode>> for ConfigNode {
    fn from(entries: BTreeMap<String, ConfigNode>) -> Self {
        Self::Mapping(entries)
    }
}
