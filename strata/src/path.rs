//! Node paths for merge recursion and diagnostics.
//!
//! A [`NodePath`] identifies a position inside a document tree. Paths render
//! as `module.rules[1].use` for diagnostics, while policy lookup uses only
//! the key segments (`module.rules.use`) so a rule applies uniformly to all
//! elements of a sequence.

use std::fmt;

/// One step of a node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descent through a mapping key.
    Key(String),
    /// Descent into a sequence element.
    Index(usize),
}

/// Path from a document root to a node.
///
/// # Examples
///
/// ```
/// use strata::NodePath;
///
/// let path = NodePath::root().child_key("module").child_key("rules").child_index(1);
/// assert_eq!(path.to_string(), "module.rules[1]");
/// assert_eq!(path.rule_key(), "module.rules");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The empty path, addressing the document root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new path extended by a mapping key.
    #[must_use]
    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// Returns a new path extended by a sequence index.
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The dotted key used for policy lookup.
    ///
    /// Index segments are skipped, so every element of a sequence shares the
    /// rule configured for the sequence's path.
    #[must_use]
    pub fn rule_key(&self) -> String {
        let keys: Vec<&str> = self
            .segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Key(key) => Some(key.as_str()),
                PathSegment::Index(_) => None,
            })
            .collect();
        keys.join(".")
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
            first = false;
        }
        Ok(())
    }
}
