//! Non-fatal merge diagnostics.
//!
//! Findings that do not abort a merge are recorded as [`Diagnostic`] values.
//! Each one is logged at warn level through the `log` facade when it is
//! raised, and retained on the resulting effective configuration so callers
//! and tests can inspect what the merge resolved by precedence.

use std::fmt;

use crate::node::NodeKind;

/// What a diagnostic reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Base and overlay disagreed on node kind; the overlay value won.
    TypeMismatch {
        /// Kind of the base node.
        base: NodeKind,
        /// Kind of the overlay node that replaced it.
        overlay: NodeKind,
    },
}

/// A single non-fatal merge finding, located by node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Rendered path of the node the finding refers to.
    pub path: String,
    /// The finding itself.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a type-mismatch diagnostic for the node at `path`.
    #[must_use]
    pub fn type_mismatch(path: String, base: NodeKind, overlay: NodeKind) -> Self {
        Self {
            path,
            kind: DiagnosticKind::TypeMismatch { base, overlay },
        }
    }

    /// Logs this diagnostic at warn level.
    pub fn warn(&self) {
        log::warn!("{self}");
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::TypeMismatch { base, overlay } => write!(
                f,
                "type mismatch at {}: {base} overridden by {overlay}",
                self.path
            ),
        }
    }
}
