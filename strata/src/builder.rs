//! Fluent assembly of a merge from documents, files, and environments.
//!
//! [`ConfigBuilder`] is the front door of the library: it gathers a base
//! document, overlay documents, an optional on-disk environment stack, and
//! inline assignments, then validates everything and produces one
//! [`EffectiveConfig`](crate::merger::EffectiveConfig). Each environment
//! builds its configuration through an explicit `build()` call; there is no
//! shared or global state.

use std::path::{Path, PathBuf};

use crate::environment::EnvironmentOverrides;
use crate::error::{DocumentRole, Error, Result};
use crate::loader::ConfigLoader;
use crate::merger::{ConfigMerger, EffectiveConfig};
use crate::node::ConfigNode;
use crate::policy::MergePolicy;
use crate::validator::DocumentValidator;

/// A document supplied either in memory or by path.
#[derive(Debug, Clone)]
enum DocumentInput {
    Value(ConfigNode),
    File(PathBuf),
}

impl DocumentInput {
    fn resolve(&self) -> Result<ConfigNode> {
        match self {
            Self::Value(node) => Ok(node.clone()),
            Self::File(path) => ConfigLoader::load_file(path),
        }
    }
}

/// Builder for an effective configuration.
///
/// Layers are applied lowest to highest precedence:
/// 1. the base document,
/// 2. stack overlays discovered via [`with_environment_stack`](Self::with_environment_stack),
/// 3. overlays added with `with_overlay`/`with_overlay_file`, in call order,
/// 4. `STRATA_OVERRIDES` assignments (unless [`skip_env`](Self::skip_env)),
/// 5. assignments added with [`with_assignment`](Self::with_assignment).
///
/// # Examples
///
/// ```
/// use strata::{ConfigBuilder, ConfigNode};
///
/// let base: ConfigNode = serde_yaml::from_str("mode: development").unwrap();
/// let effective = ConfigBuilder::new()
///     .with_base(base)
///     .with_assignment("mode=production")
///     .skip_env()
///     .build()
///     .unwrap();
///
/// assert_eq!(effective.get("mode"), Some(&ConfigNode::from("production")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    base: Option<DocumentInput>,
    overlays: Vec<DocumentInput>,
    stack_dir: Option<PathBuf>,
    environment: Option<String>,
    assignments: Vec<String>,
    skip_env: bool,
    policy: MergePolicy,
}

impl ConfigBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base document from an in-memory value.
    #[must_use]
    pub fn with_base(mut self, document: ConfigNode) -> Self {
        self.base = Some(DocumentInput::Value(document));
        self
    }

    /// Sets the base document from a file path.
    #[must_use]
    pub fn with_base_file(mut self, path: &Path) -> Self {
        self.base = Some(DocumentInput::File(path.to_path_buf()));
        self
    }

    /// Appends an overlay document from an in-memory value.
    #[must_use]
    pub fn with_overlay(mut self, document: ConfigNode) -> Self {
        self.overlays.push(DocumentInput::Value(document));
        self
    }

    /// Appends an overlay document from a file path.
    #[must_use]
    pub fn with_overlay_file(mut self, path: &Path) -> Self {
        self.overlays.push(DocumentInput::File(path.to_path_buf()));
        self
    }

    /// Loads an environment stack (base + environment overlays) from `dir`.
    ///
    /// The stack's base document is used unless one was set explicitly, in
    /// which case the explicit base sits below the stack's layers.
    #[must_use]
    pub fn with_environment_stack(mut self, dir: &Path) -> Self {
        self.stack_dir = Some(dir.to_path_buf());
        self
    }

    /// Names the environment whose stack layers to load.
    ///
    /// Without this, the environment comes from `STRATA_ENV` (unless
    /// [`skip_env`](Self::skip_env)) or defaults to `development`.
    #[must_use]
    pub fn with_environment(mut self, name: &str) -> Self {
        self.environment = Some(name.to_string());
        self
    }

    /// Adds a `dotted.path=value` assignment, applied after all documents.
    #[must_use]
    pub fn with_assignment(mut self, assignment: &str) -> Self {
        self.assignments.push(assignment.to_string());
        self
    }

    /// Ignores `STRATA_ENV` and `STRATA_OVERRIDES` entirely.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Sets the merge policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves all layers, validates them, and merges.
    ///
    /// # Errors
    ///
    /// Fails if no base document is available, a file cannot be loaded, any
    /// document fails validation, the policy is invalid, or an assignment is
    /// malformed.
    pub fn build(self) -> Result<EffectiveConfig> {
        DocumentValidator::validate_policy(&self.policy)?;

        let mut base = self.base.as_ref().map(DocumentInput::resolve).transpose()?;
        let mut overlays = Vec::new();

        if let Some(ref dir) = self.stack_dir {
            let environment = if self.skip_env {
                self.environment
                    .clone()
                    .unwrap_or_else(|| crate::environment::DEFAULT_ENVIRONMENT.to_string())
            } else {
                EnvironmentOverrides::resolve_environment(self.environment.as_deref())
            };
            for source in ConfigLoader::load_stack(dir, &environment)? {
                if base.is_none() {
                    base = Some(source.document);
                } else {
                    overlays.push(source.document);
                }
            }
        }

        let Some(base) = base else {
            return Err(Error::Validation {
                field: "base".to_string(),
                message: "no base document provided".to_string(),
            });
        };

        for overlay in &self.overlays {
            overlays.push(overlay.resolve()?);
        }

        if !self.skip_env {
            if let Some(env_overrides) = EnvironmentOverrides::from_env()? {
                overlays.push(env_overrides);
            }
        }

        if !self.assignments.is_empty() {
            overlays.push(EnvironmentOverrides::parse_assignments(&self.assignments)?);
        }

        DocumentValidator::validate_document(&base, DocumentRole::Base)?;
        for (index, overlay) in overlays.iter().enumerate() {
            DocumentValidator::validate_document(overlay, DocumentRole::Overlay(index))?;
        }

        ConfigMerger::with_policy(self.policy).merge(&base, &overlays)
    }
}
