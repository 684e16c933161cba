//! Environment selection and inline override assignments.
//!
//! Two process-environment hooks exist: `STRATA_ENV` names the environment
//! whose overlay stack to load, and `STRATA_OVERRIDES` carries
//! comma-separated `dotted.path=value` assignments applied after every file
//! layer. The same assignment syntax backs the CLI's `--set` flag.

use std::collections::BTreeMap;
use std::env;

use crate::error::{Error, Result};
use crate::node::ConfigNode;

/// Environment variable naming the active environment.
pub const ENV_VAR: &str = "STRATA_ENV";

/// Environment variable carrying inline override assignments.
pub const OVERRIDES_VAR: &str = "STRATA_OVERRIDES";

/// Environment used when nothing selects one explicitly.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Resolves environments and parses inline override assignments.
///
/// # Examples
///
/// ```
/// use strata::{ConfigNode, EnvironmentOverrides};
///
/// let overrides = EnvironmentOverrides::parse_assignments(&[
///     "mode=production".to_string(),
///     "output.path=/dist".to_string(),
/// ]).unwrap();
/// assert_eq!(overrides.get("mode"), Some(&ConfigNode::from("production")));
/// assert_eq!(overrides.get("output.path"), Some(&ConfigNode::from("/dist")));
/// ```
pub struct EnvironmentOverrides;

impl EnvironmentOverrides {
    /// Resolve the active environment name.
    ///
    /// Priority: explicit argument, then `STRATA_ENV`, then
    /// [`DEFAULT_ENVIRONMENT`].
    #[must_use]
    pub fn resolve_environment(explicit: Option<&str>) -> String {
        if let Some(name) = explicit {
            return name.to_string();
        }
        env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
    }

    /// Read override assignments from `STRATA_OVERRIDES`.
    ///
    /// Returns `Ok(None)` when the variable is unset or blank.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any assignment is malformed.
    pub fn from_env() -> Result<Option<ConfigNode>> {
        let Ok(raw) = env::var(OVERRIDES_VAR) else {
            return Ok(None);
        };

        let assignments: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();

        if assignments.is_empty() {
            return Ok(None);
        }
        Self::parse_assignments(&assignments).map(Some)
    }

    /// Parse `dotted.path=value` assignments into one override document.
    ///
    /// Later assignments to the same path win. Values parse as scalars via
    /// [`Self::parse_scalar`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if an assignment has no `=`, or has an
    /// empty path or path segment.
    pub fn parse_assignments(assignments: &[String]) -> Result<ConfigNode> {
        let mut root = BTreeMap::new();
        for assignment in assignments {
            let (path, value) = Self::split_assignment(assignment)?;
            Self::insert_at(&mut root, &path, Self::parse_scalar(value));
        }
        Ok(ConfigNode::Mapping(root))
    }

    /// Parse a scalar literal the way YAML would.
    ///
    /// Recognizes, in order: `null`/`~`, booleans
    /// (true/false/yes/no/on/off, case-insensitive), integers, floats;
    /// anything else stays a string.
    #[must_use]
    pub fn parse_scalar(s: &str) -> ConfigNode {
        match s.to_lowercase().as_str() {
            "null" | "~" => return ConfigNode::Null,
            "true" | "yes" | "on" => return ConfigNode::Bool(true),
            "false" | "no" | "off" => return ConfigNode::Bool(false),
            _ => {}
        }
        if let Ok(int) = s.parse::<i64>() {
            return ConfigNode::Int(int);
        }
        if let Ok(float) = s.parse::<f64>() {
            return ConfigNode::Float(float);
        }
        ConfigNode::String(s.to_string())
    }

    /// Split one assignment into path segments and the raw value.
    fn split_assignment(assignment: &str) -> Result<(Vec<String>, &str)> {
        let (path, value) = assignment.split_once('=').ok_or_else(|| Error::Validation {
            field: assignment.to_string(),
            message: "expected dotted.path=value".to_string(),
        })?;

        let segments: Vec<String> = path.trim().split('.').map(ToString::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::Validation {
                field: assignment.to_string(),
                message: "override path segments must be non-empty".to_string(),
            });
        }
        Ok((segments, value))
    }

    /// Insert a value at a key path, creating intermediate mappings.
    ///
    /// An intermediate that is not a mapping is replaced by one; assignments
    /// are the highest-precedence layer, so they win over whatever shape the
    /// earlier assignment left behind.
    fn insert_at(root: &mut BTreeMap<String, ConfigNode>, path: &[String], value: ConfigNode) {
        let (first, rest) = match path {
            [only] => {
                root.insert(only.clone(), value);
                return;
            }
            [first, rest @ ..] => (first, rest),
            [] => return,
        };

        let child = root
            .entry(first.clone())
            .or_insert_with(|| ConfigNode::Mapping(BTreeMap::new()));
        if !child.is_mapping() {
            *child = ConfigNode::Mapping(BTreeMap::new());
        }
        if let ConfigNode::Mapping(entries) = child {
            Self::insert_at(entries, rest, value);
        }
    }
}
