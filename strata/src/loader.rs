//! Configuration document discovery and loading.
//!
//! This module turns files on disk into [`ConfigNode`] documents and
//! discovers environment stacks: a `base` document plus per-environment
//! overlay documents, each optionally shadowed by a `.local` variant.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::node::ConfigNode;

/// File extensions recognized for each stack layer, in probe order.
const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// A loaded document with its origin and precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use strata::{ConfigNode, ConfigSource};
/// use std::path::PathBuf;
///
/// let source = ConfigSource {
///     path: PathBuf::from("build/base.yaml"),
///     precedence: 1,
///     document: serde_yaml::from_str("mode: development").unwrap(),
/// };
/// assert!(source.document.is_mapping());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSource {
    /// Path the document was loaded from.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// The parsed document.
    pub document: ConfigNode,
}

/// Loads configuration documents from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use strata::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_stack(Path::new("build"), "production").unwrap();
/// println!("found {} layers", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a single document.
    ///
    /// The format is chosen by extension: `.json` parses as JSON, anything
    /// else as YAML (YAML is a superset of JSON, so this is a safe default).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<ConfigNode> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("failed to read configuration file: {e}"),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&contents).map_err(|e| Error::Validation {
                field: path.display().to_string(),
                message: format!("invalid JSON: {e}"),
            })
        } else {
            serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
                field: path.display().to_string(),
                message: format!("invalid YAML: {e}"),
            })
        }
    }

    /// Parse a YAML document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid YAML.
    pub fn load_str(contents: &str) -> Result<ConfigNode> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Discover and load an environment stack from a directory.
    ///
    /// Layers, in precedence order:
    /// 1. `base.{yaml,yml,json}` (required)
    /// 2. `{environment}.{yaml,yml,json}`
    /// 3. `{environment}.local.{yaml,yml,json}` (machine-private overrides)
    ///
    /// Overlay layers are optional; a directory with only a base document
    /// yields a single source.
    ///
    /// # Errors
    ///
    /// Returns an error if no base document exists in `dir`, or if any
    /// discovered file cannot be read or parsed.
    pub fn load_stack(dir: &Path, environment: &str) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        match Self::load_layer(dir, "base", 1)? {
            Some(base) => sources.push(base),
            None => {
                return Err(Error::InvalidPath {
                    path: dir.to_path_buf(),
                    reason: "no base document (base.yaml, base.yml, or base.json)".to_string(),
                })
            }
        }

        if let Some(overlay) = Self::load_layer(dir, environment, 2)? {
            sources.push(overlay);
        }

        let local_stem = format!("{environment}.local");
        if let Some(local) = Self::load_layer(dir, &local_stem, 3)? {
            sources.push(local);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Load one stack layer by stem, probing known extensions.
    fn load_layer(dir: &Path, stem: &str, precedence: u8) -> Result<Option<ConfigSource>> {
        for extension in EXTENSIONS {
            let path = dir.join(format!("{stem}.{extension}"));
            if path.exists() {
                let document = Self::load_file(&path)?;
                return Ok(Some(ConfigSource {
                    path,
                    precedence,
                    document,
                }));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/base.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "mode: [unbalanced").unwrap();

        let result = ConfigLoader::load_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_valid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("base.yaml");
        fs::write(&path, "mode: development\n").unwrap();

        let document = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(document.get("mode"), Some(&ConfigNode::from("development")));
    }

    #[test]
    fn test_load_json_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("base.json");
        fs::write(&path, r#"{"mode": "production"}"#).unwrap();

        let document = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(document.get("mode"), Some(&ConfigNode::from("production")));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_load_str() {
        let document = ConfigLoader::load_str("port: 8090").unwrap();
        assert_eq!(document.get("port"), Some(&ConfigNode::from(8090)));
        assert!(ConfigLoader::load_str("{unbalanced").is_err());
    }

    #[test]
    fn test_stack_requires_base() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("development.yaml"), "mode: dev\n").unwrap();

        let result = ConfigLoader::load_stack(temp_dir.path(), "development");
        assert!(result.is_err());
    }

    #[test]
    fn test_stack_base_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("base.yaml"), "entry: src/main.js\n").unwrap();

        let sources = ConfigLoader::load_stack(temp_dir.path(), "development").unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].precedence, 1);
    }

    #[test]
    fn test_stack_full_layering() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("base.yaml"), "mode: none\n").unwrap();
        fs::write(temp_dir.path().join("production.yaml"), "mode: production\n").unwrap();
        fs::write(
            temp_dir.path().join("production.local.yaml"),
            "devtool: source-map\n",
        )
        .unwrap();

        let sources = ConfigLoader::load_stack(temp_dir.path(), "production").unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[1].precedence, 2);
        assert_eq!(sources[2].precedence, 3);
        assert_eq!(
            sources[1].document.get("mode"),
            Some(&ConfigNode::from("production"))
        );
    }

    #[test]
    fn test_stack_ignores_other_environments() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("base.yaml"), "mode: none\n").unwrap();
        fs::write(temp_dir.path().join("development.yaml"), "mode: dev\n").unwrap();
        fs::write(temp_dir.path().join("production.yaml"), "mode: prod\n").unwrap();

        let sources = ConfigLoader::load_stack(temp_dir.path(), "development").unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(
            sources[1].document.get("mode"),
            Some(&ConfigNode::from("dev"))
        );
    }

    #[test]
    fn test_stack_probes_extensions_in_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("base.yml"), "from: yml\n").unwrap();
        fs::write(temp_dir.path().join("base.json"), r#"{"from": "json"}"#).unwrap();

        let sources = ConfigLoader::load_stack(temp_dir.path(), "development").unwrap();
        // .yml beats .json in probe order.
        assert_eq!(
            sources[0].document.get("from"),
            Some(&ConfigNode::from("yml"))
        );
    }

    #[test]
    fn test_stack_propagates_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("base.yaml"), "mode: none\n").unwrap();
        fs::write(temp_dir.path().join("development.yaml"), "{bad yaml").unwrap();

        assert!(ConfigLoader::load_stack(temp_dir.path(), "development").is_err());
    }
}
