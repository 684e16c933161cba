//! Document and policy validation.
//!
//! Validation happens before merging: document roots must be mappings, keys
//! must be sane, and keyed-union rules must name a usable identity field.

use crate::error::{DocumentRole, Error, Result};
use crate::node::ConfigNode;
use crate::path::NodePath;
use crate::policy::{MergePolicy, MergeRule};

/// Validates configuration documents and merge policies.
///
/// # Examples
///
/// ```
/// use strata::{ConfigNode, DocumentRole, DocumentValidator};
///
/// let doc: ConfigNode = serde_yaml::from_str("mode: production").unwrap();
/// DocumentValidator::validate_document(&doc, DocumentRole::Base).unwrap();
/// ```
pub struct DocumentValidator;

impl DocumentValidator {
    /// Check that a document's root is a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonMappingRoot`] otherwise.
    pub fn validate_root(document: &ConfigNode, role: DocumentRole) -> Result<()> {
        if document.is_mapping() {
            Ok(())
        } else {
            Err(Error::NonMappingRoot {
                role,
                kind: document.kind(),
            })
        }
    }

    /// Validate a whole document: mapping root plus key hygiene everywhere.
    ///
    /// Keys must be non-empty after trimming and free of null bytes.
    ///
    /// # Errors
    ///
    /// Returns `NonMappingRoot` for a bad root, or a validation error naming
    /// the offending path.
    pub fn validate_document(document: &ConfigNode, role: DocumentRole) -> Result<()> {
        Self::validate_root(document, role)?;
        Self::validate_keys(&NodePath::root(), document)
    }

    /// Validate a merge policy's per-path rules.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty rule path or an empty
    /// keyed-union identity key.
    pub fn validate_policy(policy: &MergePolicy) -> Result<()> {
        for (path, rule) in policy.rules() {
            if path.trim().is_empty() {
                return Err(Error::Validation {
                    field: "policy".to_string(),
                    message: "rule path cannot be empty".to_string(),
                });
            }
            if let MergeRule::KeyedUnion { key } = rule {
                if key.trim().is_empty() {
                    return Err(Error::Validation {
                        field: path.to_string(),
                        message: "keyed-union identity key cannot be empty".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_keys(path: &NodePath, node: &ConfigNode) -> Result<()> {
        match node {
            ConfigNode::Mapping(entries) => {
                for (key, child) in entries {
                    if key.trim().is_empty() {
                        return Err(Error::Validation {
                            field: path.to_string(),
                            message: "mapping key cannot be empty or only whitespace".to_string(),
                        });
                    }
                    if key.contains('\0') {
                        return Err(Error::Validation {
                            field: path.to_string(),
                            message: "mapping key cannot contain null bytes".to_string(),
                        });
                    }
                    Self::validate_keys(&path.child_key(key), child)?;
                }
                Ok(())
            }
            ConfigNode::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    Self::validate_keys(&path.child_index(index), item)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn yaml(s: &str) -> ConfigNode {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_mapping_root_passes() {
        let doc = yaml("mode: production");
        assert!(DocumentValidator::validate_root(&doc, DocumentRole::Base).is_ok());
    }

    #[test]
    fn test_sequence_root_fails() {
        let doc = yaml("- a\n- b");
        let err = DocumentValidator::validate_root(&doc, DocumentRole::Base).unwrap_err();
        assert!(err.is_non_mapping_root());
    }

    #[test]
    fn test_scalar_root_fails_with_role() {
        let doc = yaml("42");
        let err = DocumentValidator::validate_root(&doc, DocumentRole::Overlay(0)).unwrap_err();
        assert!(format!("{err}").contains("overlay 0"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut inner = BTreeMap::new();
        inner.insert("  ".to_string(), ConfigNode::from(1));
        let mut root = BTreeMap::new();
        root.insert("output".to_string(), ConfigNode::Mapping(inner));
        let doc = ConfigNode::Mapping(root);

        let err = DocumentValidator::validate_document(&doc, DocumentRole::Base).unwrap_err();
        assert!(err.is_validation());
        assert!(format!("{err}").contains("output"));
    }

    #[test]
    fn test_null_byte_key_rejected() {
        let mut root = BTreeMap::new();
        root.insert("bad\0key".to_string(), ConfigNode::from(1));
        let doc = ConfigNode::Mapping(root);

        let err = DocumentValidator::validate_document(&doc, DocumentRole::Base).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_keys_inside_sequences_checked() {
        let mut entry = BTreeMap::new();
        entry.insert(String::new(), ConfigNode::from("x"));
        let mut root = BTreeMap::new();
        root.insert(
            "rules".to_string(),
            ConfigNode::Sequence(vec![ConfigNode::Mapping(entry)]),
        );
        let doc = ConfigNode::Mapping(root);

        let err = DocumentValidator::validate_document(&doc, DocumentRole::Base).unwrap_err();
        assert!(format!("{err}").contains("rules[0]"));
    }

    #[test]
    fn test_valid_nested_document_passes() {
        let doc = yaml("module:\n  rules:\n    - test: css\n      use: [style-loader]");
        assert!(DocumentValidator::validate_document(&doc, DocumentRole::Base).is_ok());
    }

    #[test]
    fn test_policy_with_empty_union_key_fails() {
        let policy = MergePolicy::new().with_keyed_union("module.rules", "");
        let err = DocumentValidator::validate_policy(&policy).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_policy_with_empty_path_fails() {
        let policy = MergePolicy::new().with_rule("", MergeRule::Replace);
        assert!(DocumentValidator::validate_policy(&policy).is_err());
    }

    #[test]
    fn test_valid_policy_passes() {
        let policy = MergePolicy::new()
            .with_keyed_union("module.rules", "test")
            .with_rule("plugins", MergeRule::Replace);
        assert!(DocumentValidator::validate_policy(&policy).is_ok());
    }
}
