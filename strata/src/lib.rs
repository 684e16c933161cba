#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! A library for merging layered build-configuration documents.
//!
//! A base document and an ordered list of environment overlays are combined
//! into one immutable effective configuration, which an external build tool
//! consumes as its operating parameters. Mappings deep-merge, scalars are
//! replaced by the later layer, and sequences concatenate by default or
//! union by an identity field where a [`MergePolicy`] says so.
//!
//! ## Core types
//!
//! - [`ConfigNode`] and [`NodeKind`]: the document value model
//! - [`ConfigMerger`] and [`EffectiveConfig`]: the merge itself
//! - [`MergePolicy`] and [`MergeRule`]: per-path merge behavior
//! - [`ConfigBuilder`]: front door assembling documents, files, and
//!   environment overlays into one merge
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use strata::{ConfigMerger, ConfigNode};
//!
//! let base: ConfigNode =
//!     serde_yaml::from_str("mode: development\noutput:\n  path: dist").unwrap();
//! let production: ConfigNode = serde_yaml::from_str("mode: production").unwrap();
//!
//! let effective = ConfigMerger::new().merge(&base, &[production]).unwrap();
//! assert_eq!(effective.get("mode"), Some(&ConfigNode::from("production")));
//! assert_eq!(effective.get("output.path"), Some(&ConfigNode::from("dist")));
//! ```

pub mod builder;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod loader;
pub mod logging;
pub mod merger;
pub mod node;
pub mod path;
pub mod policy;
pub mod validator;

// Re-export key types at crate root for convenience
pub use builder::ConfigBuilder;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use environment::EnvironmentOverrides;
pub use error::{DocumentRole, Error, Result};
pub use loader::{ConfigLoader, ConfigSource};
pub use logging::{init_logger, LogLevel, Logger};
pub use merger::{ConfigMerger, EffectiveConfig};
pub use node::{ConfigNode, NodeKind};
pub use path::{NodePath, PathSegment};
pub use policy::{MergePolicy, MergeRule};
pub use validator::DocumentValidator;
