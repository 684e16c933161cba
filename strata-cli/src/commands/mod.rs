//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `merge`: merge a base document with environment overlays
//! - `show`: print one value from the effective configuration
//! - `validate`: validate a configuration document

pub mod merge;
pub mod show;
pub mod validate;

pub use merge::MergeCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
