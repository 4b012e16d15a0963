//! Generator configuration
//!
//! Prefixes, the overwrite policy and the repository layout are carried in a
//! [`GeneratorConfig`] value handed to each pipeline run. An optional
//! `appgen.yaml` in the repository root overrides the defaults.

mod loader;

pub use loader::{ConfigFile, GeneratorConfig, Layout};
