//! # appgen-core
//!
//! Core library for the appgen CLI providing:
//! - Kubernetes namespace name validation and name derivation
//! - Repository layout and `appgen.yaml` configuration
//! - Tera template set loading and rendering
//! - The component and instance generation pipelines
//!
//! # Example
//!
//! ```no_run
//! use appgen_core::{GeneratorConfig, Generator, GeneratorKind};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::load("/path/to/repo", None)?;
//! let report = Generator::new(config).generate(GeneratorKind::Component, Some("foo"))?;
//! assert_eq!(report.name, "app-foo");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod naming;
pub mod templates;

pub use config::{GeneratorConfig, Layout};
pub use error::{Error, Result};
pub use generator::{GeneratedFile, GenerationReport, Generator, GeneratorKind, Target};
pub use naming::{validate, NameKind};
