//! Name validation and derivation
//!
//! Component and instance names end up as Kubernetes namespace names and as
//! path segments under the tenants tree, so both pipelines share a single
//! DNS-label check.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// Maximum length of a DNS label / Kubernetes namespace name
pub const MAX_NAME_LEN: usize = 63;

/// Default prefix prepended to component names
pub const DEFAULT_COMPONENT_PREFIX: &str = "app-";

/// Default prefix that turns an instance name into its namespace name
pub const DEFAULT_NAMESPACE_PREFIX: &str = "apps-";

static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("namespace regex is valid")
});

/// Which name an error or report refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameKind {
    Component,
    Instance,
    Namespace,
}

impl NameKind {
    /// Capitalised form for the start of a sentence
    pub fn title(&self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Instance => "Instance",
            Self::Namespace => "Namespace",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Component => "component",
            Self::Instance => "instance",
            Self::Namespace => "namespace",
        };
        f.write_str(s)
    }
}

/// Check whether `name` is a valid Kubernetes namespace name
pub fn validate(name: &str) -> bool {
    (1..=MAX_NAME_LEN).contains(&name.len()) && NAMESPACE_RE.is_match(name)
}

/// Like [`validate`], but reports the failure as an [`Error::InvalidName`]
pub fn ensure_valid(kind: NameKind, name: &str) -> Result<()> {
    if validate(name) {
        Ok(())
    } else {
        Err(Error::invalid_name(kind, name))
    }
}

/// Prepend `prefix` unless the argument already carries it
pub fn prefixed_component_name(arg: &str, prefix: &str) -> String {
    if arg.starts_with(prefix) {
        arg.to_string()
    } else {
        format!("{prefix}{arg}")
    }
}

/// Split an argument into `(instance, namespace)`.
///
/// Accepts either the bare instance name or the prefixed namespace name and
/// yields the same pair for both.
pub fn split_instance_name(arg: &str, prefix: &str) -> (String, String) {
    match arg.strip_prefix(prefix) {
        Some(instance) => (instance.to_string(), arg.to_string()),
        None => (arg.to_string(), format!("{prefix}{arg}")),
    }
}

/// A validated component name, always carrying the component prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentName(String);

impl ComponentName {
    /// Derive and validate a component name from a raw argument
    pub fn derive(arg: &str, prefix: &str) -> Result<Self> {
        let name = prefixed_component_name(arg, prefix);
        ensure_valid(NameKind::Component, &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated instance name together with its namespace name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceNames {
    pub instance: String,
    pub namespace: String,
}

impl InstanceNames {
    /// Derive and validate the instance/namespace pair from a raw argument.
    ///
    /// The namespace name is checked first. The stripped instance name is
    /// checked as well, since it becomes a directory name on its own.
    pub fn derive(arg: &str, prefix: &str) -> Result<Self> {
        let (instance, namespace) = split_instance_name(arg, prefix);
        ensure_valid(NameKind::Namespace, &namespace)?;
        ensure_valid(NameKind::Instance, &instance)?;
        Ok(Self {
            instance,
            namespace,
        })
    }
}
