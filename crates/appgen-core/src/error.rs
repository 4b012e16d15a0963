//! Error types for appgen-core

use thiserror::Error;

use crate::naming::NameKind;

/// Result type alias using appgen-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Generation error types
#[derive(Error, Debug)]
pub enum Error {
    /// Required name argument was not supplied
    #[error("{} name is required", .kind.title())]
    MissingName { kind: NameKind },

    /// Derived name fails the naming convention
    #[error("Invalid {kind} name: {name}")]
    InvalidName { kind: NameKind, name: String },

    /// Templates directory does not exist
    #[error("Templates directory not found: {path}")]
    TemplatesNotFound { path: String },

    /// Template file cannot be used
    #[error("Invalid template {path}: {reason}")]
    InvalidTemplate { path: String, reason: String },

    /// Output directory exists and overwriting is disabled
    #[error("{} {name} already exists in {path}", .kind.title())]
    OutputExists {
        kind: NameKind,
        name: String,
        path: String,
    },

    /// Two templates render to the same target while overwriting is disabled
    #[error("Target file already exists: {path}")]
    TargetExists { path: String },

    /// Explicitly requested configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Template error from Tera
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing name error
    pub fn missing_name(kind: NameKind) -> Self {
        Self::MissingName { kind }
    }

    /// Create an invalid name error
    pub fn invalid_name(kind: NameKind, name: impl Into<String>) -> Self {
        Self::InvalidName {
            kind,
            name: name.into(),
        }
    }

    /// Create a templates not found error
    pub fn templates_not_found(path: impl Into<String>) -> Self {
        Self::TemplatesNotFound { path: path.into() }
    }

    /// Create an invalid template error
    pub fn invalid_template(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an output exists error
    pub fn output_exists(
        kind: NameKind,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::OutputExists {
            kind,
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a target exists error
    pub fn target_exists(path: impl Into<String>) -> Self {
        Self::TargetExists { path: path.into() }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::missing_name(NameKind::Component).to_string(),
            "Component name is required"
        );
        assert_eq!(
            Error::invalid_name(NameKind::Namespace, "apps-Bad").to_string(),
            "Invalid namespace name: apps-Bad"
        );
        assert_eq!(
            Error::output_exists(NameKind::Instance, "bar", "tenants/apps/instances/bar")
                .to_string(),
            "Instance bar already exists in tenants/apps/instances/bar"
        );
    }
}
