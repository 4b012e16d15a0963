//! Configuration file loading and repository layout

use crate::error::{Error, Result};
use crate::generator::GeneratorKind;
use crate::naming::{DEFAULT_COMPONENT_PREFIX, DEFAULT_NAMESPACE_PREFIX};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use tracing::debug;

/// Configuration file names to search for in the repository root
const CONFIG_FILE_NAMES: &[&str] = &["appgen.yaml", "appgen.yml"];

/// Default tenants tree, relative to the repository root
const DEFAULT_TENANTS_DIR: &str = "tenants";

/// Default component templates, relative to the repository root
const DEFAULT_COMPONENT_TEMPLATES: &str = "utils/new-app-component/templates";

/// Default instance templates, relative to the repository root
const DEFAULT_INSTANCE_TEMPLATES: &str = "utils/new-app-instance/templates";

/// On-disk `appgen.yaml` structure. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub overwrite: Option<bool>,
    pub component_prefix: Option<String>,
    pub namespace_prefix: Option<String>,
    pub tenants_dir: Option<Utf8PathBuf>,
    pub component_templates: Option<Utf8PathBuf>,
    pub instance_templates: Option<Utf8PathBuf>,
}

impl ConfigFile {
    /// Parse a config file from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, `appgen.yaml`/`appgen.yml`
    /// in `root` is used when present; otherwise `None`.
    pub fn load(
        root: &Utf8Path,
        explicit: Option<&Utf8Path>,
    ) -> Result<Option<(Utf8PathBuf, Self)>> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(path.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            return Ok(Some((path.to_owned(), Self::from_yaml(&content)?)));
        }

        for name in CONFIG_FILE_NAMES {
            let path = root.join(name);
            if path.is_file() {
                let content = fs::read_to_string(&path)?;
                return Ok(Some((path, Self::from_yaml(&content)?)));
            }
        }

        Ok(None)
    }
}

/// Where templates are read from and generated output is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Repository root; relative entries below resolve against it
    pub root: Utf8PathBuf,
    pub tenants_dir: Utf8PathBuf,
    pub component_templates: Utf8PathBuf,
    pub instance_templates: Utf8PathBuf,
}

impl Layout {
    /// Default layout rooted at `root`
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            tenants_dir: Utf8PathBuf::from(DEFAULT_TENANTS_DIR),
            component_templates: Utf8PathBuf::from(DEFAULT_COMPONENT_TEMPLATES),
            instance_templates: Utf8PathBuf::from(DEFAULT_INSTANCE_TEMPLATES),
        }
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_owned()
        } else {
            self.root.join(path)
        }
    }

    /// Templates directory for a generator
    pub fn templates_dir(&self, kind: GeneratorKind) -> Utf8PathBuf {
        match kind {
            GeneratorKind::Component => self.resolve(&self.component_templates),
            GeneratorKind::Instance => self.resolve(&self.instance_templates),
        }
    }

    /// Override the templates directory for a generator
    pub fn set_templates_dir(&mut self, kind: GeneratorKind, dir: Utf8PathBuf) {
        match kind {
            GeneratorKind::Component => self.component_templates = dir,
            GeneratorKind::Instance => self.instance_templates = dir,
        }
    }

    /// `<tenants>/apps/components/<name>` or `<tenants>/apps/instances/<name>`
    pub fn output_dir(&self, kind: GeneratorKind, name: &str) -> Utf8PathBuf {
        self.resolve(&self.tenants_dir)
            .join("apps")
            .join(kind.collection())
            .join(name)
    }
}

/// Settings passed explicitly into each pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Replace an existing output directory's files instead of failing
    pub overwrite: bool,
    /// Run every step except directory creation and file writes
    pub dry_run: bool,
    pub component_prefix: String,
    pub namespace_prefix: String,
    pub layout: Layout,
}

impl GeneratorConfig {
    /// Defaults rooted at `root`
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            overwrite: true,
            dry_run: false,
            component_prefix: DEFAULT_COMPONENT_PREFIX.to_string(),
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            layout: Layout::new(root),
        }
    }

    /// Defaults overlaid with the config file found for `root`, if any
    pub fn load(root: impl Into<Utf8PathBuf>, explicit: Option<&Utf8Path>) -> Result<Self> {
        let mut config = Self::new(root);
        if let Some((path, file)) = ConfigFile::load(&config.layout.root, explicit)? {
            debug!("Loaded configuration from {}", path);
            config.apply(file);
        }
        Ok(config)
    }

    /// Overlay the keys set in a config file
    pub fn apply(&mut self, file: ConfigFile) {
        if let Some(overwrite) = file.overwrite {
            self.overwrite = overwrite;
        }
        if let Some(prefix) = file.component_prefix {
            self.component_prefix = prefix;
        }
        if let Some(prefix) = file.namespace_prefix {
            self.namespace_prefix = prefix;
        }
        if let Some(dir) = file.tenants_dir {
            self.layout.tenants_dir = dir;
        }
        if let Some(dir) = file.component_templates {
            self.layout.component_templates = dir;
        }
        if let Some(dir) = file.instance_templates {
            self.layout.instance_templates = dir;
        }
    }
}
