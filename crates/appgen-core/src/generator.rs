//! Component and instance generation pipelines
//!
//! Both pipelines run the same ordered steps: derive the name, validate it,
//! load the template set, resolve the output directory, check for an
//! existing directory, render, then write. Every failure before the write
//! step leaves the filesystem untouched.

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::naming::{ComponentName, InstanceNames, NameKind};
use crate::templates::{RenderedFile, TemplateContext, TemplateSet};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{debug, info};

/// Which generator to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Component,
    Instance,
}

impl GeneratorKind {
    /// Directory under `<tenants>/apps` holding this kind of output
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Component => "components",
            Self::Instance => "instances",
        }
    }

    pub fn name_kind(&self) -> NameKind {
        match self {
            Self::Component => NameKind::Component,
            Self::Instance => NameKind::Instance,
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name_kind().fmt(f)
    }
}

/// Validated names for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Component(ComponentName),
    Instance(InstanceNames),
}

impl Target {
    /// Derive and validate the target from the raw argument
    pub fn derive(
        kind: GeneratorKind,
        arg: Option<&str>,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        let arg = arg.ok_or_else(|| Error::missing_name(kind.name_kind()))?;
        match kind {
            GeneratorKind::Component => Ok(Self::Component(ComponentName::derive(
                arg,
                &config.component_prefix,
            )?)),
            GeneratorKind::Instance => Ok(Self::Instance(InstanceNames::derive(
                arg,
                &config.namespace_prefix,
            )?)),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Component(_) => GeneratorKind::Component,
            Self::Instance(_) => GeneratorKind::Instance,
        }
    }

    /// Name used for the output directory
    pub fn name(&self) -> &str {
        match self {
            Self::Component(name) => name.as_str(),
            Self::Instance(names) => &names.instance,
        }
    }

    /// Namespace name, for instances
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Component(_) => None,
            Self::Instance(names) => Some(&names.namespace),
        }
    }

    pub fn context(&self) -> TemplateContext {
        match self {
            Self::Component(name) => TemplateContext::component(name),
            Self::Instance(names) => TemplateContext::instance(names),
        }
    }
}

/// A file emitted (or planned, in a dry run) by a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub template: String,
    pub path: Utf8PathBuf,
    pub bytes: usize,
}

/// Outcome of a generator run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub kind: GeneratorKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub output_dir: Utf8PathBuf,
    /// Output directory already existed before the run
    pub replaced_existing: bool,
    pub dry_run: bool,
    pub files: Vec<GeneratedFile>,
}

/// Runs the generation pipelines against one configuration
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Derive and validate the names for `arg` without touching the filesystem
    pub fn target(&self, kind: GeneratorKind, arg: Option<&str>) -> Result<Target> {
        Target::derive(kind, arg, &self.config)
    }

    /// Run a pipeline from the raw command-line argument
    pub fn generate(&self, kind: GeneratorKind, arg: Option<&str>) -> Result<GenerationReport> {
        let target = self.target(kind, arg)?;
        self.generate_target(&target)
    }

    /// Run a pipeline for already validated names
    pub fn generate_target(&self, target: &Target) -> Result<GenerationReport> {
        let kind = target.kind();
        let layout = &self.config.layout;

        let templates_dir = layout.templates_dir(kind);
        let templates = TemplateSet::load(&templates_dir)?;
        debug!(
            "Loaded {} template(s) from {}: {:?}",
            templates.len(),
            templates.dir(),
            templates.names()
        );

        let output_dir = layout.output_dir(kind, target.name());
        let replaced_existing = output_dir.exists();
        if replaced_existing && !self.config.overwrite {
            return Err(Error::output_exists(
                kind.name_kind(),
                target.name(),
                output_dir.as_str(),
            ));
        }

        // Template errors must surface before anything is written
        let rendered = templates.render_all(&target.context())?;

        if self.config.dry_run {
            info!(
                "Dry run: would write {} file(s) to {}",
                rendered.len(),
                output_dir
            );
        } else {
            fs::create_dir_all(&output_dir)?;
        }

        let mut files = Vec::with_capacity(rendered.len());
        for file in rendered {
            let path = output_dir.join(&file.target);
            if !self.config.dry_run {
                write_rendered(&path, &file, self.config.overwrite)?;
            }
            files.push(GeneratedFile {
                template: file.template,
                path,
                bytes: file.content.len(),
            });
        }

        debug!("Generated {} {} in {}", kind, target.name(), output_dir);

        Ok(GenerationReport {
            kind,
            name: target.name().to_string(),
            namespace: target.namespace().map(str::to_string),
            output_dir,
            replaced_existing,
            dry_run: self.config.dry_run,
            files,
        })
    }
}

/// Replace (when allowed) and write one rendered file as a new file
fn write_rendered(path: &Utf8Path, file: &RenderedFile, overwrite: bool) -> Result<()> {
    // symlink_metadata so dangling links are replaced too
    if overwrite && fs::symlink_metadata(path).is_ok_and(|m| !m.is_dir()) {
        debug!("Removing existing {}", path);
        fs::remove_file(path)?;
    }

    let mut out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                Error::target_exists(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
    out.write_all(file.content.as_bytes())?;
    debug!("Wrote {} from {}", path, file.template);
    Ok(())
}
