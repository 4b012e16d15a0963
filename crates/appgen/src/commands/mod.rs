//! CLI command implementations

pub mod check;
pub mod generate;

use anyhow::{Context, Result};
use appgen_core::{GeneratorConfig, GeneratorKind};
use camino::{Utf8Path, Utf8PathBuf};

use crate::cli::GenerateArgs;

/// Options shared by every command
#[derive(Debug, Clone, Copy)]
pub struct GlobalOpts<'a> {
    pub root: Option<&'a Utf8Path>,
    pub config: Option<&'a Utf8Path>,
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Utf8PathBuf::try_from(cwd).context("Current directory path is not valid UTF-8")
}

/// Resolve the repository root, defaulting to the current directory
fn resolve_root(root: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    match root {
        Some(root) => Ok(root.to_owned()),
        None => current_dir(),
    }
}

/// Paths given on the command line are relative to the shell, not to `--root`
fn resolve_cli_path(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.is_absolute() {
        Ok(path.to_owned())
    } else {
        Ok(current_dir()?.join(path))
    }
}

/// Load configuration for `root`/`--config`
pub fn load_config(globals: GlobalOpts<'_>) -> Result<GeneratorConfig> {
    let root = resolve_root(globals.root)?;
    let config = GeneratorConfig::load(root, globals.config)?;
    tracing::debug!("Using repository root {}", config.layout.root);
    Ok(config)
}

/// Load configuration and apply a generate command's overrides
pub fn generator_config(
    globals: GlobalOpts<'_>,
    kind: GeneratorKind,
    args: &GenerateArgs,
) -> Result<GeneratorConfig> {
    let mut config = load_config(globals)?;
    if let Some(overwrite) = args.overwrite_override() {
        config.overwrite = overwrite;
    }
    if let Some(dir) = &args.templates {
        config.layout.set_templates_dir(kind, resolve_cli_path(dir)?);
    }
    config.dry_run = args.dry_run;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_overrides_applied() {
        let cli = Cli::try_parse_from([
            "appgen",
            "component",
            "foo",
            "--root",
            "/nonexistent/repo",
            "--no-overwrite",
            "--dry-run",
            "--templates",
            "/tpl",
        ])
        .unwrap();
        let Commands::Component(args) = &cli.command else {
            panic!("expected component command");
        };
        let globals = GlobalOpts {
            root: cli.root.as_deref(),
            config: None,
        };

        let config = generator_config(globals, GeneratorKind::Component, args).unwrap();
        assert!(!config.overwrite);
        assert!(config.dry_run);
        assert_eq!(
            config.layout.templates_dir(GeneratorKind::Component),
            Utf8PathBuf::from("/tpl")
        );
        assert_eq!(
            config.layout.templates_dir(GeneratorKind::Instance),
            Utf8PathBuf::from("/nonexistent/repo/utils/new-app-instance/templates")
        );
    }

    #[test]
    fn test_relative_templates_resolve_against_cwd() {
        let cli = Cli::try_parse_from([
            "appgen",
            "instance",
            "bar",
            "--root",
            "/nonexistent/repo",
            "-t",
            "tpl",
        ])
        .unwrap();
        let Commands::Instance(args) = &cli.command else {
            panic!("expected instance command");
        };
        let globals = GlobalOpts {
            root: cli.root.as_deref(),
            config: None,
        };

        let config = generator_config(globals, GeneratorKind::Instance, args).unwrap();
        assert_eq!(
            config.layout.templates_dir(GeneratorKind::Instance),
            current_dir().unwrap().join("tpl")
        );
    }
}
