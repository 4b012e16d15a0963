//! CLI argument parsing with clap

use appgen_core::GeneratorKind;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// appgen - Scaffold app components and app instances for tenants
#[derive(Parser, Debug)]
#[command(name = "appgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Repository root holding the templates and the tenants tree
    /// [default: current directory]
    #[arg(long, global = true)]
    pub root: Option<Utf8PathBuf>,

    /// Path to appgen.yaml config file [default: <root>/appgen.yaml]
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate tenants/apps/components/app-<NAME> from the component templates
    Component(GenerateArgs),

    /// Generate tenants/apps/instances/<NAME> from the instance templates
    Instance(GenerateArgs),

    /// Validate a name and show the derived names without writing anything
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Name to generate (prefix is added when missing)
    pub name: Option<String>,

    /// Replace files in an existing output directory
    #[arg(long, conflicts_with = "no_overwrite")]
    pub overwrite: bool,

    /// Fail if the output directory already exists
    #[arg(long)]
    pub no_overwrite: bool,

    /// Show what would be generated without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Output the generation report as JSON
    #[arg(long)]
    pub json: bool,

    /// Templates directory to use instead of the configured one
    #[arg(short, long)]
    pub templates: Option<Utf8PathBuf>,
}

impl GenerateArgs {
    /// Overwrite policy requested on the command line, if any
    pub fn overwrite_override(&self) -> Option<bool> {
        match (self.overwrite, self.no_overwrite) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Which generator's naming rules to apply
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Name to check
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Component,
    Instance,
}

impl From<KindArg> for GeneratorKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Component => GeneratorKind::Component,
            KindArg::Instance => GeneratorKind::Instance,
        }
    }
}
