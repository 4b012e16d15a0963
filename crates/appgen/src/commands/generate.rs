//! `appgen component` and `appgen instance` command handlers

use anyhow::Result;
use appgen_core::{GenerationReport, Generator, GeneratorKind};

use super::{generator_config, GlobalOpts};
use crate::cli::GenerateArgs;
use crate::output;

/// Run one generator pipeline
pub fn run(kind: GeneratorKind, args: GenerateArgs, globals: GlobalOpts<'_>) -> Result<()> {
    let config = generator_config(globals, kind, &args)?;
    let generator = Generator::new(config);

    let report = generator.generate(kind, args.name.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &GenerationReport) {
    if let Some(namespace) = &report.namespace {
        output::kv("Namespace", namespace);
    }
    output::kv("Location", report.output_dir.as_str());

    if report.files.is_empty() {
        output::warning("Templates directory is empty; no files generated");
    }

    if report.dry_run {
        output::info("Dry run, files that would be written:");
        for file in &report.files {
            output::item(file.path.as_str());
        }
        return;
    }

    for file in &report.files {
        output::item(file.path.as_str());
    }

    if report.replaced_existing {
        output::info("Existing files were overwritten");
    }

    let message = match report.kind {
        GeneratorKind::Component => format!("Component {} created successfully", report.name),
        GeneratorKind::Instance => format!("App instance {} created successfully", report.name),
    };
    output::success(&message);
}
