//! `appgen check` command handler

use anyhow::Result;
use appgen_core::{Generator, GeneratorKind};
use serde_json::json;

use super::{load_config, GlobalOpts};
use crate::cli::CheckArgs;
use crate::output;

/// Validate a name and print the names a generator would derive from it
pub fn run(args: CheckArgs, globals: GlobalOpts<'_>) -> Result<()> {
    let kind = GeneratorKind::from(args.kind);
    let generator = Generator::new(load_config(globals)?);
    let target = generator.target(kind, args.name.as_deref())?;
    let output_dir = generator.config().layout.output_dir(kind, target.name());

    if args.json {
        let value = json!({
            "kind": kind,
            "name": target.name(),
            "namespace": target.namespace(),
            "output_dir": output_dir,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::success(&format!("Valid {} name: {}", kind, target.name()));
    if let Some(namespace) = target.namespace() {
        output::kv("Namespace", namespace);
    }
    output::kv("Location", output_dir.as_str());
    Ok(())
}
