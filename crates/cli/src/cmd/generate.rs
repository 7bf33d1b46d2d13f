//! Implementation of the `stackdash generate` command.
//!
//! Collects resources from the input tree, assembles the dashboard and
//! writes its rendered body to a JSON file.

use std::path::Path;

use anyhow::{Context, Result};

use stackdash_lib::dashboard::{JsonFileSink, StackDashboard};
use stackdash_lib::tree::walk;
use stackdash_lib::util::hash::Hashable;

use super::{load_config, load_tree};
use crate::output::{OutputFormat, plural, print_json, print_stat, print_success, print_warning, truncate_hash};

pub fn cmd_generate(
  input: &Path,
  config: Option<&Path>,
  out: &Path,
  name: Option<String>,
  format: OutputFormat,
) -> Result<()> {
  let mut config = load_config(config)?;
  if let Some(name) = name {
    config.dashboard_name = name;
  }
  let tree = load_tree(input)?;

  let mut dashboard = StackDashboard::from_config(&config, JsonFileSink::new(out));
  walk(&tree, &mut dashboard).with_context(|| format!("Failed to write dashboard: {}", out.display()))?;

  let assembly = dashboard.last_assembly().context("Dashboard was not published")?;
  let hash = assembly
    .dashboard
    .compute_hash()
    .context("Failed to compute dashboard hash")?;

  if format.is_json() {
    let skipped: Vec<_> = assembly
      .skipped
      .iter()
      .map(|skip| serde_json::json!({ "kind": skip.kind, "path": skip.path, "reason": skip.source.to_string() }))
      .collect();
    return print_json(&serde_json::json!({
      "name": assembly.dashboard.name,
      "path": out.display().to_string(),
      "widgets": assembly.dashboard.widgets.len(),
      "hash": hash.0,
      "skipped": skipped,
    }));
  }

  print_success(&format!(
    "Wrote dashboard '{}' to {}",
    assembly.dashboard.name,
    out.display()
  ));
  print_stat("Widgets", &assembly.dashboard.widgets.len().to_string());
  print_stat("Hash", truncate_hash(&hash.0));

  if !assembly.skipped.is_empty() {
    println!();
    print_warning(&format!("Skipped {}:", plural(assembly.skipped.len(), "resource")));
    for skip in &assembly.skipped {
      print_warning(&format!("  {}", skip));
    }
  }

  Ok(())
}
