//! Implementation of the `stackdash discover` command.
//!
//! Walks the input tree with a bare collector and reports what was found,
//! without building any widgets.

use std::path::Path;

use anyhow::Result;

use stackdash_lib::collector::ResourceCollector;
use stackdash_lib::resource::ResourceKind;
use stackdash_lib::tree::walk;

use super::{load_config, load_tree};
use crate::output::{OutputFormat, plural, print_info, print_json, print_stat, print_success, symbols};

pub fn cmd_discover(input: &Path, config: Option<&Path>, verbose: bool, format: OutputFormat) -> Result<()> {
  let config = load_config(config)?;
  let tree = load_tree(input)?;

  let mut collector = ResourceCollector::new(config.include.kinds(), config.scope.clone());
  let Ok(()) = walk(&tree, &mut collector);
  let collection = collector.into_collection();

  if format.is_json() {
    let counts: serde_json::Map<String, serde_json::Value> = ResourceKind::DASHBOARD_ORDER
      .into_iter()
      .map(|kind| (kind.as_str().to_string(), collection.count(kind).into()))
      .collect();
    return print_json(&serde_json::json!({
      "input": input.display().to_string(),
      "total": collection.total(),
      "counts": counts,
      "resources": collection,
    }));
  }

  if collection.is_empty() {
    print_info(&format!("No supported resources found in {}", input.display()));
    return Ok(());
  }

  print_success(&format!(
    "Discovered {} in {}",
    plural(collection.total(), "resource"),
    input.display()
  ));
  for kind in ResourceKind::DASHBOARD_ORDER {
    let count = collection.count(kind);
    if count == 0 {
      continue;
    }
    print_stat(kind.as_str(), &count.to_string());
    if verbose {
      for path in collection.paths(kind) {
        println!("    {} {}", symbols::INFO, path);
      }
    }
  }

  Ok(())
}
