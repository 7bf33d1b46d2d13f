mod discover;
mod generate;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use stackdash_lib::config::DashboardConfig;
use stackdash_lib::tree::ConstructTree;

pub use discover::cmd_discover;
pub use generate::cmd_generate;

/// Load the configuration file, or the defaults when none was given.
fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
  match path {
    Some(path) => {
      DashboardConfig::load(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
    None => {
      debug!("no config file given, using defaults");
      Ok(DashboardConfig::default())
    }
  }
}

fn load_tree(path: &Path) -> Result<ConstructTree> {
  ConstructTree::load(path).with_context(|| format!("Failed to load construct tree: {}", path.display()))
}
