//! Dashboard sinks.
//!
//! A sink receives the complete widget list of each assembly pass and
//! replaces whatever it held before. Sinks are write-only from the
//! assembler's point of view.

use std::convert::Infallible;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::Dashboard;
use super::render::DashboardBody;

/// Receives published dashboards.
pub trait DashboardSink {
  type Error;

  /// Replace the sink's state with `dashboard`.
  fn publish(&mut self, dashboard: &Dashboard) -> Result<(), Self::Error>;
}

/// Errors that can occur while writing a dashboard body to disk.
#[derive(Debug, Error)]
pub enum SinkError {
  #[error("failed to serialize dashboard body: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Holds the most recently published dashboard in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
  current: Option<Dashboard>,
  publish_count: usize,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn current(&self) -> Option<&Dashboard> {
    self.current.as_ref()
  }

  pub fn publish_count(&self) -> usize {
    self.publish_count
  }
}

impl DashboardSink for MemorySink {
  type Error = Infallible;

  fn publish(&mut self, dashboard: &Dashboard) -> Result<(), Self::Error> {
    self.current = Some(dashboard.clone());
    self.publish_count += 1;
    Ok(())
  }
}

/// Writes the rendered dashboard body as pretty-printed JSON.
///
/// The file is replaced atomically (write to a temp file in the same
/// directory, then rename) and left untouched when its content would not
/// change.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
  path: PathBuf,
}

impl JsonFileSink {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  fn write_err(&self, source: std::io::Error) -> SinkError {
    SinkError::Write {
      path: self.path.clone(),
      source,
    }
  }
}

impl DashboardSink for JsonFileSink {
  type Error = SinkError;

  fn publish(&mut self, dashboard: &Dashboard) -> Result<(), Self::Error> {
    let body = DashboardBody::render(dashboard);
    let mut content = serde_json::to_string_pretty(&body)?;
    content.push('\n');

    if fs::read_to_string(&self.path).is_ok_and(|existing| existing == content) {
      debug!(path = ?self.path, "dashboard body unchanged, skipping write");
      return Ok(());
    }

    let dir = match self.path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| self.write_err(e))?;

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.write_err(e))?;
    temp.write_all(content.as_bytes()).map_err(|e| self.write_err(e))?;
    temp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

    info!(path = ?self.path, widgets = dashboard.widgets.len(), "wrote dashboard body");
    Ok(())
  }
}
