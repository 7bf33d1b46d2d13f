//! Dashboard configuration.
//!
//! Configuration is read from TOML. Every field is optional:
//!
//! ```toml
//! dashboard_name = "orders-service"
//! scope = "OrdersStack/Api"
//! period = "3h"
//! metric_period = "5m"
//! statistic = "Average"
//! concurrent_executions = false
//!
//! [include]
//! lambda = true
//! api_gateway = true
//! api_methods = true
//! dynamodb = true
//! sns = false
//! sqs = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_DASHBOARD_NAME, DEFAULT_DASHBOARD_PERIOD, DEFAULT_METRIC_PERIOD};
use crate::metrics::{DescriptorFactory, MetricFactory, Statistic, WidgetFactory};
use crate::resource::{KindSet, ResourceKind};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("invalid config: {0}")]
  Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
  pub dashboard_name: String,
  /// Construct path; only nodes at or under it are collected.
  pub scope: Option<String>,
  /// Display window for every widget.
  #[serde(with = "crate::util::duration::human")]
  pub period: Duration,
  /// Statistic window for every metric.
  #[serde(with = "crate::util::duration::human")]
  pub metric_period: Duration,
  pub statistic: Statistic,
  pub concurrent_executions: bool,
  pub include: IncludeKinds,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      dashboard_name: DEFAULT_DASHBOARD_NAME.to_string(),
      scope: None,
      period: DEFAULT_DASHBOARD_PERIOD,
      metric_period: DEFAULT_METRIC_PERIOD,
      statistic: Statistic::default(),
      concurrent_executions: false,
      include: IncludeKinds::default(),
    }
  }
}

impl DashboardConfig {
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(content)?)
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    Self::from_toml_str(&content)
  }

  /// The factory pair every provider will share.
  pub fn descriptor_factory(&self) -> DescriptorFactory {
    DescriptorFactory::new(
      MetricFactory::new(self.statistic, self.metric_period),
      WidgetFactory::new(self.period),
    )
  }
}

/// Per-kind inclusion flags. A disabled kind is neither classified nor
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncludeKinds {
  pub lambda: bool,
  pub api_gateway: bool,
  pub api_methods: bool,
  pub dynamodb: bool,
  pub sns: bool,
  pub sqs: bool,
}

impl Default for IncludeKinds {
  fn default() -> Self {
    Self {
      lambda: true,
      api_gateway: true,
      api_methods: true,
      dynamodb: true,
      sns: true,
      sqs: true,
    }
  }
}

impl IncludeKinds {
  pub fn kinds(&self) -> KindSet {
    [
      (ResourceKind::Function, self.lambda),
      (ResourceKind::HttpApi, self.api_gateway),
      (ResourceKind::HttpMethod, self.api_methods),
      (ResourceKind::Table, self.dynamodb),
      (ResourceKind::Topic, self.sns),
      (ResourceKind::Queue, self.sqs),
    ]
    .into_iter()
    .filter(|(_, included)| *included)
    .fold(KindSet::empty(), |set, (kind, _)| set.with(kind))
  }
}
