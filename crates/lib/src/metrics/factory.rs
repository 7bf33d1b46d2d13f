//! Descriptor factories.
//!
//! Two distinct periods are in play here and they are configured separately:
//! the per-metric statistic window held by [`MetricFactory`] (five minutes by
//! default) and the per-widget display window held by [`WidgetFactory`]
//! (the dashboard-wide period, three hours by default).

use std::time::Duration;

use crate::consts::{DEFAULT_DASHBOARD_PERIOD, DEFAULT_METRIC_PERIOD, DEFAULT_WIDGET_HEIGHT, DEFAULT_WIDGET_WIDTH};

use super::types::{Dimensions, MetricDescriptor, Statistic, WidgetDescriptor};

/// Request for one metric descriptor. Unset fields take factory defaults.
#[derive(Debug, Clone)]
pub struct MetricSpec {
  pub namespace: String,
  pub metric_name: String,
  pub dimensions: Dimensions,
  pub statistic: Option<Statistic>,
  pub period: Option<Duration>,
}

impl MetricSpec {
  pub fn new(namespace: &str, metric_name: &str) -> Self {
    Self {
      namespace: namespace.to_string(),
      metric_name: metric_name.to_string(),
      dimensions: Dimensions::new(),
      statistic: None,
      period: None,
    }
  }

  pub fn with_dimension(mut self, key: &str, value: &str) -> Self {
    self.dimensions.insert(key.to_string(), value.to_string());
    self
  }

  pub fn with_dimensions(mut self, dimensions: &Dimensions) -> Self {
    self
      .dimensions
      .extend(dimensions.iter().map(|(k, v)| (k.clone(), v.clone())));
    self
  }

  pub fn with_statistic(mut self, statistic: Statistic) -> Self {
    self.statistic = Some(statistic);
    self
  }

  pub fn with_period(mut self, period: Duration) -> Self {
    self.period = Some(period);
    self
  }
}

/// Builds metric descriptors with defaulted statistic and period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFactory {
  statistic: Statistic,
  period: Duration,
}

impl Default for MetricFactory {
  fn default() -> Self {
    Self {
      statistic: Statistic::default(),
      period: DEFAULT_METRIC_PERIOD,
    }
  }
}

impl MetricFactory {
  pub fn new(statistic: Statistic, period: Duration) -> Self {
    Self { statistic, period }
  }

  /// Build one descriptor. Never fails; dimension values pass through as-is.
  pub fn build(&self, spec: MetricSpec) -> MetricDescriptor {
    MetricDescriptor {
      namespace: spec.namespace,
      metric_name: spec.metric_name,
      dimensions: spec.dimensions,
      statistic: spec.statistic.unwrap_or(self.statistic),
      period: spec.period.unwrap_or(self.period),
    }
  }

  /// Build one descriptor per name, sharing namespace and dimensions.
  ///
  /// Descriptors come back in the order of `metric_names`.
  pub fn build_set(&self, namespace: &str, metric_names: &[&str], dimensions: &Dimensions) -> Vec<MetricDescriptor> {
    metric_names
      .iter()
      .map(|name| self.build(MetricSpec::new(namespace, name).with_dimensions(dimensions)))
      .collect()
  }
}

/// Request for one widget descriptor. Unset layout fields take factory defaults.
///
/// An empty metrics list is legal and yields an empty chart.
#[derive(Debug, Clone)]
pub struct WidgetSpec {
  pub title: String,
  pub metrics: Vec<MetricDescriptor>,
  pub width: Option<u32>,
  pub height: Option<u32>,
  pub period: Option<Duration>,
  pub live_refresh: Option<bool>,
}

impl WidgetSpec {
  pub fn new(title: impl Into<String>, metrics: Vec<MetricDescriptor>) -> Self {
    Self {
      title: title.into(),
      metrics,
      width: None,
      height: None,
      period: None,
      live_refresh: None,
    }
  }

  pub fn with_width(mut self, width: u32) -> Self {
    self.width = Some(width);
    self
  }

  pub fn with_height(mut self, height: u32) -> Self {
    self.height = Some(height);
    self
  }

  pub fn with_period(mut self, period: Duration) -> Self {
    self.period = Some(period);
    self
  }

  pub fn with_live_refresh(mut self, live_refresh: bool) -> Self {
    self.live_refresh = Some(live_refresh);
    self
  }
}

/// Builds widget descriptors, defaulting the display period to the
/// dashboard-wide period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetFactory {
  period: Duration,
}

impl Default for WidgetFactory {
  fn default() -> Self {
    Self {
      period: DEFAULT_DASHBOARD_PERIOD,
    }
  }
}

impl WidgetFactory {
  pub fn new(period: Duration) -> Self {
    Self { period }
  }

  pub fn period(&self) -> Duration {
    self.period
  }

  pub fn build(&self, spec: WidgetSpec) -> WidgetDescriptor {
    WidgetDescriptor {
      title: spec.title,
      metrics: spec.metrics,
      width: spec.width.unwrap_or(DEFAULT_WIDGET_WIDTH),
      height: spec.height.unwrap_or(DEFAULT_WIDGET_HEIGHT),
      period: spec.period.unwrap_or(self.period),
      live_refresh: spec.live_refresh.unwrap_or(true),
    }
  }
}

/// The pair of factories every provider shares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorFactory {
  pub metrics: MetricFactory,
  pub widgets: WidgetFactory,
}

impl DescriptorFactory {
  pub fn new(metrics: MetricFactory, widgets: WidgetFactory) -> Self {
    Self { metrics, widgets }
  }
}
