//! Dashboard assembly and publication.
//!
//! # Pipeline
//!
//! 1. A [`StackDashboard`] is driven by a traversal: each visit is handed to
//!    its [`ResourceCollector`].
//! 2. On the completion signal the collector freezes and the
//!    [`DashboardAssembler`] builds the full widget list: custom widgets
//!    first, then each enabled, non-empty kind in [`ResourceKind::DASHBOARD_ORDER`].
//! 3. The finished [`Dashboard`] is published to the sink in one call,
//!    replacing whatever the sink held before.
//!
//! Assembly always rebuilds from scratch; nothing is patched incrementally,
//! and the same collection always produces the same dashboard.

mod render;
mod sink;

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::aggregator::{ServiceMetricsAggregator, WidgetSource};
use crate::collector::{ResourceCollection, ResourceCollector, Visit};
use crate::config::DashboardConfig;
use crate::consts::{DEFAULT_DASHBOARD_NAME, DEFAULT_DASHBOARD_PERIOD};
use crate::metrics::WidgetDescriptor;
use crate::providers::{SkippedResource, WidgetSet};
use crate::resource::{KindSet, ResourceKind};
use crate::tree::{VisitedNode, Visitor};
use crate::util::hash::Hashable;

pub use render::{DashboardBody, RenderedWidget, WidgetProperties};
pub use sink::{DashboardSink, JsonFileSink, MemorySink, SinkError};

/// A complete dashboard as handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
  pub name: String,
  /// Dashboard-wide display window.
  #[serde(rename = "period_secs", with = "crate::util::duration::secs")]
  pub period: Duration,
  pub widgets: Vec<WidgetDescriptor>,
}

impl Hashable for Dashboard {}

/// The outcome of one assembly pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
  pub dashboard: Dashboard,
  /// Resources left out because their identity couldn't be resolved.
  pub skipped: Vec<SkippedResource>,
}

/// Turns a frozen collection into an ordered dashboard.
pub struct DashboardAssembler<W = ServiceMetricsAggregator> {
  source: W,
  enabled: KindSet,
  name: String,
  period: Duration,
  custom: Vec<WidgetDescriptor>,
}

impl Default for DashboardAssembler {
  fn default() -> Self {
    Self::new(ServiceMetricsAggregator::default())
  }
}

impl<W: WidgetSource> DashboardAssembler<W> {
  pub fn new(source: W) -> Self {
    Self {
      source,
      enabled: KindSet::all(),
      name: DEFAULT_DASHBOARD_NAME.to_string(),
      period: DEFAULT_DASHBOARD_PERIOD,
      custom: Vec::new(),
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_period(mut self, period: Duration) -> Self {
    self.period = period;
    self
  }

  /// Kinds whose widget source may be consulted.
  pub fn with_enabled(mut self, enabled: KindSet) -> Self {
    self.enabled = enabled;
    self
  }

  pub fn source(&self) -> &W {
    &self.source
  }

  /// Register caller-built widgets. They always precede discovered ones.
  pub fn add_widgets(&mut self, widgets: impl IntoIterator<Item = WidgetDescriptor>) {
    self.custom.extend(widgets);
  }

  /// Build the complete dashboard for `collection`.
  ///
  /// A kind's source is only consulted when the kind is enabled and at
  /// least one resource of that kind was collected.
  pub fn assemble(&self, collection: &ResourceCollection) -> Assembly {
    let mut widgets = self.custom.clone();
    let mut skipped = Vec::new();

    for kind in ResourceKind::DASHBOARD_ORDER {
      if !self.enabled.contains(kind) || collection.count(kind) == 0 {
        continue;
      }
      let set = self.widgets_for(kind, collection);
      widgets.extend(set.widgets);
      skipped.extend(set.skipped);
    }

    Assembly {
      dashboard: Dashboard {
        name: self.name.clone(),
        period: self.period,
        widgets,
      },
      skipped,
    }
  }

  fn widgets_for(&self, kind: ResourceKind, collection: &ResourceCollection) -> WidgetSet {
    match kind {
      ResourceKind::Table => self.source.table_widgets(&collection.tables),
      ResourceKind::Function => self.source.function_widgets(&collection.functions),
      ResourceKind::Queue => self.source.queue_widgets(&collection.queues),
      ResourceKind::HttpApi => self.source.http_api_widgets(&collection.http_apis),
      ResourceKind::HttpMethod => self.source.http_method_widgets(&collection.http_methods),
      ResourceKind::Topic => self.source.topic_widgets(&collection.topics),
    }
  }
}

/// A collector, an assembler and a sink wired together as a traversal visitor.
///
/// The dashboard is published once, when the traversal signals completion.
/// [`StackDashboard::regenerate`] republishes on demand afterwards, e.g. once
/// more custom widgets have been added.
pub struct StackDashboard<S, W = ServiceMetricsAggregator> {
  collector: ResourceCollector,
  assembler: DashboardAssembler<W>,
  sink: S,
  last: Option<Assembly>,
}

impl<S: DashboardSink> StackDashboard<S> {
  /// Wire up a dashboard from configuration.
  pub fn from_config(config: &DashboardConfig, sink: S) -> Self {
    let enabled = config.include.kinds();
    let aggregator =
      ServiceMetricsAggregator::new(config.descriptor_factory()).with_concurrent_executions(config.concurrent_executions);
    let assembler = DashboardAssembler::new(aggregator)
      .with_name(config.dashboard_name.clone())
      .with_period(config.period)
      .with_enabled(enabled);
    Self::new(ResourceCollector::new(enabled, config.scope.clone()), assembler, sink)
  }
}

impl<S: DashboardSink, W: WidgetSource> StackDashboard<S, W> {
  pub fn new(collector: ResourceCollector, assembler: DashboardAssembler<W>, sink: S) -> Self {
    Self {
      collector,
      assembler,
      sink,
      last: None,
    }
  }

  pub fn collector(&self) -> &ResourceCollector {
    &self.collector
  }

  pub fn sink(&self) -> &S {
    &self.sink
  }

  /// The most recently published assembly, if any.
  pub fn last_assembly(&self) -> Option<&Assembly> {
    self.last.as_ref()
  }

  pub fn add_widgets(&mut self, widgets: impl IntoIterator<Item = WidgetDescriptor>) {
    self.assembler.add_widgets(widgets);
  }

  pub fn visit(&mut self, node: VisitedNode<'_>) -> Visit {
    self.collector.visit(node)
  }

  /// Freeze the collection and publish.
  ///
  /// Returns `Ok(true)` when this call published, `Ok(false)` if the
  /// dashboard had already been finalized.
  ///
  /// The collection is frozen even when the sink fails, so calling
  /// `finalize` again will not retry the publish. Use
  /// [`StackDashboard::regenerate`] to retry.
  pub fn finalize(&mut self) -> Result<bool, S::Error> {
    if !self.collector.finalize() {
      return Ok(false);
    }
    self.publish()?;
    Ok(true)
  }

  /// Rebuild and republish from the frozen collection.
  ///
  /// Returns `Ok(false)` without publishing while still collecting.
  pub fn regenerate(&mut self) -> Result<bool, S::Error> {
    if !self.collector.is_finalized() {
      return Ok(false);
    }
    self.publish()?;
    Ok(true)
  }

  fn publish(&mut self) -> Result<(), S::Error> {
    let assembly = self.assembler.assemble(self.collector.collection());
    self.sink.publish(&assembly.dashboard)?;
    info!(
      dashboard = %assembly.dashboard.name,
      widgets = assembly.dashboard.widgets.len(),
      skipped = assembly.skipped.len(),
      "published dashboard"
    );
    self.last = Some(assembly);
    Ok(())
  }
}

impl<S: DashboardSink, W: WidgetSource> Visitor for StackDashboard<S, W> {
  type Error = S::Error;

  fn visit(&mut self, node: VisitedNode<'_>) {
    StackDashboard::visit(self, node);
  }

  fn finalize(&mut self) -> Result<(), Self::Error> {
    StackDashboard::finalize(self).map(|_| ())
  }
}
