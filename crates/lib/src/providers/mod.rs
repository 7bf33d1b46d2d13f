//! Per-kind widget providers.
//!
//! Each provider maps an ordered list of resources of its kind to a fixed,
//! ordered set of widgets. Providers are stateless apart from the shared
//! [`DescriptorFactory`] and every call is a pure function of its input.
//!
//! # Grouping
//!
//! A provider describes its widgets as a static table of [`WidgetTemplate`]s.
//! For each template, the metrics of every resource are gathered into that
//! single widget, so a widget plots one series per resource. Templates with
//! more than one metric (for example read and write capacity) plot all
//! resources' first metric, then all resources' second metric.
//!
//! # Failure isolation
//!
//! Identity extraction yields one `Result` per resource. A resource whose
//! identity can't be resolved is left out of every widget and reported in
//! [`WidgetSet::skipped`]; the remaining resources are unaffected.

mod api_gateway;
mod dynamodb;
mod lambda;
mod sns;
mod sqs;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::metrics::{DescriptorFactory, Dimensions, MetricDescriptor, MetricSpec, Statistic, WidgetDescriptor, WidgetSpec};
use crate::resource::{IdentityError, ResourceKind};

pub use api_gateway::{ApiGatewayMetrics, ApiMethodMetrics};
pub use dynamodb::DynamoDbMetrics;
pub use lambda::LambdaMetrics;
pub use sns::SnsMetrics;
pub use sqs::SqsMetrics;

/// A resource left out of its provider's widgets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipped {kind} at {path}: {source}")]
pub struct SkippedResource {
  pub kind: ResourceKind,
  pub path: String,
  #[source]
  pub source: IdentityError,
}

/// Per-resource outcome of identity extraction.
pub type Extracted = Result<Dimensions, SkippedResource>;

/// Widgets built for one kind, plus the resources that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetSet {
  pub widgets: Vec<WidgetDescriptor>,
  pub skipped: Vec<SkippedResource>,
}

/// Maps resources of one kind to that kind's widgets.
pub trait ServiceMetricProvider {
  type Resource;

  /// The kind this provider builds widgets for.
  fn kind(&self) -> ResourceKind;

  /// Resolve the dimensions one resource's metrics are scoped by.
  fn extract(&self, resource: &Self::Resource) -> Extracted;

  /// Build widgets, reporting skipped resources alongside.
  fn build_widgets(&self, resources: &[Self::Resource]) -> WidgetSet;

  /// Build widgets. Empty input yields no widgets.
  fn create_widgets(&self, resources: &[Self::Resource]) -> Vec<WidgetDescriptor> {
    self.build_widgets(resources).widgets
  }
}

/// One metric plotted for each resource in a widget.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MetricTemplate {
  pub name: &'static str,
  pub statistic: Option<Statistic>,
  /// Dimensions added to the resource's own, e.g. `Operation=Query`.
  pub extra_dimensions: &'static [(&'static str, &'static str)],
}

impl MetricTemplate {
  pub const fn new(name: &'static str) -> Self {
    Self {
      name,
      statistic: None,
      extra_dimensions: &[],
    }
  }

  pub const fn sum(name: &'static str) -> Self {
    Self {
      statistic: Some(Statistic::Sum),
      ..Self::new(name)
    }
  }

  pub const fn maximum(name: &'static str) -> Self {
    Self {
      statistic: Some(Statistic::Maximum),
      ..Self::new(name)
    }
  }

  pub const fn with_dimensions(self, extra_dimensions: &'static [(&'static str, &'static str)]) -> Self {
    Self {
      extra_dimensions,
      ..self
    }
  }
}

/// One widget in a provider's fixed layout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WidgetTemplate {
  pub label: &'static str,
  pub metrics: &'static [MetricTemplate],
}

/// A provider's fixed widget layout within its service namespace.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ServiceLayout {
  pub service: &'static str,
  pub namespace: &'static str,
  pub width: u32,
  pub widgets: &'static [WidgetTemplate],
}

impl ServiceLayout {
  pub fn title(&self, label: &str) -> String {
    format!("{} - {}", self.service, label)
  }

  fn metric(&self, factory: &DescriptorFactory, template: &MetricTemplate, dimensions: &Dimensions) -> MetricDescriptor {
    let mut spec = MetricSpec::new(self.namespace, template.name).with_dimensions(dimensions);
    for (key, value) in template.extra_dimensions {
      spec = spec.with_dimension(key, value);
    }
    if let Some(statistic) = template.statistic {
      spec = spec.with_statistic(statistic);
    }
    factory.metrics.build(spec)
  }

  /// Assemble this layout's widgets from per-resource extraction results.
  pub fn assemble(&self, factory: &DescriptorFactory, extracted: Vec<Extracted>) -> WidgetSet {
    if extracted.is_empty() {
      return WidgetSet::default();
    }

    let mut valid = Vec::with_capacity(extracted.len());
    let mut skipped = Vec::new();
    for item in extracted {
      match item {
        Ok(dimensions) => valid.push(dimensions),
        Err(skip) => {
          warn!(kind = %skip.kind, path = %skip.path, reason = %skip.source, "skipping resource");
          skipped.push(skip);
        }
      }
    }

    let widgets = self
      .widgets
      .iter()
      .map(|template| {
        let metrics = template
          .metrics
          .iter()
          .flat_map(|metric| valid.iter().map(move |dimensions| (metric, dimensions)))
          .map(|(metric, dimensions)| self.metric(factory, metric, dimensions))
          .collect();
        factory
          .widgets
          .build(WidgetSpec::new(self.title(template.label), metrics).with_width(self.width))
      })
      .collect();

    WidgetSet { widgets, skipped }
  }
}

/// Shorthand for the shared factory handle every provider holds.
pub type SharedFactory = Arc<DescriptorFactory>;

pub(crate) fn skipped(kind: ResourceKind, path: &str, source: IdentityError) -> SkippedResource {
  SkippedResource {
    kind,
    path: path.to_string(),
    source,
  }
}

#[cfg(test)]
mod tests {
  use tracing_test::traced_test;

  use super::*;

  const LAYOUT: ServiceLayout = ServiceLayout {
    service: "Test",
    namespace: "Test/NS",
    width: 8,
    widgets: &[
      WidgetTemplate {
        label: "Single",
        metrics: &[MetricTemplate::sum("A")],
      },
      WidgetTemplate {
        label: "Pair",
        metrics: &[
          MetricTemplate::new("B").with_dimensions(&[("Op", "Read")]),
          MetricTemplate::new("B").with_dimensions(&[("Op", "Write")]),
        ],
      },
    ],
  };

  fn dims(name: &str) -> Extracted {
    Ok(Dimensions::from([("Name".to_string(), name.to_string())]))
  }

  fn fault(path: &str) -> Extracted {
    Err(skipped(
      ResourceKind::Function,
      path,
      IdentityError {
        field: "Name",
        detail: "number".to_string(),
      },
    ))
  }

  #[test]
  fn empty_input_builds_nothing() {
    let set = LAYOUT.assemble(&DescriptorFactory::default(), vec![]);
    assert!(set.widgets.is_empty());
    assert!(set.skipped.is_empty());
  }

  #[test]
  fn one_widget_per_template() {
    let set = LAYOUT.assemble(&DescriptorFactory::default(), vec![dims("a"), dims("b")]);

    let titles: Vec<_> = set.widgets.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, vec!["Test - Single", "Test - Pair"]);
    assert!(set.widgets.iter().all(|w| w.width == 8));
  }

  #[test]
  fn paired_metrics_are_concatenated_by_template() {
    let set = LAYOUT.assemble(&DescriptorFactory::default(), vec![dims("a"), dims("b")]);
    let pair = &set.widgets[1];

    let series: Vec<_> = pair
      .metrics
      .iter()
      .map(|m| (m.dimensions["Op"].as_str(), m.dimensions["Name"].as_str()))
      .collect();
    assert_eq!(series, vec![("Read", "a"), ("Read", "b"), ("Write", "a"), ("Write", "b")]);
  }

  #[test]
  fn template_statistic_overrides_default() {
    let set = LAYOUT.assemble(&DescriptorFactory::default(), vec![dims("a")]);
    assert_eq!(set.widgets[0].metrics[0].statistic, Statistic::Sum);
    assert_eq!(set.widgets[1].metrics[0].statistic, Statistic::Average);
  }

  #[test]
  #[traced_test]
  fn faults_are_isolated() {
    let set = LAYOUT.assemble(
      &DescriptorFactory::default(),
      vec![dims("a"), fault("Stack/Bad"), dims("c")],
    );

    assert_eq!(set.widgets[0].metrics.len(), 2);
    assert_eq!(set.skipped.len(), 1);
    assert_eq!(set.skipped[0].path, "Stack/Bad");
    assert!(logs_contain("skipping resource"));
  }

  #[test]
  fn all_faulty_still_emits_empty_widgets() {
    let set = LAYOUT.assemble(&DescriptorFactory::default(), vec![fault("Stack/Bad")]);
    assert_eq!(set.widgets.len(), 2);
    assert!(set.widgets.iter().all(|w| w.metrics.is_empty()));
  }
}
