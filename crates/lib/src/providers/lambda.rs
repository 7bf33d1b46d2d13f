//! Compute function widgets.

use crate::consts::{GRID_COLUMNS, QUARTER_WIDTH};
use crate::metrics::{Dimensions, MetricSpec, Statistic, WidgetDescriptor, WidgetSpec};
use crate::resource::{FunctionResource, ResourceKind};

use super::{
  Extracted, MetricTemplate, ServiceLayout, ServiceMetricProvider, SharedFactory, WidgetSet, WidgetTemplate, skipped,
};

const NAMESPACE: &str = "AWS/Lambda";

const LAYOUT: ServiceLayout = ServiceLayout {
  service: "Lambda",
  namespace: NAMESPACE,
  width: QUARTER_WIDTH,
  widgets: &[
    WidgetTemplate {
      label: "Invocations",
      metrics: &[MetricTemplate::sum("Invocations")],
    },
    WidgetTemplate {
      label: "Duration",
      metrics: &[MetricTemplate::new("Duration")],
    },
    WidgetTemplate {
      label: "Errors",
      metrics: &[MetricTemplate::sum("Errors")],
    },
    WidgetTemplate {
      label: "Throttles",
      metrics: &[MetricTemplate::sum("Throttles")],
    },
  ],
};

pub struct LambdaMetrics {
  factory: SharedFactory,
  concurrent_executions: bool,
}

impl LambdaMetrics {
  pub fn new(factory: SharedFactory) -> Self {
    Self {
      factory,
      concurrent_executions: false,
    }
  }

  /// Also emit the account-wide concurrency widget after the per-function ones.
  pub fn with_concurrent_executions(mut self, enabled: bool) -> Self {
    self.concurrent_executions = enabled;
    self
  }

  fn concurrency_widget(&self) -> WidgetDescriptor {
    let metric = self
      .factory
      .metrics
      .build(MetricSpec::new(NAMESPACE, "ConcurrentExecutions").with_statistic(Statistic::Maximum));
    self
      .factory
      .widgets
      .build(WidgetSpec::new(LAYOUT.title("Concurrent Executions"), vec![metric]).with_width(GRID_COLUMNS))
  }
}

impl ServiceMetricProvider for LambdaMetrics {
  type Resource = FunctionResource;

  fn kind(&self) -> ResourceKind {
    ResourceKind::Function
  }

  fn extract(&self, resource: &FunctionResource) -> Extracted {
    let name = resource
      .function_name
      .resolve("FunctionName", || self.kind().fallback_identity())
      .map_err(|e| skipped(self.kind(), &resource.path, e))?;
    Ok(Dimensions::from([("FunctionName".to_string(), name)]))
  }

  fn build_widgets(&self, resources: &[FunctionResource]) -> WidgetSet {
    let extracted = resources.iter().map(|r| self.extract(r)).collect();
    let mut set = LAYOUT.assemble(&self.factory, extracted);
    if self.concurrent_executions && !resources.is_empty() {
      set.widgets.push(self.concurrency_widget());
    }
    set
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::resource::Identity;
  use crate::util::testutil::{factory, function};

  #[test]
  fn empty_input_builds_nothing() {
    let provider = LambdaMetrics::new(factory()).with_concurrent_executions(true);
    assert!(provider.create_widgets(&[]).is_empty());
  }

  #[test]
  fn four_widgets_in_fixed_order() {
    let widgets = LambdaMetrics::new(factory()).create_widgets(&[function("proc-1")]);

    let titles: Vec<_> = widgets.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(
      titles,
      vec![
        "Lambda - Invocations",
        "Lambda - Duration",
        "Lambda - Errors",
        "Lambda - Throttles"
      ]
    );
    assert!(widgets.iter().all(|w| w.width == 6));
  }

  #[test]
  fn groups_one_series_per_function() {
    let widgets = LambdaMetrics::new(factory()).create_widgets(&[function("proc-1"), function("proc-2")]);
    let invocations = &widgets[0];

    assert_eq!(invocations.metrics.len(), 2);
    assert_eq!(invocations.metrics[0].dimensions["FunctionName"], "proc-1");
    assert_eq!(invocations.metrics[1].dimensions["FunctionName"], "proc-2");
    assert!(invocations.metrics.iter().all(|m| m.namespace == "AWS/Lambda"));
    assert!(invocations.metrics.iter().all(|m| m.metric_name == "Invocations"));
  }

  #[test]
  fn count_metrics_are_summed() {
    let widgets = LambdaMetrics::new(factory()).create_widgets(&[function("proc-1")]);
    assert_eq!(widgets[0].metrics[0].statistic, Statistic::Sum);
    assert_eq!(widgets[1].metrics[0].statistic, Statistic::Average);
  }

  #[test]
  fn unnamed_function_uses_fallback() {
    let unnamed = FunctionResource {
      path: "Stack/Fn".to_string(),
      function_name: Identity::Unnamed,
    };
    let widgets = LambdaMetrics::new(factory()).create_widgets(&[unnamed]);
    assert_eq!(widgets[0].metrics[0].dimensions["FunctionName"], "unknown-function");
  }

  #[test]
  fn unresolvable_function_is_skipped() {
    let broken = FunctionResource {
      path: "Stack/Broken".to_string(),
      function_name: Identity::Unresolvable("unresolved intrinsic 'Ref'".to_string()),
    };
    let provider = LambdaMetrics::new(factory());
    let set = provider.build_widgets(&[function("proc-1"), broken, function("proc-3")]);

    assert_eq!(set.widgets.len(), 4);
    assert!(set.widgets.iter().all(|w| w.metrics.len() == 2));
    assert_eq!(set.skipped.len(), 1);
    assert_eq!(set.skipped[0].kind, ResourceKind::Function);
  }

  #[test]
  fn concurrency_widget_is_namespace_level() {
    let widgets = LambdaMetrics::new(factory())
      .with_concurrent_executions(true)
      .create_widgets(&[function("proc-1"), function("proc-2")]);

    assert_eq!(widgets.len(), 5);
    let concurrency = &widgets[4];
    assert_eq!(concurrency.title, "Lambda - Concurrent Executions");
    assert_eq!(concurrency.width, 24);
    assert_eq!(concurrency.metrics.len(), 1);
    assert!(concurrency.metrics[0].dimensions.is_empty());
    assert_eq!(concurrency.metrics[0].statistic, Statistic::Maximum);
  }
}
