//! Message queue widgets.

use crate::consts::QUARTER_WIDTH;
use crate::metrics::Dimensions;
use crate::resource::{QueueResource, ResourceKind};

use super::{Extracted, MetricTemplate, ServiceLayout, ServiceMetricProvider, SharedFactory, WidgetSet, WidgetTemplate, skipped};

const LAYOUT: ServiceLayout = ServiceLayout {
  service: "SQS",
  namespace: "AWS/SQS",
  width: QUARTER_WIDTH,
  widgets: &[
    WidgetTemplate {
      label: "Messages Sent",
      metrics: &[MetricTemplate::sum("NumberOfMessagesSent")],
    },
    WidgetTemplate {
      label: "Messages Received",
      metrics: &[MetricTemplate::sum("NumberOfMessagesReceived")],
    },
    WidgetTemplate {
      label: "Visible Messages",
      metrics: &[MetricTemplate::maximum("ApproximateNumberOfMessagesVisible")],
    },
    WidgetTemplate {
      label: "Age of Oldest Message",
      metrics: &[MetricTemplate::maximum("ApproximateAgeOfOldestMessage")],
    },
  ],
};

pub struct SqsMetrics {
  factory: SharedFactory,
}

impl SqsMetrics {
  pub fn new(factory: SharedFactory) -> Self {
    Self { factory }
  }
}

impl ServiceMetricProvider for SqsMetrics {
  type Resource = QueueResource;

  fn kind(&self) -> ResourceKind {
    ResourceKind::Queue
  }

  fn extract(&self, resource: &QueueResource) -> Extracted {
    let name = resource
      .queue_name
      .resolve("QueueName", || self.kind().fallback_identity())
      .map_err(|e| skipped(self.kind(), &resource.path, e))?;
    Ok(Dimensions::from([("QueueName".to_string(), name)]))
  }

  fn build_widgets(&self, resources: &[QueueResource]) -> WidgetSet {
    let extracted = resources.iter().map(|r| self.extract(r)).collect();
    LAYOUT.assemble(&self.factory, extracted)
  }
}
