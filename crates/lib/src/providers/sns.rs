//! Pub/sub topic widgets.

use crate::consts::THIRD_WIDTH;
use crate::metrics::Dimensions;
use crate::resource::{ResourceKind, TopicResource};

use super::{Extracted, MetricTemplate, ServiceLayout, ServiceMetricProvider, SharedFactory, WidgetSet, WidgetTemplate, skipped};

const LAYOUT: ServiceLayout = ServiceLayout {
  service: "SNS",
  namespace: "AWS/SNS",
  width: THIRD_WIDTH,
  widgets: &[
    WidgetTemplate {
      label: "Messages Published",
      metrics: &[MetricTemplate::sum("NumberOfMessagesPublished")],
    },
    WidgetTemplate {
      label: "Notifications Delivered",
      metrics: &[MetricTemplate::sum("NumberOfNotificationsDelivered")],
    },
    WidgetTemplate {
      label: "Notifications Failed",
      metrics: &[MetricTemplate::sum("NumberOfNotificationsFailed")],
    },
  ],
};

pub struct SnsMetrics {
  factory: SharedFactory,
}

impl SnsMetrics {
  pub fn new(factory: SharedFactory) -> Self {
    Self { factory }
  }
}

impl ServiceMetricProvider for SnsMetrics {
  type Resource = TopicResource;

  fn kind(&self) -> ResourceKind {
    ResourceKind::Topic
  }

  fn extract(&self, resource: &TopicResource) -> Extracted {
    let name = resource
      .topic_name
      .resolve("TopicName", || self.kind().fallback_identity())
      .map_err(|e| skipped(self.kind(), &resource.path, e))?;
    Ok(Dimensions::from([("TopicName".to_string(), name)]))
  }

  fn build_widgets(&self, resources: &[TopicResource]) -> WidgetSet {
    let extracted = resources.iter().map(|r| self.extract(r)).collect();
    LAYOUT.assemble(&self.factory, extracted)
  }
}
