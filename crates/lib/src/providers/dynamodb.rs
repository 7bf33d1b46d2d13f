//! Key-value table widgets.
//!
//! Read and write capacity share a widget, as do read and write throttles,
//! so a table row has four widgets rather than six.

use crate::consts::QUARTER_WIDTH;
use crate::metrics::Dimensions;
use crate::resource::{ResourceKind, TableResource};

use super::{Extracted, MetricTemplate, ServiceLayout, ServiceMetricProvider, SharedFactory, WidgetSet, WidgetTemplate, skipped};

const LAYOUT: ServiceLayout = ServiceLayout {
  service: "DynamoDB",
  namespace: "AWS/DynamoDB",
  width: QUARTER_WIDTH,
  widgets: &[
    WidgetTemplate {
      label: "Capacity Units",
      metrics: &[
        MetricTemplate::sum("ConsumedReadCapacityUnits"),
        MetricTemplate::sum("ConsumedWriteCapacityUnits"),
      ],
    },
    WidgetTemplate {
      label: "Throttle Events",
      metrics: &[MetricTemplate::sum("ReadThrottleEvents"), MetricTemplate::sum("WriteThrottleEvents")],
    },
    WidgetTemplate {
      label: "Query Latency",
      metrics: &[MetricTemplate::new("SuccessfulRequestLatency").with_dimensions(&[("Operation", "Query")])],
    },
    WidgetTemplate {
      label: "Scan Latency",
      metrics: &[MetricTemplate::new("SuccessfulRequestLatency").with_dimensions(&[("Operation", "Scan")])],
    },
  ],
};

pub struct DynamoDbMetrics {
  factory: SharedFactory,
}

impl DynamoDbMetrics {
  pub fn new(factory: SharedFactory) -> Self {
    Self { factory }
  }
}

impl ServiceMetricProvider for DynamoDbMetrics {
  type Resource = TableResource;

  fn kind(&self) -> ResourceKind {
    ResourceKind::Table
  }

  fn extract(&self, resource: &TableResource) -> Extracted {
    let name = resource
      .table_name
      .resolve("TableName", || self.kind().fallback_identity())
      .map_err(|e| skipped(self.kind(), &resource.path, e))?;
    Ok(Dimensions::from([("TableName".to_string(), name)]))
  }

  fn build_widgets(&self, resources: &[TableResource]) -> WidgetSet {
    let extracted = resources.iter().map(|r| self.extract(r)).collect();
    LAYOUT.assemble(&self.factory, extracted)
  }
}
