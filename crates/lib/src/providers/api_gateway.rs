//! HTTP gateway widgets, per API and per method.

use crate::consts::{QUARTER_WIDTH, THIRD_WIDTH};
use crate::metrics::Dimensions;
use crate::resource::{HttpApiResource, HttpMethodResource, ResourceKind};

use super::{Extracted, MetricTemplate, ServiceLayout, ServiceMetricProvider, SharedFactory, WidgetSet, WidgetTemplate, skipped};

const NAMESPACE: &str = "AWS/ApiGateway";

const API_LAYOUT: ServiceLayout = ServiceLayout {
  service: "API Gateway",
  namespace: NAMESPACE,
  width: QUARTER_WIDTH,
  widgets: &[
    WidgetTemplate {
      label: "Request Count",
      metrics: &[MetricTemplate::sum("Count")],
    },
    WidgetTemplate {
      label: "Latency",
      metrics: &[MetricTemplate::new("Latency")],
    },
    WidgetTemplate {
      label: "4XX Errors",
      metrics: &[MetricTemplate::sum("4XXError")],
    },
    WidgetTemplate {
      label: "5XX Errors",
      metrics: &[MetricTemplate::sum("5XXError")],
    },
  ],
};

// Client and server errors share one widget.
const METHOD_LAYOUT: ServiceLayout = ServiceLayout {
  service: "API Gateway Method",
  namespace: NAMESPACE,
  width: THIRD_WIDTH,
  widgets: &[
    WidgetTemplate {
      label: "Request Count",
      metrics: &[MetricTemplate::sum("Count")],
    },
    WidgetTemplate {
      label: "Latency",
      metrics: &[MetricTemplate::new("Latency")],
    },
    WidgetTemplate {
      label: "Error Rate",
      metrics: &[MetricTemplate::sum("4XXError"), MetricTemplate::sum("5XXError")],
    },
  ],
};

pub struct ApiGatewayMetrics {
  factory: SharedFactory,
}

impl ApiGatewayMetrics {
  pub fn new(factory: SharedFactory) -> Self {
    Self { factory }
  }
}

impl ServiceMetricProvider for ApiGatewayMetrics {
  type Resource = HttpApiResource;

  fn kind(&self) -> ResourceKind {
    ResourceKind::HttpApi
  }

  fn extract(&self, resource: &HttpApiResource) -> Extracted {
    let name = resource
      .api_name
      .resolve("ApiName", || self.kind().fallback_identity())
      .map_err(|e| skipped(self.kind(), &resource.path, e))?;
    Ok(Dimensions::from([("ApiName".to_string(), name)]))
  }

  fn build_widgets(&self, resources: &[HttpApiResource]) -> WidgetSet {
    let extracted = resources.iter().map(|r| self.extract(r)).collect();
    API_LAYOUT.assemble(&self.factory, extracted)
  }
}

pub struct ApiMethodMetrics {
  factory: SharedFactory,
}

impl ApiMethodMetrics {
  pub fn new(factory: SharedFactory) -> Self {
    Self { factory }
  }
}

impl ServiceMetricProvider for ApiMethodMetrics {
  type Resource = HttpMethodResource;

  fn kind(&self) -> ResourceKind {
    ResourceKind::HttpMethod
  }

  fn extract(&self, resource: &HttpMethodResource) -> Extracted {
    let fault = |e| skipped(self.kind(), &resource.path, e);
    let api = resource
      .api_name
      .resolve("ApiName", || ResourceKind::HttpApi.fallback_identity())
      .map_err(fault)?;
    let method = resource
      .method
      .resolve("Method", || self.kind().fallback_identity())
      .map_err(fault)?;
    Ok(Dimensions::from([
      ("ApiName".to_string(), api),
      ("Method".to_string(), method),
    ]))
  }

  fn build_widgets(&self, resources: &[HttpMethodResource]) -> WidgetSet {
    let extracted = resources.iter().map(|r| self.extract(r)).collect();
    METHOD_LAYOUT.assemble(&self.factory, extracted)
  }
}
