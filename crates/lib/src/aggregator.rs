//! Fan-out to the per-kind providers.
//!
//! [`ServiceMetricsAggregator`] owns one provider per kind, all sharing one
//! [`DescriptorFactory`], and exposes one pass-through per kind through the
//! [`WidgetSource`] trait. Supporting a new kind means adding a provider and
//! a pass-through; nothing else changes.

use std::sync::Arc;

use crate::metrics::DescriptorFactory;
use crate::providers::{
  ApiGatewayMetrics, ApiMethodMetrics, DynamoDbMetrics, LambdaMetrics, ServiceMetricProvider, SnsMetrics, SqsMetrics,
  WidgetSet,
};
use crate::resource::{
  FunctionResource, HttpApiResource, HttpMethodResource, QueueResource, TableResource, TopicResource,
};

/// Builds widgets for each resource kind.
///
/// The assembler only depends on this trait, so hosts can substitute their
/// own widget sources.
pub trait WidgetSource {
  fn function_widgets(&self, resources: &[FunctionResource]) -> WidgetSet;
  fn http_api_widgets(&self, resources: &[HttpApiResource]) -> WidgetSet;
  fn http_method_widgets(&self, resources: &[HttpMethodResource]) -> WidgetSet;
  fn table_widgets(&self, resources: &[TableResource]) -> WidgetSet;
  fn topic_widgets(&self, resources: &[TopicResource]) -> WidgetSet;
  fn queue_widgets(&self, resources: &[QueueResource]) -> WidgetSet;
}

pub struct ServiceMetricsAggregator {
  lambda: LambdaMetrics,
  api_gateway: ApiGatewayMetrics,
  api_methods: ApiMethodMetrics,
  dynamodb: DynamoDbMetrics,
  sns: SnsMetrics,
  sqs: SqsMetrics,
}

impl ServiceMetricsAggregator {
  pub fn new(factory: DescriptorFactory) -> Self {
    let factory = Arc::new(factory);
    Self {
      lambda: LambdaMetrics::new(factory.clone()),
      api_gateway: ApiGatewayMetrics::new(factory.clone()),
      api_methods: ApiMethodMetrics::new(factory.clone()),
      dynamodb: DynamoDbMetrics::new(factory.clone()),
      sns: SnsMetrics::new(factory.clone()),
      sqs: SqsMetrics::new(factory),
    }
  }

  /// Emit the account-wide Lambda concurrency widget.
  pub fn with_concurrent_executions(mut self, enabled: bool) -> Self {
    self.lambda = self.lambda.with_concurrent_executions(enabled);
    self
  }
}

impl Default for ServiceMetricsAggregator {
  fn default() -> Self {
    Self::new(DescriptorFactory::default())
  }
}

impl WidgetSource for ServiceMetricsAggregator {
  fn function_widgets(&self, resources: &[FunctionResource]) -> WidgetSet {
    self.lambda.build_widgets(resources)
  }

  fn http_api_widgets(&self, resources: &[HttpApiResource]) -> WidgetSet {
    self.api_gateway.build_widgets(resources)
  }

  fn http_method_widgets(&self, resources: &[HttpMethodResource]) -> WidgetSet {
    self.api_methods.build_widgets(resources)
  }

  fn table_widgets(&self, resources: &[TableResource]) -> WidgetSet {
    self.dynamodb.build_widgets(resources)
  }

  fn topic_widgets(&self, resources: &[TopicResource]) -> WidgetSet {
    self.sns.build_widgets(resources)
  }

  fn queue_widgets(&self, resources: &[QueueResource]) -> WidgetSet {
    self.sqs.build_widgets(resources)
  }
}
