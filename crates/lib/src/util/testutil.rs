//! Test utilities for stackdash-lib.
//!
//! Builders for resources and construct nodes so provider and collector
//! tests can stay focused on the behaviour under test.

use std::sync::Arc;

use crate::metrics::DescriptorFactory;
use crate::providers::SharedFactory;
use crate::resource::{
  FunctionResource, HttpApiResource, HttpMethodResource, Identity, QueueResource, TableResource, TopicResource,
};
use crate::tree::ConstructNode;

/// A factory with all defaults.
pub fn factory() -> SharedFactory {
  Arc::new(DescriptorFactory::default())
}

pub fn function(name: &str) -> FunctionResource {
  FunctionResource {
    path: format!("Stack/{}", name),
    function_name: Identity::from(name),
  }
}

pub fn api(name: &str) -> HttpApiResource {
  HttpApiResource {
    path: format!("Stack/{}", name),
    api_name: Identity::from(name),
  }
}

pub fn method(api: &str, verb: &str) -> HttpMethodResource {
  HttpMethodResource {
    path: format!("Stack/{}/{}", api, verb),
    api_name: Identity::from(api),
    method: Identity::from(verb),
  }
}

pub fn table(name: &str) -> TableResource {
  TableResource {
    path: format!("Stack/{}", name),
    table_name: Identity::from(name),
  }
}

pub fn topic(name: &str) -> TopicResource {
  TopicResource {
    path: format!("Stack/{}", name),
    topic_name: Identity::from(name),
  }
}

pub fn queue(name: &str) -> QueueResource {
  QueueResource {
    path: format!("Stack/{}", name),
    queue_name: Identity::from(name),
  }
}

/// A resource node whose identity property is `name`.
pub fn named_node(id: &str, resource_type: &str, property: &str, name: &str) -> ConstructNode {
  ConstructNode::resource(id, resource_type).with_property(property, name)
}

pub fn function_node(id: &str, name: &str) -> ConstructNode {
  named_node(id, "AWS::Lambda::Function", "FunctionName", name)
}

pub fn table_node(id: &str, name: &str) -> ConstructNode {
  named_node(id, "AWS::DynamoDB::Table", "TableName", name)
}

pub fn topic_node(id: &str, name: &str) -> ConstructNode {
  named_node(id, "AWS::SNS::Topic", "TopicName", name)
}

pub fn queue_node(id: &str, name: &str) -> ConstructNode {
  named_node(id, "AWS::SQS::Queue", "QueueName", name)
}
