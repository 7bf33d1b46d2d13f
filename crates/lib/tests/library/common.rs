//! Shared helpers for library integration tests.

use stackdash_lib::config::DashboardConfig;
use stackdash_lib::dashboard::{Dashboard, MemorySink, StackDashboard};
use stackdash_lib::tree::{ConstructNode, ConstructTree, walk};

pub fn named(id: &str, resource_type: &str, property: &str, name: &str) -> ConstructNode {
  ConstructNode::resource(id, resource_type).with_property(property, name)
}

pub fn function(id: &str, name: &str) -> ConstructNode {
  named(id, "AWS::Lambda::Function", "FunctionName", name)
}

pub fn table(id: &str, name: &str) -> ConstructNode {
  named(id, "AWS::DynamoDB::Table", "TableName", name)
}

pub fn topic(id: &str, name: &str) -> ConstructNode {
  named(id, "AWS::SNS::Topic", "TopicName", name)
}

pub fn queue(id: &str, name: &str) -> ConstructNode {
  named(id, "AWS::SQS::Queue", "QueueName", name)
}

pub fn tree(children: Vec<ConstructNode>) -> ConstructTree {
  let root = children
    .into_iter()
    .fold(ConstructNode::structural("Stack"), ConstructNode::with_child);
  ConstructTree::new(root).unwrap()
}

/// Walk `tree` through a fresh in-memory dashboard built from `config`.
pub fn generate(config: &DashboardConfig, tree: &ConstructTree) -> StackDashboard<MemorySink> {
  let mut dashboard = StackDashboard::from_config(config, MemorySink::new());
  walk(tree, &mut dashboard).unwrap();
  dashboard
}

pub fn published(dashboard: &StackDashboard<MemorySink>) -> &Dashboard {
  dashboard.sink().current().expect("dashboard was published")
}

pub fn titles(dashboard: &Dashboard) -> Vec<&str> {
  dashboard.widgets.iter().map(|w| w.title.as_str()).collect()
}
