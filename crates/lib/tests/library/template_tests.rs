//! Loading CloudFormation templates from disk.

use std::fs;

use serde_json::json;
use stackdash_lib::config::DashboardConfig;
use stackdash_lib::resource::ResourceKind;
use stackdash_lib::tree::{ConstructTree, TreeError};
use tempfile::TempDir;

use super::common::{generate, published};

fn write_template(temp: &TempDir, name: &str, template: serde_json::Value) -> std::path::PathBuf {
  let path = temp.path().join(name);
  fs::write(&path, serde_json::to_string_pretty(&template).unwrap()).unwrap();
  path
}

#[test]
fn template_root_is_named_after_file() {
  let temp = TempDir::new().unwrap();
  let path = write_template(
    &temp,
    "OrdersStack.template.json",
    json!({
      "Resources": {
        "Handler": { "Type": "AWS::Lambda::Function", "Properties": { "FunctionName": "proc-1" } }
      }
    }),
  );

  let tree = ConstructTree::load(&path).unwrap();
  assert_eq!(tree.root().id, "OrdersStack.template");

  let dashboard = generate(&DashboardConfig::default(), &tree);
  assert_eq!(
    dashboard.collector().collection().functions[0].path,
    "OrdersStack.template/Handler"
  );
}

#[test]
fn every_kind_is_discovered_from_a_template() {
  let temp = TempDir::new().unwrap();
  let path = write_template(
    &temp,
    "stack.json",
    json!({
      "Resources": {
        "Handler": { "Type": "AWS::Lambda::Function", "Properties": { "FunctionName": "proc-1" } },
        "Api": { "Type": "AWS::ApiGateway::RestApi", "Properties": { "Name": "orders" } },
        "GetOrders": {
          "Type": "AWS::ApiGateway::Method",
          "Properties": { "RestApiName": "orders", "HttpMethod": "GET" }
        },
        "Items": { "Type": "AWS::DynamoDB::Table", "Properties": { "TableName": "items" } },
        "Events": { "Type": "AWS::SNS::Topic", "Properties": { "TopicName": "events" } },
        "Jobs": { "Type": "AWS::SQS::Queue", "Properties": { "QueueName": "jobs" } },
        "Bucket": { "Type": "AWS::S3::Bucket" }
      }
    }),
  );

  let tree = ConstructTree::load(&path).unwrap();
  let dashboard = generate(&DashboardConfig::default(), &tree);
  let collection = dashboard.collector().collection();

  for kind in ResourceKind::CLASSIFICATION_ORDER {
    assert_eq!(collection.count(kind), 1, "{kind}");
  }
  // 4 table + 4 function + 4 queue + 4 api + 3 method + 3 topic
  assert_eq!(published(&dashboard).widgets.len(), 22);
}

#[test]
fn missing_type_is_rejected() {
  let temp = TempDir::new().unwrap();
  let path = write_template(&temp, "broken.json", json!({ "Resources": { "Thing": {} } }));

  assert!(matches!(ConstructTree::load(&path), Err(TreeError::InvalidTemplate(_))));
}

#[test]
fn missing_file_is_a_read_error() {
  let temp = TempDir::new().unwrap();
  let err = ConstructTree::load(&temp.path().join("absent.json")).unwrap_err();
  assert!(matches!(err, TreeError::Read { .. }));
}
