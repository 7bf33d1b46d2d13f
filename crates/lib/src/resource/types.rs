//! Resource kinds and the per-kind identity records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One of the supported infrastructure primitive categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
  Function,
  HttpApi,
  HttpMethod,
  Table,
  Topic,
  Queue,
}

impl ResourceKind {
  /// First-match order used when classifying a node.
  pub const CLASSIFICATION_ORDER: [ResourceKind; 6] = [
    ResourceKind::Function,
    ResourceKind::HttpApi,
    ResourceKind::HttpMethod,
    ResourceKind::Table,
    ResourceKind::Topic,
    ResourceKind::Queue,
  ];

  /// Order in which each kind's widgets appear on the published dashboard.
  pub const DASHBOARD_ORDER: [ResourceKind; 6] = [
    ResourceKind::Table,
    ResourceKind::Function,
    ResourceKind::Queue,
    ResourceKind::HttpApi,
    ResourceKind::HttpMethod,
    ResourceKind::Topic,
  ];

  /// The CloudFormation type name of nodes of this kind.
  pub fn cfn_type(self) -> &'static str {
    match self {
      ResourceKind::Function => "AWS::Lambda::Function",
      ResourceKind::HttpApi => "AWS::ApiGateway::RestApi",
      ResourceKind::HttpMethod => "AWS::ApiGateway::Method",
      ResourceKind::Table => "AWS::DynamoDB::Table",
      ResourceKind::Topic => "AWS::SNS::Topic",
      ResourceKind::Queue => "AWS::SQS::Queue",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      ResourceKind::Function => "function",
      ResourceKind::HttpApi => "api",
      ResourceKind::HttpMethod => "method",
      ResourceKind::Table => "table",
      ResourceKind::Topic => "topic",
      ResourceKind::Queue => "queue",
    }
  }

  /// Dimension value substituted for a resource that has no name.
  pub fn fallback_identity(self) -> String {
    format!("unknown-{}", self.as_str())
  }

  fn bit(self) -> u8 {
    1 << (self as u8)
  }
}

impl fmt::Display for ResourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A set of resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSet {
  bits: u8,
}

impl KindSet {
  pub fn empty() -> Self {
    Self { bits: 0 }
  }

  pub fn all() -> Self {
    ResourceKind::CLASSIFICATION_ORDER
      .into_iter()
      .fold(Self::empty(), |set, kind| set.with(kind))
  }

  pub fn with(mut self, kind: ResourceKind) -> Self {
    self.bits |= kind.bit();
    self
  }

  pub fn without(mut self, kind: ResourceKind) -> Self {
    self.bits &= !kind.bit();
    self
  }

  pub fn contains(&self, kind: ResourceKind) -> bool {
    self.bits & kind.bit() != 0
  }

  pub fn is_empty(&self) -> bool {
    self.bits == 0
  }
}

impl Default for KindSet {
  fn default() -> Self {
    Self::all()
  }
}

/// The physical name of a resource, as read from its properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Identity {
  /// A usable, non-empty name.
  Named(String),
  /// No name was declared; the platform generates one at deploy time.
  Unnamed,
  /// A value was declared but can't be used as a dimension value.
  Unresolvable(String),
}

impl Identity {
  pub fn from_property(value: Option<&Value>) -> Self {
    match value {
      None | Some(Value::Null) => Identity::Unnamed,
      Some(Value::String(s)) if s.is_empty() => Identity::Unresolvable("empty string".to_string()),
      Some(Value::String(s)) => Identity::Named(s.clone()),
      Some(Value::Object(map)) => match map.keys().next() {
        Some(key) if map.len() == 1 => Identity::Unresolvable(format!("unresolved intrinsic '{}'", key)),
        _ => Identity::Unresolvable("object".to_string()),
      },
      Some(Value::Array(_)) => Identity::Unresolvable("array".to_string()),
      Some(Value::Bool(_)) => Identity::Unresolvable("boolean".to_string()),
      Some(Value::Number(_)) => Identity::Unresolvable("number".to_string()),
    }
  }

  /// Resolve to a dimension value, substituting `fallback` when unnamed.
  pub fn resolve(&self, field: &'static str, fallback: impl FnOnce() -> String) -> Result<String, IdentityError> {
    match self {
      Identity::Named(name) => Ok(name.clone()),
      Identity::Unnamed => Ok(fallback()),
      Identity::Unresolvable(detail) => Err(IdentityError {
        field,
        detail: detail.clone(),
      }),
    }
  }
}

impl From<&str> for Identity {
  fn from(name: &str) -> Self {
    Identity::from_property(Some(&Value::from(name)))
  }
}

/// A resource's identity couldn't be turned into a dimension value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} is unresolvable: {detail}")]
pub struct IdentityError {
  pub field: &'static str,
  pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionResource {
  pub path: String,
  pub function_name: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpApiResource {
  pub path: String,
  pub api_name: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpMethodResource {
  pub path: String,
  pub api_name: Identity,
  pub method: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableResource {
  pub path: String,
  pub table_name: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicResource {
  pub path: String,
  pub topic_name: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueResource {
  pub path: String,
  pub queue_name: Identity,
}

/// A discovered resource of one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
  Function(FunctionResource),
  HttpApi(HttpApiResource),
  HttpMethod(HttpMethodResource),
  Table(TableResource),
  Topic(TopicResource),
  Queue(QueueResource),
}

impl Resource {
  pub fn kind(&self) -> ResourceKind {
    match self {
      Resource::Function(_) => ResourceKind::Function,
      Resource::HttpApi(_) => ResourceKind::HttpApi,
      Resource::HttpMethod(_) => ResourceKind::HttpMethod,
      Resource::Table(_) => ResourceKind::Table,
      Resource::Topic(_) => ResourceKind::Topic,
      Resource::Queue(_) => ResourceKind::Queue,
    }
  }
}
