//! Node classification.

use crate::tree::VisitedNode;

use super::types::{
  FunctionResource, HttpApiResource, HttpMethodResource, Identity, KindSet, QueueResource, Resource, ResourceKind,
  TableResource, TopicResource,
};

/// Classify a node against the enabled resource kinds.
///
/// Kinds are tried in [`ResourceKind::CLASSIFICATION_ORDER`] and the first
/// match wins. Disabled kinds are never tested. Returns `None` for nodes that
/// match no enabled kind, including structural nodes.
pub fn classify(visited: VisitedNode<'_>, enabled: KindSet) -> Option<Resource> {
  let resource_type = visited.node.resource_type.as_deref()?;
  ResourceKind::CLASSIFICATION_ORDER
    .into_iter()
    .filter(|kind| enabled.contains(*kind))
    .find(|kind| kind.cfn_type() == resource_type)
    .map(|kind| extract(kind, visited))
}

fn extract(kind: ResourceKind, visited: VisitedNode<'_>) -> Resource {
  let node = visited.node;
  let path = visited.path.to_string();
  let identity = |key: &str| Identity::from_property(node.property(key));

  match kind {
    ResourceKind::Function => Resource::Function(FunctionResource {
      path,
      function_name: identity("FunctionName"),
    }),
    ResourceKind::HttpApi => Resource::HttpApi(HttpApiResource {
      path,
      api_name: identity("Name"),
    }),
    ResourceKind::HttpMethod => Resource::HttpMethod(HttpMethodResource {
      path,
      api_name: identity("RestApiName"),
      method: identity("HttpMethod"),
    }),
    ResourceKind::Table => Resource::Table(TableResource {
      path,
      table_name: identity("TableName"),
    }),
    ResourceKind::Topic => Resource::Topic(TopicResource {
      path,
      topic_name: identity("TopicName"),
    }),
    ResourceKind::Queue => Resource::Queue(QueueResource {
      path,
      queue_name: identity("QueueName"),
    }),
  }
}
