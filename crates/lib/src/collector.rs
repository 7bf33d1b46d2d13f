//! Resource collection during traversal.
//!
//! A [`ResourceCollector`] starts in [`CollectorState::Collecting`]. Each visit
//! classifies one node and appends it to the bucket of its kind, in discovery
//! order. A single completion signal moves it to [`CollectorState::Finalized`],
//! after which the buckets are frozen and further visits are ignored.

use serde::Serialize;
use tracing::debug;

use crate::resource::{
  FunctionResource, HttpApiResource, HttpMethodResource, KindSet, QueueResource, Resource, ResourceKind, TableResource,
  TopicResource, classify,
};
use crate::tree::{VisitedNode, Visitor};

/// Discovered resources, bucketed by kind in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCollection {
  pub functions: Vec<FunctionResource>,
  pub http_apis: Vec<HttpApiResource>,
  pub http_methods: Vec<HttpMethodResource>,
  pub tables: Vec<TableResource>,
  pub topics: Vec<TopicResource>,
  pub queues: Vec<QueueResource>,
}

impl ResourceCollection {
  pub fn push(&mut self, resource: Resource) {
    match resource {
      Resource::Function(r) => self.functions.push(r),
      Resource::HttpApi(r) => self.http_apis.push(r),
      Resource::HttpMethod(r) => self.http_methods.push(r),
      Resource::Table(r) => self.tables.push(r),
      Resource::Topic(r) => self.topics.push(r),
      Resource::Queue(r) => self.queues.push(r),
    }
  }

  /// Number of resources collected for `kind`.
  pub fn count(&self, kind: ResourceKind) -> usize {
    match kind {
      ResourceKind::Function => self.functions.len(),
      ResourceKind::HttpApi => self.http_apis.len(),
      ResourceKind::HttpMethod => self.http_methods.len(),
      ResourceKind::Table => self.tables.len(),
      ResourceKind::Topic => self.topics.len(),
      ResourceKind::Queue => self.queues.len(),
    }
  }

  /// Construct paths of the resources collected for `kind`.
  pub fn paths(&self, kind: ResourceKind) -> Vec<&str> {
    match kind {
      ResourceKind::Function => self.functions.iter().map(|r| r.path.as_str()).collect(),
      ResourceKind::HttpApi => self.http_apis.iter().map(|r| r.path.as_str()).collect(),
      ResourceKind::HttpMethod => self.http_methods.iter().map(|r| r.path.as_str()).collect(),
      ResourceKind::Table => self.tables.iter().map(|r| r.path.as_str()).collect(),
      ResourceKind::Topic => self.topics.iter().map(|r| r.path.as_str()).collect(),
      ResourceKind::Queue => self.queues.iter().map(|r| r.path.as_str()).collect(),
    }
  }

  pub fn total(&self) -> usize {
    ResourceKind::CLASSIFICATION_ORDER
      .into_iter()
      .map(|kind| self.count(kind))
      .sum()
  }

  pub fn is_empty(&self) -> bool {
    self.total() == 0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
  Collecting,
  Finalized,
}

/// What a single visit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
  /// The node was bucketed under this kind.
  Collected(ResourceKind),
  /// The node lies outside the collection scope.
  OutOfScope,
  /// The node matched no enabled kind.
  Ignored,
  /// The collector was already finalized.
  Closed,
}

#[derive(Debug, Clone)]
pub struct ResourceCollector {
  state: CollectorState,
  enabled: KindSet,
  scope: Option<String>,
  collection: ResourceCollection,
}

impl Default for ResourceCollector {
  fn default() -> Self {
    Self::new(KindSet::all(), None)
  }
}

impl ResourceCollector {
  /// Create a collector for the `enabled` kinds, limited to nodes at or
  /// under `scope` when given.
  pub fn new(enabled: KindSet, scope: Option<String>) -> Self {
    Self {
      state: CollectorState::Collecting,
      enabled,
      scope,
      collection: ResourceCollection::default(),
    }
  }

  pub fn state(&self) -> CollectorState {
    self.state
  }

  pub fn is_finalized(&self) -> bool {
    self.state == CollectorState::Finalized
  }

  pub fn collection(&self) -> &ResourceCollection {
    &self.collection
  }

  /// Classify and bucket one node.
  pub fn visit(&mut self, visited: VisitedNode<'_>) -> Visit {
    if self.is_finalized() {
      debug!(path = %visited.path, "visit after finalize ignored");
      return Visit::Closed;
    }

    if let Some(scope) = &self.scope
      && !visited.is_within(scope)
    {
      return Visit::OutOfScope;
    }

    match classify(visited, self.enabled) {
      Some(resource) => {
        let kind = resource.kind();
        debug!(path = %visited.path, kind = %kind, "collected resource");
        self.collection.push(resource);
        Visit::Collected(kind)
      }
      None => Visit::Ignored,
    }
  }

  /// Freeze the buckets.
  ///
  /// Returns `true` on the transition and `false` if already finalized.
  pub fn finalize(&mut self) -> bool {
    if self.is_finalized() {
      return false;
    }
    self.state = CollectorState::Finalized;
    debug!(resources = self.collection.total(), "collection finalized");
    true
  }

  /// Finalize and hand over the frozen collection.
  pub fn into_collection(mut self) -> ResourceCollection {
    self.finalize();
    self.collection
  }
}

impl Visitor for ResourceCollector {
  type Error = std::convert::Infallible;

  fn visit(&mut self, node: VisitedNode<'_>) {
    ResourceCollector::visit(self, node);
  }

  fn finalize(&mut self) -> Result<(), Self::Error> {
    ResourceCollector::finalize(self);
    Ok(())
  }
}
