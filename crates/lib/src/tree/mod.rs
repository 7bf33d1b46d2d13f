//! Construct tree loading and traversal.
//!
//! A construct tree is the hierarchy a stack is described with: structural
//! nodes (stacks, groupings) and resource nodes carrying a CloudFormation
//! type name and its properties. This module loads trees from disk and walks
//! them, handing every node to a [`Visitor`] exactly once.
//!
//! # Formats
//!
//! Two input shapes are understood:
//! - The native tree format (see [`ConstructNode`]).
//! - A CloudFormation template, flattened into a single root with one child
//!   per entry of its `Resources` object.

mod template;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub use template::from_template;

/// Separator between node ids in a construct path.
pub const PATH_SEPARATOR: char = '/';

/// Errors that can occur while loading a construct tree.
#[derive(Debug, Error)]
pub enum TreeError {
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse construct tree: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid template: {0}")]
  InvalidTemplate(String),

  #[error("node under '{parent}' has an empty id")]
  EmptyId { parent: String },

  #[error("node id '{id}' contains the path separator")]
  InvalidId { id: String },

  #[error("duplicate construct path: {path}")]
  DuplicatePath { path: String },
}

/// A single node in a construct tree.
///
/// # Example
///
/// ```json
/// {
///   "id": "Stack",
///   "children": [
///     { "id": "Handler", "type": "AWS::Lambda::Function", "properties": { "FunctionName": "proc-1" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructNode {
  pub id: String,
  /// CloudFormation type name; `None` for structural nodes.
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub resource_type: Option<String>,
  #[serde(default, skip_serializing_if = "Map::is_empty")]
  pub properties: Map<String, Value>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<ConstructNode>,
}

impl ConstructNode {
  /// Create a structural node with no type and no properties.
  pub fn structural(id: &str) -> Self {
    Self {
      id: id.to_string(),
      resource_type: None,
      properties: Map::new(),
      children: Vec::new(),
    }
  }

  /// Create a resource node of the given type.
  pub fn resource(id: &str, resource_type: &str) -> Self {
    Self {
      resource_type: Some(resource_type.to_string()),
      ..Self::structural(id)
    }
  }

  pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
    self.properties.insert(key.to_string(), value.into());
    self
  }

  pub fn with_child(mut self, child: ConstructNode) -> Self {
    self.children.push(child);
    self
  }

  pub fn property(&self, key: &str) -> Option<&Value> {
    self.properties.get(key)
  }

  /// Total number of nodes in this subtree, including this node.
  pub fn node_count(&self) -> usize {
    1 + self.children.iter().map(ConstructNode::node_count).sum::<usize>()
  }
}

/// A validated construct tree.
///
/// Every node has a non-empty id free of `/`, and sibling ids are unique, so
/// every node has a unique path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructTree {
  root: ConstructNode,
}

impl ConstructTree {
  pub fn new(root: ConstructNode) -> Result<Self, TreeError> {
    validate(&root)?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &ConstructNode {
    &self.root
  }

  /// Parse a tree from JSON, detecting the format.
  ///
  /// A top-level `Resources` object selects the template loader, anything
  /// else is parsed as a native tree.
  pub fn from_json_str(content: &str, root_id: &str) -> Result<Self, TreeError> {
    let value: Value = serde_json::from_str(content)?;
    if value.get("Resources").is_some() {
      return Self::new(from_template(&value, root_id)?);
    }
    let root: ConstructNode = serde_json::from_value(value)?;
    Self::new(root)
  }

  /// Load a tree from a file.
  ///
  /// Templates are rooted at a node named after the file stem.
  pub fn load(path: &Path) -> Result<Self, TreeError> {
    let content = fs::read_to_string(path).map_err(|e| TreeError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    let root_id = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Stack");
    let tree = Self::from_json_str(&content, root_id)?;
    debug!(path = ?path, nodes = tree.root.node_count(), "loaded construct tree");
    Ok(tree)
  }
}

fn validate(root: &ConstructNode) -> Result<(), TreeError> {
  check_id(&root.id, "")?;
  let mut pending = vec![(root, root.id.clone())];
  while let Some((node, path)) = pending.pop() {
    let mut seen = HashSet::new();
    for child in &node.children {
      check_id(&child.id, &path)?;
      let child_path = join_path(&path, &child.id);
      if !seen.insert(child.id.as_str()) {
        return Err(TreeError::DuplicatePath { path: child_path });
      }
      pending.push((child, child_path));
    }
  }
  Ok(())
}

fn check_id(id: &str, parent: &str) -> Result<(), TreeError> {
  if id.is_empty() {
    return Err(TreeError::EmptyId {
      parent: parent.to_string(),
    });
  }
  if id.contains(PATH_SEPARATOR) {
    return Err(TreeError::InvalidId { id: id.to_string() });
  }
  Ok(())
}

fn join_path(parent: &str, id: &str) -> String {
  format!("{}{}{}", parent, PATH_SEPARATOR, id)
}

/// A node handed to a visitor, together with its full construct path.
#[derive(Debug, Clone, Copy)]
pub struct VisitedNode<'a> {
  pub path: &'a str,
  pub node: &'a ConstructNode,
}

impl VisitedNode<'_> {
  /// Whether this node is `scope` itself or lies beneath it.
  ///
  /// An empty scope (or a bare `/`) names the whole tree.
  pub fn is_within(&self, scope: &str) -> bool {
    let scope = scope.trim_end_matches(PATH_SEPARATOR);
    if scope.is_empty() {
      return true;
    }
    match self.path.strip_prefix(scope) {
      Some(rest) => rest.is_empty() || rest.starts_with(PATH_SEPARATOR),
      None => false,
    }
  }
}

/// Receives node-visit notifications and the completion signal of a walk.
pub trait Visitor {
  type Error;

  fn visit(&mut self, node: VisitedNode<'_>);

  fn finalize(&mut self) -> Result<(), Self::Error>;
}

/// Walk a tree depth-first, pre-order.
///
/// Parents are visited before their children and children in declaration
/// order. Each node is visited exactly once; `finalize` is called once after
/// the last visit and its result is returned.
pub fn walk<V: Visitor>(tree: &ConstructTree, visitor: &mut V) -> Result<(), V::Error> {
  let mut stack = vec![(&tree.root, tree.root.id.clone())];
  while let Some((node, path)) = stack.pop() {
    visitor.visit(VisitedNode { path: &path, node });
    for child in node.children.iter().rev() {
      stack.push((child, join_path(&path, &child.id)));
    }
  }
  visitor.finalize()
}
