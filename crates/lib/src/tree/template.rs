//! CloudFormation template flattening.

use serde_json::{Map, Value};

use super::{ConstructNode, TreeError};

/// Flatten a template's `Resources` into a single-level construct tree.
///
/// The root is a structural node named `root_id`; each resource becomes a
/// child whose id is its logical id. Children are ordered by logical id, so
/// the same template always produces the same traversal order.
pub fn from_template(template: &Value, root_id: &str) -> Result<ConstructNode, TreeError> {
  let resources = template
    .get("Resources")
    .and_then(Value::as_object)
    .ok_or_else(|| TreeError::InvalidTemplate("'Resources' must be an object".to_string()))?;

  let mut logical_ids: Vec<&String> = resources.keys().collect();
  logical_ids.sort();

  let mut root = ConstructNode::structural(root_id);
  for logical_id in logical_ids {
    let resource = &resources[logical_id];
    let resource_type = resource
      .get("Type")
      .and_then(Value::as_str)
      .ok_or_else(|| TreeError::InvalidTemplate(format!("resource '{}' has no 'Type'", logical_id)))?;

    let properties = match resource.get("Properties") {
      None | Some(Value::Null) => Map::new(),
      Some(Value::Object(props)) => props.clone(),
      Some(_) => {
        return Err(TreeError::InvalidTemplate(format!(
          "resource '{}' has non-object 'Properties'",
          logical_id
        )));
      }
    };

    root.children.push(ConstructNode {
      id: logical_id.clone(),
      resource_type: Some(resource_type.to_string()),
      properties,
      children: Vec::new(),
    });
  }

  Ok(root)
}
