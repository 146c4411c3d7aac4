use serde_json::Value;
use std::collections::HashMap;

use crate::node::description::NodeDescription;
use crate::node::error::ParameterError;
use crate::node::items::InputItem;

/// Host-side accessor: string parameter by name for the item at `item_index`.
pub trait NodeParameters {
    fn get_string(&self, name: &str, item_index: usize) -> Result<String, ParameterError>;
}

/// Resolution order: the item's own field, then the node-level value,
/// then the property default from the descriptor.
#[derive(Debug, Clone)]
pub struct ItemParameters<'a> {
    items: &'a [InputItem],
    node_values: &'a HashMap<String, String>,
    description: &'a NodeDescription,
}

impl<'a> ItemParameters<'a> {
    pub fn new(
        items: &'a [InputItem],
        node_values: &'a HashMap<String, String>,
        description: &'a NodeDescription,
    ) -> Self {
        Self { items, node_values, description }
    }
}

impl NodeParameters for ItemParameters<'_> {
    fn get_string(&self, name: &str, item_index: usize) -> Result<String, ParameterError> {
        let item = self.items.get(item_index).ok_or_else(|| ParameterError::NoSuchItem {
            name: name.to_owned(),
            item_index,
        })?;

        if let Some(value) = item.json.get(name) {
            return coerce_to_string(value).ok_or_else(|| ParameterError::NotAString {
                name: name.to_owned(),
                item_index,
            });
        }
        if let Some(value) = self.node_values.get(name) {
            return Ok(value.to_owned());
        }
        Ok(self
            .description
            .property(name)
            .map(|p| p.default.clone())
            .unwrap_or_default())
    }
}

fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
