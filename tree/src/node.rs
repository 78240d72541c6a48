use std::fmt;

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attributes::Attributes;
use crate::flat::{Boundary, UnknownBoundaryError};
use crate::value::Value;

fn default_type() -> String {
    "text".to_string()
}

/// One position in a document tree: a type tag, opaque attributes,
/// owned children, and (on flattened copies only) a transient boundary
/// marker.
///
/// A node serializes as a single map: `"type"`, the attributes inline,
/// `"use"` only when a boundary marker is present, and `"children"`
/// only when non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type", default = "default_type")]
    typ: String,
    #[serde(flatten)]
    attributes: Attributes,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    boundary: Option<Boundary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// A node with the default `"text"` type and nothing else.
    pub fn new() -> Self {
        Self::with_type(default_type())
    }

    pub fn with_type(typ: impl Into<String>) -> Self {
        Self {
            typ: typ.into(),
            attributes: Attributes::new(),
            boundary: None,
            children: Vec::new(),
        }
    }

    pub fn node_type(&self) -> &str {
        &self.typ
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn boundary(&self) -> Option<Boundary> {
        self.boundary
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Builder-style attribute setter. Reserved keys are ignored.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.set(key, value);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.set(key, value);
    }

    /// Builder-style boundary marker, for assembling flattened
    /// sequences by hand. [`Node::to_array`] marks its own copies.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    /// A copy of this node without its children and without a boundary
    /// marker. The copy owns a fresh children container, so it can
    /// never alias the source subtree.
    pub fn detached(&self) -> Self {
        Self {
            typ: self.typ.clone(),
            attributes: self.attributes.clone(),
            boundary: None,
            children: Vec::new(),
        }
    }

    /// Append one child.
    pub fn add(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Append a batch of children in order.
    pub fn add_children(&mut self, children: impl IntoIterator<Item = Node>) {
        self.children.extend(children);
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children.is_empty() {
            write!(f, "{}", self.typ)
        } else {
            write!(f, "{}({} children)", self.typ, self.children.len())
        }
    }
}

#[derive(Debug, Clone, Error, Display)]
pub enum NodeFromValueError {
    /// Expected an object describing a node
    NotAnObject,
    /// The "type" entry must be a string
    TypeNotAString,
    /// The "use" entry must be a boundary marker string
    BoundaryNotAString,
    /// Invalid "use" entry: {0}
    Boundary(#[source] UnknownBoundaryError),
}

#[derive(Debug, Clone, Error, Display)]
pub enum SequenceFromValueError {
    /// Expected a list of node entries
    NotAList,
    /// The list of node entries is empty
    Empty,
    /// Invalid node entry at index {index}: {error}
    Entry {
        index: usize,
        #[source]
        error: NodeFromValueError,
    },
}

impl Node {
    /// Build a node from an untyped attribute map.
    ///
    /// `"type"` becomes the type tag (defaulting to `"text"` when
    /// absent), `"use"` the boundary marker, and `"children"` is always
    /// skipped regardless of its value, so a node never inherits a
    /// child list from bag input. Every other entry, null included, is
    /// copied into the attributes verbatim.
    pub fn from_value(value: Value) -> Result<Self, NodeFromValueError> {
        let Value::Object(object) = value else {
            return Err(NodeFromValueError::NotAnObject);
        };

        let mut node = Node::new();
        for (key, value) in object {
            match key.as_str() {
                "type" => {
                    let Value::String(typ) = value else {
                        return Err(NodeFromValueError::TypeNotAString);
                    };
                    node.typ = typ;
                }
                "use" => {
                    let Value::String(marker) = value else {
                        return Err(NodeFromValueError::BoundaryNotAString);
                    };
                    let boundary = marker.parse().map_err(NodeFromValueError::Boundary)?;
                    node.boundary = Some(boundary);
                }
                "children" => {}
                _ => node.attributes.set(key, value),
            }
        }
        Ok(node)
    }

    /// Decode a flattened sequence from untyped input, all or nothing:
    /// input that is not a list, is empty, or contains any entry that
    /// is not a node-shaped object rejects the whole input.
    pub fn sequence_from_value(value: Value) -> Result<Vec<Self>, SequenceFromValueError> {
        let Value::List(items) = value else {
            return Err(SequenceFromValueError::NotAList);
        };
        if items.is_empty() {
            return Err(SequenceFromValueError::Empty);
        }

        let mut nodes = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let node = Node::from_value(item)
                .map_err(|error| SequenceFromValueError::Entry { index, error })?;
            nodes.push(node);
        }
        Ok(nodes)
    }
}
