//! Normalizing nested literals into node trees
//!
//! A literal is any JSON value of the shape
//! `{ "data": <payload>, "children": [<literal>, ...] }`. `children` may be
//! left out or `null`. A missing `data` is read as an empty object, so it
//! only fails when the payload type cannot be built from `{}`.

use derive_more::From;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, TreeBranchError};
use crate::node::Node;

/// Either an already built tree or a literal still to be normalized
#[derive(Debug, Clone, From)]
pub enum NodeInput<D> {
    /// A tree that needs no normalization
    Node(Node<D>),
    /// A nested `{ data, children }` literal
    Literal(Value),
}

/// Anything the top-level functions accept as a tree
///
/// Built nodes pass through untouched and place no bounds on the payload.
/// Literals need a payload that can be deserialized.
pub trait IntoNode<D> {
    /// Resolve the input into a tree
    fn into_node(self) -> Result<Node<D>>;
}

impl<D> IntoNode<D> for Node<D> {
    fn into_node(self) -> Result<Node<D>> {
        Ok(self)
    }
}

impl<D: DeserializeOwned> IntoNode<D> for Value {
    fn into_node(self) -> Result<Node<D>> {
        Node::from_literal(self)
    }
}

impl<D: DeserializeOwned> IntoNode<D> for NodeInput<D> {
    fn into_node(self) -> Result<Node<D>> {
        match self {
            NodeInput::Node(node) => Ok(node),
            NodeInput::Literal(value) => Node::from_literal(value),
        }
    }
}

impl<D: DeserializeOwned> Node<D> {
    /// Build a tree from a nested literal
    ///
    /// Fails with [`TreeBranchError::InvalidInput`] when the literal, or any
    /// nested child, is not a `{ data, children }` object or its payload
    /// does not fit `D`.
    pub fn from_literal(mut value: Value) -> Result<Self> {
        fill_missing_data(&mut value);
        serde_json::from_value(value).map_err(|err| TreeBranchError::InvalidInput {
            reason: err.to_string(),
        })
    }
}

/// Give every literal object without a `data` key an empty one
fn fill_missing_data(root: &mut Value) {
    let mut pending = vec![root];
    while let Some(value) = pending.pop() {
        let Value::Object(fields) = value else {
            continue;
        };
        fields
            .entry("data")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(Value::Array(children)) = fields.get_mut("children") {
            pending.extend(children.iter_mut());
        }
    }
}
