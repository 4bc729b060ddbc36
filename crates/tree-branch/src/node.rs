//! The tree vertex that every traversal operates on

use std::any::{type_name, Any};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TreeBranchError};

/// A single vertex in an ordered tree
///
/// Generic over the payload type `D`. A node owns its children outright, so
/// the structure is always a rooted, acyclic tree. Children keep insertion
/// order, which is the left-to-right order every traversal follows.
///
/// Equality is structural: payloads must match and children must match
/// element-wise, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, bound(deserialize = "D: Deserialize<'de>"))]
pub struct Node<D> {
    data: D,
    #[serde(
        default,
        deserialize_with = "nullable_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    children: Vec<Node<D>>,
}

impl<D> Node<D> {
    /// Create a node from a payload and already built children
    pub fn new(data: D, children: Vec<Node<D>>) -> Self {
        Self { data, children }
    }

    /// Create a node without children
    pub fn leaf(data: D) -> Self {
        Self::new(data, Vec::new())
    }

    /// Add one child, consuming and returning the node
    pub fn with_child(mut self, child: Node<D>) -> Self {
        self.children.push(child);
        self
    }

    /// Add several children, consuming and returning the node
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node<D>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append children in place
    pub fn append(&mut self, children: impl IntoIterator<Item = Node<D>>) -> &mut Self {
        self.children.extend(children);
        self
    }

    /// Append children whose type is only known at runtime
    ///
    /// Each value must be a `Node<D>`. The first value that is not fails the
    /// call with [`TreeBranchError::TypeMismatch`]; children before it stay
    /// appended and nothing after it is looked at.
    pub fn try_append(
        &mut self,
        children: impl IntoIterator<Item = Box<dyn Any>>,
    ) -> Result<&mut Self>
    where
        D: 'static,
    {
        for child in children {
            match child.downcast::<Node<D>>() {
                Ok(node) => self.children.push(*node),
                Err(_) => {
                    return Err(TreeBranchError::TypeMismatch {
                        expected: type_name::<Node<D>>(),
                    })
                }
            }
        }
        Ok(self)
    }

    /// The node's payload
    pub fn data(&self) -> &D {
        &self.data
    }

    /// The node's children, in order
    pub fn children(&self) -> &[Node<D>] {
        &self.children
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// Compared with an explicit stack so deep trees cannot overflow the call stack.
impl<D: PartialEq> PartialEq for Node<D> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.data != right.data || left.children.len() != right.children.len() {
                return false;
            }
            pending.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

impl<D: Eq> Eq for Node<D> {}

impl<D> Drop for Node<D> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<D: fmt::Display> fmt::Display for Node<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Node] Data: {}, Child Count: {}",
            self.data,
            self.children.len()
        )
    }
}

/// Literal `children` may be missing or `null`; both mean no children.
fn nullable_children<'de, T, De>(deserializer: De) -> std::result::Result<Vec<Node<T>>, De::Error>
where
    T: Deserialize<'de>,
    De: Deserializer<'de>,
{
    Ok(Option::<Vec<Node<T>>>::deserialize(deserializer)?.unwrap_or_default())
}
