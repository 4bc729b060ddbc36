//! Tree Branch
//!
//! Prune ordered trees with a chain of predicates and rebuild whatever
//! survives into any output shape. The same pass backs menu and permission
//! filtering, conditional serialization, and other "keep this branch if"
//! transformations.
//!
//! # Core Concepts
//!
//! - **Node**: an ordered tree vertex owning a payload and its children
//! - **Comparator**: a predicate over a node's payload and a shared context;
//!   a node that fails any comparator is dropped with its whole subtree
//! - **Combiner**: builds a surviving node's output from its payload and the
//!   outputs of its surviving children
//! - **Processor**: runs the gate-then-rebuild pass
//!
//! # Example
//!
//! ```
//! use serde::Deserialize;
//! use serde_json::json;
//! use tree_branch::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, Deserialize)]
//! struct Item {
//!     name: String,
//!     #[serde(default)]
//!     admin: bool,
//! }
//!
//! let menu = json!({
//!     "data": { "name": "Menu" },
//!     "children": [
//!         { "data": { "name": "Profile" } },
//!         { "data": { "name": "Users", "admin": true } }
//!     ]
//! });
//!
//! let is_admin = false;
//! let names = tree_branch::process_with(
//!     menu,
//!     &is_admin,
//!     Comparator::new(|item: &Item, is_admin: &bool| !item.admin || *is_admin),
//!     |item: &Item, children: Vec<String>, _: &bool| {
//!         if children.is_empty() {
//!             item.name.clone()
//!         } else {
//!             format!("{}[{}]", item.name, children.join(","))
//!         }
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(names.as_deref(), Some("Menu[Profile]"));
//! ```

mod comparator;
mod error;
mod literal;
mod node;
mod options;
mod processor;

pub use comparator::{Comparator, ComparatorChain, Predicate, RejectAll};
pub use error::{Result, TreeBranchError};
pub use literal::{IntoNode, NodeInput};
pub use node::Node;
pub use options::ProcessOptions;
pub use processor::Processor;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::comparator::{Comparator, ComparatorChain, Predicate, RejectAll};
    pub use crate::error::TreeBranchError;
    pub use crate::literal::{IntoNode, NodeInput};
    pub use crate::node::Node;
    pub use crate::options::ProcessOptions;
    pub use crate::processor::Processor;
}

/// Normalize `node` and prune it, rebuilding survivors as new nodes
///
/// Pass `&()` as the context when the comparators need none, and `()` as
/// `comparators` to keep everything.
pub fn process<D, C>(
    node: impl IntoNode<D>,
    context: &C,
    comparators: impl Into<ComparatorChain<D, C>>,
) -> Result<Option<Node<D>>>
where
    D: Clone,
{
    let node = node.into_node()?;
    Processor::new(comparators).process(&node, context)
}

/// Normalize `node`, prune it and build survivors with `combiner`
pub fn process_with<D, C, T, F>(
    node: impl IntoNode<D>,
    context: &C,
    comparators: impl Into<ComparatorChain<D, C>>,
    combiner: F,
) -> Result<Option<T>>
where
    F: FnMut(&D, Vec<T>, &C) -> T,
{
    let node = node.into_node()?;
    Processor::new(comparators).process_with(&node, context, combiner)
}

/// Normalize `node`, prune it and build survivors with a fallible `combiner`
pub fn try_process_with<D, C, T, F>(
    node: impl IntoNode<D>,
    context: &C,
    comparators: impl Into<ComparatorChain<D, C>>,
    combiner: F,
) -> Result<Option<T>>
where
    F: FnMut(&D, Vec<T>, &C) -> anyhow::Result<T>,
{
    let node = node.into_node()?;
    Processor::new(comparators).try_process_with(&node, context, combiner)
}
