//! The filter-and-rebuild engine
//!
//! A node's comparators run before any of its children are visited, and a
//! node's output is built only after all of its children have been
//! resolved. Traversal uses a heap-allocated frame stack instead of native
//! recursion, so tree depth is bounded by memory rather than by the thread's
//! stack size.

use log::{debug, trace};

use crate::comparator::ComparatorChain;
use crate::error::{Result, TreeBranchError};
use crate::node::Node;
use crate::options::ProcessOptions;

/// One node whose children are still being resolved
struct Frame<'t, D, T> {
    node: &'t Node<D>,
    /// Index of the next child to gate
    next_child: usize,
    /// Outputs of the children that survived so far, in order
    outputs: Vec<T>,
}

impl<'t, D, T> Frame<'t, D, T> {
    fn new(node: &'t Node<D>) -> Self {
        Self {
            node,
            next_child: 0,
            outputs: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    admitted: usize,
    pruned: usize,
}

/// Prunes a tree with a comparator chain and rebuilds what survives
///
/// The same processor can be run against many trees and contexts; it holds
/// no per-run state.
///
/// # Example
///
/// ```
/// use tree_branch::{Comparator, Node, Processor};
///
/// let tree = Node::new(1, vec![Node::leaf(2), Node::leaf(3), Node::leaf(4)]);
/// let processor = Processor::new(Comparator::new(|n: &i32, max: &i32| n <= max));
///
/// let kept = processor.process(&tree, &3).unwrap();
/// assert_eq!(kept, Some(Node::new(1, vec![Node::leaf(2), Node::leaf(3)])));
/// ```
#[derive(Debug)]
pub struct Processor<D, C> {
    comparators: ComparatorChain<D, C>,
    options: ProcessOptions,
}

impl<D, C> Processor<D, C> {
    /// Create a processor with no limits
    pub fn new(comparators: impl Into<ComparatorChain<D, C>>) -> Self {
        Self::with_options(comparators, ProcessOptions::default())
    }

    /// Create a processor with explicit options
    pub fn with_options(
        comparators: impl Into<ComparatorChain<D, C>>,
        options: ProcessOptions,
    ) -> Self {
        Self {
            comparators: comparators.into(),
            options,
        }
    }

    /// The comparators every node must satisfy
    pub fn comparators(&self) -> &ComparatorChain<D, C> {
        &self.comparators
    }

    /// The limits applied to each run
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Prune the tree and rebuild the survivors as new nodes
    ///
    /// Returns `Ok(None)` when the root itself is rejected.
    pub fn process(&self, node: &Node<D>, context: &C) -> Result<Option<Node<D>>>
    where
        D: Clone,
    {
        self.process_with(node, context, |data: &D, children, _: &C| {
            Node::new(data.clone(), children)
        })
    }

    /// Prune the tree and build each survivor with `combiner`
    ///
    /// `combiner` receives the node's payload, the outputs of its surviving
    /// children in original order, and the context. It runs exactly once per
    /// surviving node, after all of that node's children.
    pub fn process_with<T, F>(
        &self,
        node: &Node<D>,
        context: &C,
        mut combiner: F,
    ) -> Result<Option<T>>
    where
        F: FnMut(&D, Vec<T>, &C) -> T,
    {
        self.run(node, context, |data, children, context| {
            Ok(combiner(data, children, context))
        })
    }

    /// Like [`process_with`](Self::process_with) with a combiner that can fail
    ///
    /// The first combiner error aborts the run as
    /// [`TreeBranchError::Combiner`].
    pub fn try_process_with<T, F>(
        &self,
        node: &Node<D>,
        context: &C,
        mut combiner: F,
    ) -> Result<Option<T>>
    where
        F: FnMut(&D, Vec<T>, &C) -> anyhow::Result<T>,
    {
        self.run(node, context, |data, children, context| {
            combiner(data, children, context).map_err(TreeBranchError::Combiner)
        })
    }

    fn run<T, F>(&self, root: &Node<D>, context: &C, mut combine: F) -> Result<Option<T>>
    where
        F: FnMut(&D, Vec<T>, &C) -> Result<T>,
    {
        debug!(
            "processing tree with {} comparator(s)",
            self.comparators.len()
        );

        let mut tally = Tally::default();
        if !self.admit(root, 0, context, &mut tally)? {
            debug!("root rejected, nothing kept");
            return Ok(None);
        }

        let mut stack = vec![Frame::new(root)];
        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if let Some(child) = node.children().get(frame.next_child) {
                frame.next_child += 1;
                // Every frame on the stack is an ancestor of `child`
                let depth = stack.len();
                if self.admit(child, depth, context, &mut tally)? {
                    stack.push(Frame::new(child));
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let output = combine(done.node.data(), done.outputs, context)?;
            match stack.last_mut() {
                Some(parent) => parent.outputs.push(output),
                None => {
                    debug!(
                        "kept {} node(s), pruned {} subtree(s)",
                        tally.admitted, tally.pruned
                    );
                    return Ok(Some(output));
                }
            }
        }

        Ok(None)
    }

    /// Gate one node and enforce the configured limits
    fn admit(
        &self,
        node: &Node<D>,
        depth: usize,
        context: &C,
        tally: &mut Tally,
    ) -> Result<bool> {
        if !self.comparators.admits(node.data(), context)? {
            trace!("pruned subtree at depth {}", depth);
            tally.pruned += 1;
            return Ok(false);
        }

        if let Some(limit) = self.options.depth_exceeded(depth) {
            return Err(TreeBranchError::DepthLimitExceeded { limit });
        }

        tally.admitted += 1;
        if let Some(limit) = self.options.nodes_exceeded(tally.admitted) {
            return Err(TreeBranchError::NodeLimitExceeded { limit });
        }

        Ok(true)
    }
}
