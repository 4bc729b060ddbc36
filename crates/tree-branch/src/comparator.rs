//! Pluggable predicates that decide which subtrees survive

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;

use log::trace;

use crate::error::{Result, TreeBranchError};

type PredicateFn<D, C> = dyn Fn(&D, &C) -> anyhow::Result<bool>;

/// A predicate type that is instantiated once per evaluation
///
/// `from_parts` receives the node's payload and the traversal context and
/// builds an instance; `is_valid` then answers for that one node. Instances
/// should copy out whatever they need, they do not outlive the evaluation.
///
/// The default `is_valid` rejects: a predicate that never says yes prunes
/// everything it is applied to.
///
/// # Example
///
/// ```
/// use tree_branch::Predicate;
///
/// struct MinimumAge {
///     age: u32,
///     minimum: u32,
/// }
///
/// impl Predicate<u32, u32> for MinimumAge {
///     fn from_parts(age: &u32, minimum: &u32) -> anyhow::Result<Self> {
///         Ok(Self { age: *age, minimum: *minimum })
///     }
///
///     fn is_valid(&self) -> anyhow::Result<bool> {
///         Ok(self.age >= self.minimum)
///     }
/// }
/// ```
pub trait Predicate<D, C>: Sized {
    /// Build an instance for one node
    fn from_parts(data: &D, context: &C) -> anyhow::Result<Self>;

    /// Whether the node (and so its subtree) should be kept
    fn is_valid(&self) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// The bare predicate: relies on the default verdict and rejects every node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectAll;

impl<D, C> Predicate<D, C> for RejectAll {
    fn from_parts(_data: &D, _context: &C) -> anyhow::Result<Self> {
        Ok(RejectAll)
    }
}

/// A named predicate over a node's payload and the traversal context
///
/// Both registration shapes, plain closures and [`Predicate`] types, are
/// stored as the same boxed closure, so evaluation never inspects which
/// shape it was given.
pub struct Comparator<D, C> {
    name: Cow<'static, str>,
    predicate: Box<PredicateFn<D, C>>,
}

impl<D: 'static, C: 'static> Comparator<D, C> {
    /// Wrap an infallible closure
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&D, &C) -> bool + 'static,
    {
        Self {
            name: Cow::Borrowed(type_name::<F>()),
            predicate: Box::new(move |data: &D, context: &C| -> anyhow::Result<bool> {
                Ok(predicate(data, context))
            }),
        }
    }

    /// Wrap a closure that may fail
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: Fn(&D, &C) -> anyhow::Result<bool> + 'static,
    {
        Self {
            name: Cow::Borrowed(type_name::<F>()),
            predicate: Box::new(predicate),
        }
    }

    /// Register a [`Predicate`] type; a fresh instance is built for every node
    pub fn stateful<P>() -> Self
    where
        P: Predicate<D, C> + 'static,
    {
        Self {
            name: Cow::Borrowed(type_name::<P>()),
            predicate: Box::new(|data: &D, context: &C| P::from_parts(data, context)?.is_valid()),
        }
    }
}

impl<D, C> Comparator<D, C> {
    /// Replace the name used in errors and logs
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// The comparator's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the predicate for one node
    pub fn evaluate(&self, data: &D, context: &C) -> Result<bool> {
        (self.predicate)(data, context).map_err(|source| TreeBranchError::Comparator {
            name: self.name.to_string(),
            source,
        })
    }
}

impl<D, C> fmt::Debug for Comparator<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An ordered list of comparators that must all accept a node
///
/// Built from nothing, one comparator, or many; an empty chain accepts
/// every node.
pub struct ComparatorChain<D, C> {
    comparators: Vec<Comparator<D, C>>,
}

impl<D, C> ComparatorChain<D, C> {
    /// A chain that accepts everything
    pub fn empty() -> Self {
        Self {
            comparators: Vec::new(),
        }
    }

    /// Add a comparator to the end of the chain
    pub fn push(&mut self, comparator: Comparator<D, C>) {
        self.comparators.push(comparator);
    }

    /// Number of comparators in the chain
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    /// Returns true if the chain has no comparators
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Iterate over the comparators in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Comparator<D, C>> {
        self.comparators.iter()
    }

    /// Evaluate the chain in order, stopping at the first rejection
    pub fn admits(&self, data: &D, context: &C) -> Result<bool> {
        for comparator in &self.comparators {
            if !comparator.evaluate(data, context)? {
                trace!("comparator `{}` rejected node", comparator.name());
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<D, C> Default for ComparatorChain<D, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<D, C> fmt::Debug for ComparatorChain<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.comparators).finish()
    }
}

impl<D, C> From<()> for ComparatorChain<D, C> {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl<D, C> From<Comparator<D, C>> for ComparatorChain<D, C> {
    fn from(comparator: Comparator<D, C>) -> Self {
        Self {
            comparators: vec![comparator],
        }
    }
}

impl<D, C> From<Option<Comparator<D, C>>> for ComparatorChain<D, C> {
    fn from(comparator: Option<Comparator<D, C>>) -> Self {
        Self {
            comparators: comparator.into_iter().collect(),
        }
    }
}

impl<D, C> From<Vec<Comparator<D, C>>> for ComparatorChain<D, C> {
    fn from(comparators: Vec<Comparator<D, C>>) -> Self {
        Self { comparators }
    }
}

impl<D, C, const N: usize> From<[Comparator<D, C>; N]> for ComparatorChain<D, C> {
    fn from(comparators: [Comparator<D, C>; N]) -> Self {
        Self {
            comparators: comparators.into(),
        }
    }
}

impl<D, C> FromIterator<Comparator<D, C>> for ComparatorChain<D, C> {
    fn from_iter<I: IntoIterator<Item = Comparator<D, C>>>(iter: I) -> Self {
        Self {
            comparators: iter.into_iter().collect(),
        }
    }
}
