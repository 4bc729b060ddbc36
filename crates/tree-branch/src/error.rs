use thiserror::Error;

/// Errors produced while building or processing a tree.
///
/// Every variant aborts the operation that raised it. `process` never
/// returns a partially filtered tree alongside an error.
#[derive(Error, Debug)]
pub enum TreeBranchError {
    /// A dynamically supplied child was not a node of the parent's type.
    #[error("type mismatch: expected a child of type `{expected}`")]
    TypeMismatch { expected: &'static str },

    /// A comparator failed to construct or evaluate.
    #[error("comparator `{name}` failed: {source}")]
    Comparator {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A fallible combiner returned an error.
    #[error("combiner failed: {0}")]
    Combiner(#[source] anyhow::Error),

    /// A literal did not have the `{ data, children }` shape.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An admitted node was deeper than `ProcessOptions::max_depth`.
    #[error("tree is deeper than the configured limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// More nodes were admitted than `ProcessOptions::max_nodes` allows.
    #[error("tree has more nodes than the configured limit of {limit}")]
    NodeLimitExceeded { limit: usize },
}

/// Result alias used across the crate.
pub type Result<T, E = TreeBranchError> = std::result::Result<T, E>;
