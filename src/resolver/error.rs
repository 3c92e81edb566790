//! Errors raised by resolution queries.

use crate::graph::CycleInfo;

/// The two ways a resolution query can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The requested package has no vertex in the graph.
    #[error("package not found: {0}")]
    PackageNotFound(String),

    /// A cycle lies on a path the query had to traverse.
    ///
    /// Nodes are listed in "depends on" order: each entry depends on the
    /// next and the last depends on the first.
    #[error("dependency cycle detected: {0}")]
    CycleDetected(CycleInfo),
}

impl ResolveError {
    /// Returns true for [`ResolveError::PackageNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PackageNotFound(_))
    }

    /// Returns the cycle for [`ResolveError::CycleDetected`].
    pub fn cycle(&self) -> Option<&CycleInfo> {
        match self {
            Self::CycleDetected(cycle) => Some(cycle),
            Self::PackageNotFound(_) => None,
        }
    }
}

/// Result type alias for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
