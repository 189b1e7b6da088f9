//! Error types for pathweave.

use thiserror::Error;

/// Errors raised by graph construction, traversal setup and configuration.
///
/// Traversals themselves are infallible iterators; errors surface either when
/// a traversal is built (invalid arguments) or as `Err` items from the strict
/// repeat guard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node with this ID is already stored.
    #[error("Node {0} already exists")]
    NodeExists(u64),

    /// An edge with this ID is already stored.
    #[error("Edge {0} already exists")]
    EdgeExists(u64),

    /// Edge label is empty or whitespace-only.
    #[error("Invalid edge label: {0}")]
    InvalidEdgeLabel(String),

    /// An edge endpoint does not name a stored node.
    #[error("Edge {edge} references missing node {node}")]
    DanglingEdge {
        /// Offending edge.
        edge: u64,
        /// Missing endpoint.
        node: u64,
    },

    /// Programmer error: the argument can never produce a valid traversal.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An element reappeared in a route guarded by `fail_on_repeat`.
    #[error("Repeated element at position {position}: {element}")]
    RepeatedElement {
        /// Zero-based position of the repeat in the guarded route.
        position: usize,
        /// Debug rendering of the repeated element.
        element: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for pathweave operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DanglingEdge { edge: 7, node: 42 };
        assert_eq!(err.to_string(), "Edge 7 references missing node 42");

        let err = Error::InvalidArgument("max_depth must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: max_depth must be at least 1"
        );
    }

    #[test]
    fn test_error_from_figment() {
        let fig_err = figment::Error::from("missing field `ceiling`".to_string());
        let err: Error = fig_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
