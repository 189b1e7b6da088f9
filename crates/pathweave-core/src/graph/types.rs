//! Node and edge records held by the in-memory store.
//!
//! These are plain serde data. Traversals never see them directly, only
//! through the handles in [`super::handle`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

fn field<'d>(document: Option<&'d Value>, name: &str) -> Option<&'d Value> {
    document?.as_object()?.get(name)
}

/// A stored vertex: ID, kind and an optional JSON document.
///
/// ```rust
/// use pathweave_core::graph::GraphNode;
/// use serde_json::json;
///
/// let alice = GraphNode::new(1, "Person").with_document(json!({"name": "Alice"}));
/// assert_eq!(alice.label(), "Person");
/// assert_eq!(alice.property("name"), Some(&json!("Alice")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    id: u64,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    document: Option<Value>,
}

impl GraphNode {
    /// A node of kind `label` without a document.
    #[must_use]
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            document: None,
        }
    }

    /// Builder: attach a document.
    #[must_use]
    pub fn with_document(self, document: Value) -> Self {
        Self {
            document: Some(document),
            ..self
        }
    }

    /// Node ID.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Node kind.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The document, if one was attached.
    #[must_use]
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Top-level field `name` of an object document.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        field(self.document(), name)
    }
}

/// A stored directed edge from `source` to `target`.
///
/// Labels are trimmed and must not be blank.
///
/// ```rust
/// use pathweave_core::graph::GraphEdge;
///
/// let knows = GraphEdge::new(10, 1, 2, " KNOWS ").unwrap();
/// assert_eq!((knows.source(), knows.target()), (1, 2));
/// assert_eq!(knows.label(), "KNOWS");
/// assert!(GraphEdge::new(11, 1, 2, "").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    id: u64,
    source: u64,
    target: u64,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    document: Option<Value>,
}

impl GraphEdge {
    /// An edge without a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdgeLabel`] if `label` is blank.
    pub fn new(id: u64, source: u64, target: u64, label: impl AsRef<str>) -> Result<Self> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err(Error::InvalidEdgeLabel(format!(
                "edge {id} has a blank label"
            )));
        }
        Ok(Self {
            id,
            source,
            target,
            label: label.to_owned(),
            document: None,
        })
    }

    /// Builder: attach a document.
    #[must_use]
    pub fn with_document(self, document: Value) -> Self {
        Self {
            document: Some(document),
            ..self
        }
    }

    /// Edge ID.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Node the edge leaves.
    #[must_use]
    pub fn source(&self) -> u64 {
        self.source
    }

    /// Node the edge enters.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Edge label, trimmed.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The document, if one was attached.
    #[must_use]
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Top-level field `name` of an object document.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        field(self.document(), name)
    }
}
