//! Error taxonomy shared by the id, graph and grid modules

use crate::graph::types::{EdgeId, VertexId};
use std::fmt;
use thiserror::Error;

/// The kind of graph element a property table is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Edge,
    Graph,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Vertex => write!(f, "vertices"),
            ElementKind::Edge => write!(f, "edges"),
            ElementKind::Graph => write!(f, "graph"),
        }
    }
}

/// Errors that can occur during id, graph, property or grid operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid vertex: {0}")]
    InvalidVertex(VertexId),

    #[error("Invalid edge: {0}")]
    InvalidEdge(EdgeId),

    #[error("Id {0} already used")]
    IdInUse(u64),

    #[error("Key {0} conflicts with an id already in use")]
    KeyConflict(u64),

    #[error("Id {0} out of range")]
    IdOutOfRange(u64),

    #[error("Id {0} currently not in use")]
    IdNotInUse(u64),

    #[error("Property {name} is undefined on {kind}")]
    UnknownProperty { kind: ElementKind, name: String },

    #[error("Property {name} is already defined on {kind}")]
    PropertyConflict { kind: ElementKind, name: String },

    #[error("{what} {value} out of range [0, {bound})")]
    OutOfRange {
        what: &'static str,
        value: usize,
        bound: usize,
    },

    #[error("Expected {expected} coordinates, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Grid shape {shape:?} has more cells than usize can count")]
    ShapeOverflow { shape: Vec<usize> },

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Unknown id generator '{0}', available generators are max, set, list")]
    UnknownGenerator(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    pub(crate) fn unknown_property(kind: ElementKind, name: &str) -> Self {
        GraphError::UnknownProperty {
            kind,
            name: name.to_string(),
        }
    }

    pub(crate) fn property_conflict(kind: ElementKind, name: &str) -> Self {
        GraphError::PropertyConflict {
            kind,
            name: name.to_string(),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
