//! Identifier types for vertices and edges
//!
//! Vertex and edge ids live in separate namespaces; the same integer may
//! name a vertex and an edge at the same time. Both are plain `u64`
//! wrappers, handed out and recycled by the graph's id generators.

use crate::id::IdKey;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! graph_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                $name(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }

        impl IdKey for $name {
            fn from_raw(raw: u64) -> Self {
                $name(raw)
            }

            fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

graph_id! {
    /// Identifier of a vertex, unique among the live vertices of a graph
    VertexId
}

graph_id! {
    /// Identifier of an edge, unique among the live edges of a graph
    ///
    /// Parallel edges between the same pair of vertices each get their own
    /// id, which is what tells them apart.
    EdgeId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let id = VertexId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "VertexId(42)");

        let id2: VertexId = 100.into();
        assert_eq!(id2.raw(), 100);
    }

    #[test]
    fn test_edge_id() {
        let id = EdgeId::from_raw(99);
        assert_eq!(id.as_u64(), 99);
        assert_eq!(format!("{}", id), "EdgeId(99)");
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&VertexId::new(5)).unwrap(), "5");
        let eid: EdgeId = serde_json::from_str("5").unwrap();
        assert_eq!(eid, EdgeId::new(5));
    }

    #[test]
    fn test_id_ordering() {
        assert!(VertexId::new(1) < VertexId::new(2));
        assert!(EdgeId::new(0) < EdgeId::new(7));
    }
}
