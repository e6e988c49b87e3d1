//! Directed multigraph and its property overlay
//!
//! - [`Graph`]: vertices and edges with recyclable integer ids, several
//!   edges allowed between the same pair of vertices
//! - [`PropertyGraph`]: a `Graph` carrying named vertex, edge and graph
//!   property tables kept in sync with structural changes

pub mod property;
pub mod property_graph;
pub mod store;
pub mod types;

pub use property::PropertyValue;
pub use property_graph::{EdgeTable, PropertyGraph, PropertyTables, Topology, VertexTable};
pub use store::{Graph, Translation};
pub use types::{EdgeId, VertexId};
