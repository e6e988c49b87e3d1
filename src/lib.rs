//! idgraph
//!
//! In-memory directed multigraph with recyclable integer identifiers, a
//! property overlay attaching named values to vertices, edges and the graph
//! itself, and a small N-dimensional grid indexer. Meant as a building
//! block for topology modeling tools.
//!
//! # Layout
//!
//! - [`id`]: id generators (`max`, `set`, `list`) and the id-keyed
//!   [`IdentifierMap`]
//! - [`graph`]: [`Graph`] and [`PropertyGraph`]
//! - [`grid`]: row-major coordinate/index mapping
//! - [`config`]: id strategy selection
//! - [`error`]: the [`GraphError`] taxonomy
//!
//! ## Example Usage
//!
//! ```rust
//! use idgraph::PropertyGraph;
//!
//! let mut g: PropertyGraph = PropertyGraph::new();
//! g.add_vertex_property("name", None).unwrap();
//!
//! let trunk = g.add_vertex(None).unwrap();
//! let branch = g.add_vertex(None).unwrap();
//! g.add_edge(trunk, branch, None).unwrap();
//! g.vertex_property_mut("name").unwrap().insert(branch, "branch".into());
//!
//! assert_eq!(g.out_neighbors(trunk).unwrap(), vec![branch]);
//!
//! g.remove_vertex(branch).unwrap();
//! assert!(g.vertex_property("name").unwrap().is_empty());
//! assert_eq!(g.nb_edges(), 0);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod graph;
pub mod grid;
pub mod id;

// Re-export main types for convenience
pub use config::GraphConfig;
pub use error::{ElementKind, GraphError, GraphResult};
pub use graph::{
    EdgeId, EdgeTable, Graph, PropertyGraph, PropertyTables, PropertyValue, Topology,
    Translation, VertexId, VertexTable,
};
pub use grid::Grid;
pub use id::{IdGenerator, IdGeneratorKind, IdKey, IdentifierMap};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
