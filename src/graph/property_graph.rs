//! Property overlay on top of [`Graph`]
//!
//! Named tables attach values to vertices, to edges and to the graph as a
//! whole. Vertex, edge and graph property names are separate namespaces.
//! The overlay keeps its tables consistent with the structure: removing an
//! element purges it from every table of its kind.

use super::property::PropertyValue;
use super::store::{Graph, Translation};
use super::types::{EdgeId, VertexId};
use crate::config::GraphConfig;
use crate::error::{ElementKind, GraphError, GraphResult};
use crate::id::IdGeneratorKind;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::ops::Deref;
use tracing::{debug, trace};

/// Values of one vertex property, keyed by vertex
pub type VertexTable<V> = FxHashMap<VertexId, V>;

/// Values of one edge property, keyed by edge
pub type EdgeTable<V> = FxHashMap<EdgeId, V>;

/// All property tables of a graph, names kept in registration order
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTables<V> {
    vertex: IndexMap<String, VertexTable<V>>,
    edge: IndexMap<String, EdgeTable<V>>,
    graph: IndexMap<String, V>,
}

impl<V> Default for PropertyTables<V> {
    fn default() -> Self {
        PropertyTables {
            vertex: IndexMap::new(),
            edge: IndexMap::new(),
            graph: IndexMap::new(),
        }
    }
}

impl<V> PropertyTables<V> {
    pub fn vertex_properties(&self) -> impl Iterator<Item = (&str, &VertexTable<V>)> + '_ {
        self.vertex.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn edge_properties(&self) -> impl Iterator<Item = (&str, &EdgeTable<V>)> + '_ {
        self.edge.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn graph_properties(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.graph.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Anything that can be copied into a graph by `extend`
///
/// `property_tables` is the capability query: plain graphs answer `None`,
/// property graphs expose their tables so they get copied along.
pub trait Topology<V = PropertyValue> {
    /// Structure to copy
    fn topology(&self) -> &Graph;

    /// Property tables to copy, if any
    fn property_tables(&self) -> Option<&PropertyTables<V>> {
        None
    }
}

impl<V> Topology<V> for Graph {
    fn topology(&self) -> &Graph {
        self
    }
}

/// Directed multigraph carrying named property tables
///
/// Read-only structural queries are reachable through `Deref<Target =
/// Graph>`. Structural mutations go through the methods below so the
/// tables stay consistent.
///
/// Accessors ending in `_mut` hand out the live table: writes through it
/// are visible to every later read, nothing is copied.
#[derive(Debug, Clone)]
pub struct PropertyGraph<V = PropertyValue> {
    graph: Graph,
    properties: PropertyTables<V>,
}

impl<V> PropertyGraph<V> {
    pub fn new() -> Self {
        Self::from_graph(Graph::new())
    }

    pub fn with_generator(kind: IdGeneratorKind) -> Self {
        Self::from_graph(Graph::with_generator(kind))
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        Self::from_graph(Graph::with_config(config))
    }

    /// Wrap an existing graph with no property registered
    pub fn from_graph(graph: Graph) -> Self {
        PropertyGraph {
            graph,
            properties: PropertyTables::default(),
        }
    }

    /// Build a property graph copying topology and properties of `other`
    pub fn copy_of<G>(other: &G) -> GraphResult<Self>
    where
        G: Topology<V> + ?Sized,
        V: Clone,
    {
        let source = other.topology();
        let config = GraphConfig {
            vertex_ids: source.vertex_generator_kind(),
            edge_ids: source.edge_generator_kind(),
        };
        let mut graph = Self::with_config(&config);
        graph.extend(other)?;
        Ok(graph)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Drop the property tables and keep the structure
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn properties(&self) -> &PropertyTables<V> {
        &self.properties
    }

    // ------------------------------------------------------------------
    // Vertex properties
    // ------------------------------------------------------------------

    pub fn vertex_property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.vertex.keys().map(String::as_str)
    }

    pub fn vertex_properties(&self) -> impl Iterator<Item = (&str, &VertexTable<V>)> + '_ {
        self.properties.vertex_properties()
    }

    pub fn vertex_property(&self, name: &str) -> GraphResult<&VertexTable<V>> {
        self.properties
            .vertex
            .get(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Vertex, name))
    }

    pub fn vertex_property_mut(&mut self, name: &str) -> GraphResult<&mut VertexTable<V>> {
        self.properties
            .vertex
            .get_mut(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Vertex, name))
    }

    /// Register a vertex property, empty unless `values` is given
    pub fn add_vertex_property(
        &mut self,
        name: impl Into<String>,
        values: Option<VertexTable<V>>,
    ) -> GraphResult<()> {
        let name = name.into();
        if self.properties.vertex.contains_key(&name) {
            return Err(GraphError::property_conflict(ElementKind::Vertex, &name));
        }
        trace!("Registered vertex property {}", name);
        self.properties.vertex.insert(name, values.unwrap_or_default());
        Ok(())
    }

    pub fn remove_vertex_property(&mut self, name: &str) -> GraphResult<VertexTable<V>> {
        self.properties
            .vertex
            .shift_remove(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Vertex, name))
    }

    // ------------------------------------------------------------------
    // Edge properties
    // ------------------------------------------------------------------

    pub fn edge_property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.edge.keys().map(String::as_str)
    }

    pub fn edge_properties(&self) -> impl Iterator<Item = (&str, &EdgeTable<V>)> + '_ {
        self.properties.edge_properties()
    }

    pub fn edge_property(&self, name: &str) -> GraphResult<&EdgeTable<V>> {
        self.properties
            .edge
            .get(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Edge, name))
    }

    pub fn edge_property_mut(&mut self, name: &str) -> GraphResult<&mut EdgeTable<V>> {
        self.properties
            .edge
            .get_mut(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Edge, name))
    }

    /// Register an edge property, empty unless `values` is given
    pub fn add_edge_property(
        &mut self,
        name: impl Into<String>,
        values: Option<EdgeTable<V>>,
    ) -> GraphResult<()> {
        let name = name.into();
        if self.properties.edge.contains_key(&name) {
            return Err(GraphError::property_conflict(ElementKind::Edge, &name));
        }
        trace!("Registered edge property {}", name);
        self.properties.edge.insert(name, values.unwrap_or_default());
        Ok(())
    }

    pub fn remove_edge_property(&mut self, name: &str) -> GraphResult<EdgeTable<V>> {
        self.properties
            .edge
            .shift_remove(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Edge, name))
    }

    // ------------------------------------------------------------------
    // Graph properties
    // ------------------------------------------------------------------

    pub fn graph_property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.graph.keys().map(String::as_str)
    }

    pub fn graph_properties(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.properties.graph_properties()
    }

    pub fn graph_property(&self, name: &str) -> GraphResult<&V> {
        self.properties
            .graph
            .get(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Graph, name))
    }

    pub fn graph_property_mut(&mut self, name: &str) -> GraphResult<&mut V> {
        self.properties
            .graph
            .get_mut(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Graph, name))
    }

    /// Register a graph property, set to `V::default()` unless `value` is
    /// given
    pub fn add_graph_property(&mut self, name: impl Into<String>, value: Option<V>) -> GraphResult<()>
    where
        V: Default,
    {
        let name = name.into();
        if self.properties.graph.contains_key(&name) {
            return Err(GraphError::property_conflict(ElementKind::Graph, &name));
        }
        trace!("Registered graph property {}", name);
        self.properties.graph.insert(name, value.unwrap_or_default());
        Ok(())
    }

    pub fn remove_graph_property(&mut self, name: &str) -> GraphResult<V> {
        self.properties
            .graph
            .shift_remove(name)
            .ok_or_else(|| GraphError::unknown_property(ElementKind::Graph, name))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Add a vertex; new vertices have no property value
    pub fn add_vertex(&mut self, vid: Option<VertexId>) -> GraphResult<VertexId> {
        self.graph.add_vertex(vid)
    }

    /// Add an edge; new edges have no property value
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        eid: Option<EdgeId>,
    ) -> GraphResult<EdgeId> {
        self.graph.add_edge(source, target, eid)
    }

    /// Remove a vertex, its attached edges and all their property values
    pub fn remove_vertex(&mut self, vid: VertexId) -> GraphResult<Vec<EdgeId>> {
        let attached = self.graph.attached_edges(vid)?;
        for table in self.properties.vertex.values_mut() {
            table.remove(&vid);
        }
        for table in self.properties.edge.values_mut() {
            for eid in &attached {
                table.remove(eid);
            }
        }
        self.graph.remove_vertex(vid)
    }

    /// Remove an edge and its property values
    pub fn remove_edge(&mut self, eid: EdgeId) -> GraphResult<(VertexId, VertexId)> {
        if !self.graph.has_edge(eid) {
            return Err(GraphError::InvalidEdge(eid));
        }
        for table in self.properties.edge.values_mut() {
            table.remove(&eid);
        }
        self.graph.remove_edge(eid)
    }

    /// Remove every element
    ///
    /// Vertex and edge property names survive with empty tables; graph
    /// properties are dropped altogether.
    pub fn clear(&mut self) {
        for table in self.properties.vertex.values_mut() {
            table.clear();
        }
        for table in self.properties.edge.values_mut() {
            table.clear();
        }
        self.properties.graph.clear();
        self.graph.clear();
    }

    /// Remove every edge and empty the edge property tables
    pub fn clear_edges(&mut self) {
        for table in self.properties.edge.values_mut() {
            table.clear();
        }
        self.graph.clear_edges();
    }

    /// Copy the topology of `other` into this graph, along with its
    /// properties when `other` has any
    ///
    /// Missing vertex and edge property names are registered on the fly.
    /// Graph properties are copied only under names not already present
    /// here; existing values are never overwritten. Table entries whose id
    /// is not an element of `other` are skipped.
    pub fn extend<G>(&mut self, other: &G) -> GraphResult<(Translation<VertexId>, Translation<EdgeId>)>
    where
        G: Topology<V> + ?Sized,
        V: Clone,
    {
        let (trans_vid, trans_eid) = self.graph.extend(other.topology())?;
        if let Some(tables) = other.property_tables() {
            self.merge_properties(tables, &trans_vid, &trans_eid);
        }
        Ok((trans_vid, trans_eid))
    }

    /// Copy this graph's topology and properties into itself
    pub fn extend_with_self(&mut self) -> GraphResult<(Translation<VertexId>, Translation<EdgeId>)>
    where
        V: Clone,
    {
        let tables = self.properties.clone();
        let (trans_vid, trans_eid) = self.graph.extend_with_self()?;
        self.merge_properties(&tables, &trans_vid, &trans_eid);
        Ok((trans_vid, trans_eid))
    }

    fn merge_properties(
        &mut self,
        tables: &PropertyTables<V>,
        trans_vid: &Translation<VertexId>,
        trans_eid: &Translation<EdgeId>,
    ) where
        V: Clone,
    {
        for (name, table) in &tables.vertex {
            let target = self.properties.vertex.entry(name.clone()).or_default();
            for (vid, value) in table {
                if let Some(&new_vid) = trans_vid.get(vid) {
                    target.insert(new_vid, value.clone());
                }
            }
        }

        for (name, table) in &tables.edge {
            let target = self.properties.edge.entry(name.clone()).or_default();
            for (eid, value) in table {
                if let Some(&new_eid) = trans_eid.get(eid) {
                    target.insert(new_eid, value.clone());
                }
            }
        }

        for (name, value) in &tables.graph {
            if !self.properties.graph.contains_key(name) {
                self.properties.graph.insert(name.clone(), value.clone());
            }
        }

        debug!(
            "Merged {} vertex, {} edge and {} graph properties",
            tables.vertex.len(),
            tables.edge.len(),
            tables.graph.len()
        );
    }
}

impl<V> Default for PropertyGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Deref for PropertyGraph<V> {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.graph
    }
}

impl<V> Topology<V> for PropertyGraph<V> {
    fn topology(&self) -> &Graph {
        &self.graph
    }

    fn property_tables(&self) -> Option<&PropertyTables<V>> {
        Some(&self.properties)
    }
}
