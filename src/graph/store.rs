//! Directed multigraph with recyclable integer ids
//!
//! Vertices keep the sets of their incoming and outgoing edge ids, edges
//! keep their `(source, target)` pair. Both live in [`IdentifierMap`]s, so
//! ids of removed elements are handed out again according to the configured
//! [`IdGeneratorKind`].

use super::types::{EdgeId, VertexId};
use crate::config::GraphConfig;
use crate::error::{GraphError, GraphResult};
use crate::id::{IdGeneratorKind, IdentifierMap};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Correspondence between ids of a source graph and the ids allocated for
/// the same elements by [`Graph::extend`]
pub type Translation<K> = FxHashMap<K, K>;

/// Edge ids attached to a vertex
///
/// Ordered sets keep neighbor and `edge` lookups deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Adjacency {
    incoming: BTreeSet<EdgeId>,
    outgoing: BTreeSet<EdgeId>,
}

/// Source and target of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Endpoints {
    source: VertexId,
    target: VertexId,
}

/// Directed graph allowing several edges between the same pair of vertices
///
/// Invariants:
/// - every edge endpoint is a vertex of the graph
/// - every edge id sits in the `outgoing` set of its source and the
///   `incoming` set of its target, and nowhere else
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: IdentifierMap<VertexId, Adjacency>,
    edges: IdentifierMap<EdgeId, Endpoints>,
}

impl Graph {
    /// Create an empty graph recycling ids with the default generator
    pub fn new() -> Self {
        Self::with_config(&GraphConfig::default())
    }

    /// Create an empty graph using `kind` for both vertex and edge ids
    pub fn with_generator(kind: IdGeneratorKind) -> Self {
        Graph {
            vertices: IdentifierMap::with_generator(kind),
            edges: IdentifierMap::with_generator(kind),
        }
    }

    pub fn with_config(config: &GraphConfig) -> Self {
        Graph {
            vertices: IdentifierMap::with_generator(config.vertex_ids),
            edges: IdentifierMap::with_generator(config.edge_ids),
        }
    }

    /// Create a graph holding a copy of the topology of `other`
    ///
    /// Ids are freshly allocated and need not match those of `other`. The
    /// new graph uses the same generator strategies as `other`.
    pub fn copy_of(other: &Graph) -> GraphResult<Self> {
        let config = GraphConfig {
            vertex_ids: other.vertices.generator_kind(),
            edge_ids: other.edges.generator_kind(),
        };
        let mut graph = Self::with_config(&config);
        graph.extend(other)?;
        Ok(graph)
    }

    pub fn vertex_generator_kind(&self) -> IdGeneratorKind {
        self.vertices.generator_kind()
    }

    pub fn edge_generator_kind(&self) -> IdGeneratorKind {
        self.edges.generator_kind()
    }

    // ------------------------------------------------------------------
    // Element queries
    // ------------------------------------------------------------------

    fn endpoints(&self, eid: EdgeId) -> GraphResult<Endpoints> {
        self.edges.get(eid).copied().ok_or(GraphError::InvalidEdge(eid))
    }

    fn adjacency(&self, vid: VertexId) -> GraphResult<&Adjacency> {
        self.vertices.get(vid).ok_or(GraphError::InvalidVertex(vid))
    }

    /// Source vertex of an edge
    pub fn source(&self, eid: EdgeId) -> GraphResult<VertexId> {
        Ok(self.endpoints(eid)?.source)
    }

    /// Target vertex of an edge
    pub fn target(&self, eid: EdgeId) -> GraphResult<VertexId> {
        Ok(self.endpoints(eid)?.target)
    }

    /// Source and target vertices of an edge
    pub fn edge_vertices(&self, eid: EdgeId) -> GraphResult<(VertexId, VertexId)> {
        let ends = self.endpoints(eid)?;
        Ok((ends.source, ends.target))
    }

    /// Find an edge going from `source` to `target`
    ///
    /// Scans the outgoing edges of `source` in ascending id order and
    /// returns the first one pointing at `target`, so with parallel edges
    /// the lowest id wins. Linear in the out-degree of `source`.
    pub fn edge(&self, source: VertexId, target: VertexId) -> GraphResult<Option<EdgeId>> {
        if !self.has_vertex(target) {
            return Err(GraphError::InvalidVertex(target));
        }
        for eid in self.out_edges(source)? {
            if self.target(eid)? == target {
                return Ok(Some(eid));
            }
        }
        Ok(None)
    }

    pub fn has_vertex(&self, vid: VertexId) -> bool {
        self.vertices.contains_key(vid)
    }

    pub fn has_edge(&self, eid: EdgeId) -> bool {
        self.edges.contains_key(eid)
    }

    /// Check the adjacency invariants of the graph
    pub fn is_valid(&self) -> bool {
        let edges_consistent = self.edges.iter().all(|(eid, ends)| {
            let source_ok = self
                .vertices
                .get(ends.source)
                .is_some_and(|adj| adj.outgoing.contains(&eid));
            let target_ok = self
                .vertices
                .get(ends.target)
                .is_some_and(|adj| adj.incoming.contains(&eid));
            source_ok && target_ok
        });

        let vertices_consistent = self.vertices.iter().all(|(vid, adj)| {
            adj.outgoing
                .iter()
                .all(|&eid| self.edges.get(eid).is_some_and(|ends| ends.source == vid))
                && adj
                    .incoming
                    .iter()
                    .all(|&eid| self.edges.get(eid).is_some_and(|ends| ends.target == vid))
        });

        edges_consistent && vertices_consistent
    }

    // ------------------------------------------------------------------
    // Vertex list
    // ------------------------------------------------------------------

    /// Iterate on all vertex ids, in no particular order
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys()
    }

    pub fn nb_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices having an edge pointing to `vid`, ascending, without
    /// duplicates
    pub fn in_neighbors(&self, vid: VertexId) -> GraphResult<Vec<VertexId>> {
        Ok(self.in_neighbor_set(vid)?.into_iter().collect())
    }

    /// Vertices `vid` has an edge pointing to, ascending, without duplicates
    pub fn out_neighbors(&self, vid: VertexId) -> GraphResult<Vec<VertexId>> {
        Ok(self.out_neighbor_set(vid)?.into_iter().collect())
    }

    /// Union of in and out neighbors, ascending, without duplicates
    pub fn neighbors(&self, vid: VertexId) -> GraphResult<Vec<VertexId>> {
        let mut all = self.in_neighbor_set(vid)?;
        all.extend(self.out_neighbor_set(vid)?);
        Ok(all.into_iter().collect())
    }

    pub fn nb_in_neighbors(&self, vid: VertexId) -> GraphResult<usize> {
        Ok(self.in_neighbor_set(vid)?.len())
    }

    pub fn nb_out_neighbors(&self, vid: VertexId) -> GraphResult<usize> {
        Ok(self.out_neighbor_set(vid)?.len())
    }

    pub fn nb_neighbors(&self, vid: VertexId) -> GraphResult<usize> {
        Ok(self.neighbors(vid)?.len())
    }

    fn in_neighbor_set(&self, vid: VertexId) -> GraphResult<BTreeSet<VertexId>> {
        self.adjacency(vid)?
            .incoming
            .iter()
            .map(|&eid| self.source(eid))
            .collect()
    }

    fn out_neighbor_set(&self, vid: VertexId) -> GraphResult<BTreeSet<VertexId>> {
        self.adjacency(vid)?
            .outgoing
            .iter()
            .map(|&eid| self.target(eid))
            .collect()
    }

    // ------------------------------------------------------------------
    // Edge list
    // ------------------------------------------------------------------

    /// Iterate on all edge ids, in no particular order
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys()
    }

    pub fn nb_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterate on the edges attached to `vid`, incoming first
    ///
    /// A self-loop is yielded twice, once from each side.
    pub fn vertex_edges(&self, vid: VertexId) -> GraphResult<impl Iterator<Item = EdgeId> + '_> {
        let adj = self.adjacency(vid)?;
        Ok(adj.incoming.iter().chain(adj.outgoing.iter()).copied())
    }

    pub fn nb_vertex_edges(&self, vid: VertexId) -> GraphResult<usize> {
        let adj = self.adjacency(vid)?;
        Ok(adj.incoming.len() + adj.outgoing.len())
    }

    /// Iterate on the edges pointing to `vid`
    pub fn in_edges(&self, vid: VertexId) -> GraphResult<impl Iterator<Item = EdgeId> + '_> {
        Ok(self.adjacency(vid)?.incoming.iter().copied())
    }

    /// Iterate on the edges leaving `vid`
    pub fn out_edges(&self, vid: VertexId) -> GraphResult<impl Iterator<Item = EdgeId> + '_> {
        Ok(self.adjacency(vid)?.outgoing.iter().copied())
    }

    pub fn nb_in_edges(&self, vid: VertexId) -> GraphResult<usize> {
        Ok(self.adjacency(vid)?.incoming.len())
    }

    pub fn nb_out_edges(&self, vid: VertexId) -> GraphResult<usize> {
        Ok(self.adjacency(vid)?.outgoing.len())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Add a vertex, using `vid` if given or a generated id otherwise
    pub fn add_vertex(&mut self, vid: Option<VertexId>) -> GraphResult<VertexId> {
        let vid = self
            .vertices
            .add(Adjacency::default(), vid)
            .map_err(|err| match err {
                GraphError::KeyConflict(raw) => GraphError::InvalidVertex(VertexId(raw)),
                other => other,
            })?;
        trace!("Added vertex {}", vid);
        Ok(vid)
    }

    /// Remove a vertex together with every edge attached to it
    ///
    /// Returns the ids of the removed edges.
    pub fn remove_vertex(&mut self, vid: VertexId) -> GraphResult<Vec<EdgeId>> {
        let attached = self.attached_edges(vid)?;
        for &eid in &attached {
            self.remove_edge(eid)?;
        }
        self.vertices.remove(vid);
        debug!("Removed vertex {} and {} attached edges", vid, attached.len());
        Ok(attached)
    }

    /// Distinct edges attached to `vid`, self-loops counted once
    pub(crate) fn attached_edges(&self, vid: VertexId) -> GraphResult<Vec<EdgeId>> {
        let adj = self.adjacency(vid)?;
        let attached: BTreeSet<EdgeId> = adj.incoming.union(&adj.outgoing).copied().collect();
        Ok(attached.into_iter().collect())
    }

    /// Add an edge from `source` to `target`, using `eid` if given or a
    /// generated id otherwise
    ///
    /// Both vertices are checked before any id is allocated, so a failed
    /// call leaves the graph untouched.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        eid: Option<EdgeId>,
    ) -> GraphResult<EdgeId> {
        if !self.has_vertex(source) {
            return Err(GraphError::InvalidVertex(source));
        }
        if !self.has_vertex(target) {
            return Err(GraphError::InvalidVertex(target));
        }

        let eid = self
            .edges
            .add(Endpoints { source, target }, eid)
            .map_err(|err| match err {
                GraphError::KeyConflict(raw) => GraphError::InvalidEdge(EdgeId(raw)),
                other => other,
            })?;

        if let Some(adj) = self.vertices.get_mut(source) {
            adj.outgoing.insert(eid);
        }
        if let Some(adj) = self.vertices.get_mut(target) {
            adj.incoming.insert(eid);
        }
        trace!("Added edge {} from {} to {}", eid, source, target);
        Ok(eid)
    }

    /// Remove an edge and unregister it from both endpoints
    ///
    /// Returns the `(source, target)` pair the edge connected.
    pub fn remove_edge(&mut self, eid: EdgeId) -> GraphResult<(VertexId, VertexId)> {
        let ends = self.edges.remove(eid).ok_or(GraphError::InvalidEdge(eid))?;
        if let Some(adj) = self.vertices.get_mut(ends.source) {
            adj.outgoing.remove(&eid);
        }
        if let Some(adj) = self.vertices.get_mut(ends.target) {
            adj.incoming.remove(&eid);
        }
        trace!("Removed edge {}", eid);
        Ok((ends.source, ends.target))
    }

    /// Remove all vertices and edges and reset id generation
    pub fn clear(&mut self) {
        debug!(
            "Clearing graph with {} vertices and {} edges",
            self.vertices.len(),
            self.edges.len()
        );
        self.edges.clear();
        self.vertices.clear();
    }

    /// Remove all edges, keeping the vertices
    pub fn clear_edges(&mut self) {
        debug!("Clearing {} edges", self.edges.len());
        self.edges.clear();
        for adj in self.vertices.values_mut() {
            adj.incoming.clear();
            adj.outgoing.clear();
        }
    }

    // ------------------------------------------------------------------
    // Extension
    // ------------------------------------------------------------------

    /// Add a copy of the topology of `other` to this graph
    ///
    /// Every vertex and edge of `other` gets a freshly generated id here.
    /// Returns the vertex and edge translations from `other`'s ids to the
    /// new ones.
    pub fn extend(
        &mut self,
        other: &Graph,
    ) -> GraphResult<(Translation<VertexId>, Translation<EdgeId>)> {
        let snapshot = other.snapshot();
        self.extend_from(snapshot)
    }

    /// Add a copy of this graph's own topology to itself
    ///
    /// The ids present when the call starts are copied once; elements
    /// created by the copy are not copied again. Vertex and edge counts
    /// double.
    pub fn extend_with_self(&mut self) -> GraphResult<(Translation<VertexId>, Translation<EdgeId>)> {
        let snapshot = self.snapshot();
        self.extend_from(snapshot)
    }

    /// Ids to copy, ascending so that allocation order is reproducible
    fn snapshot(&self) -> Snapshot {
        let mut vertices: Vec<VertexId> = self.vertices.keys().collect();
        vertices.sort_unstable();
        let mut edges: Vec<_> = self
            .edges
            .iter()
            .map(|(eid, ends)| (eid, ends.source, ends.target))
            .collect();
        edges.sort_unstable_by_key(|&(eid, _, _)| eid);
        Snapshot { vertices, edges }
    }

    fn extend_from(
        &mut self,
        snapshot: Snapshot,
    ) -> GraphResult<(Translation<VertexId>, Translation<EdgeId>)> {
        let mut trans_vid = Translation::default();
        for vid in snapshot.vertices {
            trans_vid.insert(vid, self.add_vertex(None)?);
        }

        let mut trans_eid = Translation::default();
        for (eid, source, target) in snapshot.edges {
            let source = translated(&trans_vid, source)?;
            let target = translated(&trans_vid, target)?;
            trans_eid.insert(eid, self.add_edge(source, target, None)?);
        }

        debug!(
            "Extended graph with {} vertices and {} edges",
            trans_vid.len(),
            trans_eid.len()
        );
        Ok((trans_vid, trans_eid))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids of a graph captured before it is copied
struct Snapshot {
    vertices: Vec<VertexId>,
    edges: Vec<(EdgeId, VertexId, VertexId)>,
}

fn translated(trans_vid: &Translation<VertexId>, vid: VertexId) -> GraphResult<VertexId> {
    trans_vid.get(&vid).copied().ok_or(GraphError::InvalidVertex(vid))
}
