use crate::collections::FxIndexMap;
use crate::errors::{GraphError, Result};

use std::fmt::{self, Debug, Display};
use std::ops::{Index, IndexMut};
use log::{debug, warn};
use num_traits::{CheckedAdd, Zero};
use serde::Deserialize;


/// Edge weight / path cost
/// Any totally ordered numeric with a zero and overflow-checked addition.
/// A path whose cost overflows C is not followed: the vertex it leads to may be
/// reported as unreached. Such edges are counted in RunStats::overflows.
pub trait Weight: Zero + CheckedAdd + Ord + Copy + Debug {}

impl<T> Weight for T where T: Zero + CheckedAdd + Ord + Copy + Debug {}


/// Index of a vertex in the arena of its owning Graph
/// Stable for the lifetime of the graph
pub type VertexId = usize;


/// Best known distance from the source
/// Every finite distance orders below Infinite
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance<C> {
    Finite(C),
    Infinite,
}

impl<C: Copy> Distance<C> {

    /// The finite value, None if the vertex is out of reach
    pub fn finite(&self) -> Option<C> {
        match self {
            Distance::Finite(c) => Some(*c),
            Distance::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Distance::Infinite)
    }
}

impl<C: Display> Display for Distance<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(c) => write!(f, "{c}"),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}


/// Lifecycle of a vertex during one shortest path query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexState {
    Unvisited, // never initialized for a query
    Frontier, // waiting in the priority container (or never reached)
    Settled, // extracted, distance is final
}


/// Directed weighted edge, only used while building a graph
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Edge<C> {
    pub source: String,
    pub target: String,
    pub weight: C,
}

impl<C> Edge<C> {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: C) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

impl<S: Into<String>, T: Into<String>, C> From<(S, T, C)> for Edge<C> {
    fn from((source, target, weight): (S, T, C)) -> Self {
        Edge::new(source, target, weight)
    }
}


/// Vertex of the graph
/// Mutable fields are overwritten by every shortest path query
#[derive(Debug, Clone)]
pub struct Vertex<C> {
    id: VertexId,
    name: String,
    pub(crate) distance: Distance<C>,
    pub(crate) predecessor: Option<VertexId>, // Some(id) of itself marks the source
    pub(crate) state: VertexState,
    neighbors: FxIndexMap<VertexId, C>,
}

impl<C> Vertex<C> {

    fn new(id: VertexId, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            distance: Distance::Infinite,
            predecessor: None,
            state: VertexState::Unvisited,
            neighbors: FxIndexMap::default(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predecessor(&self) -> Option<VertexId> {
        self.predecessor
    }

    pub fn state(&self) -> VertexState {
        self.state
    }

    /// True for the source of the last query
    pub fn is_source(&self) -> bool {
        self.predecessor == Some(self.id)
    }

    pub fn out_degree(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn reset(&mut self) {
        self.distance = Distance::Infinite;
        self.predecessor = None;
        self.state = VertexState::Unvisited;
    }
}

impl<C: Copy> Vertex<C> {

    pub fn distance(&self) -> Distance<C> {
        self.distance
    }

    /// Outgoing edges as (target, weight)
    pub fn neighbors(&self) -> impl Iterator<Item = (VertexId, C)> + '_ {
        self.neighbors.iter().map(|(&id, &weight)| (id, weight))
    }

    pub fn weight_to(&self, target: VertexId) -> Option<C> {
        self.neighbors.get(&target).copied()
    }
}

impl<C: Display> Display for Vertex<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.name, self.distance)
    }
}


/// Named weighted digraph
/// Owns every vertex; vertices refer to each other by VertexId only
#[derive(Debug, Clone)]
pub struct Graph<C> {
    vertices: FxIndexMap<String, Vertex<C>>,
    ranks: Vec<usize>, // position of each vertex in lexicographic name order
}

impl<C: Weight> Graph<C> {

    /// Build a directed graph from an edge list
    /// Vertices are deduplicated by name, a repeated (source, target) pair keeps the last weight
    pub fn build<I, E>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<C>>,
    {
        Self::from_edges(edges.into_iter().map(Into::into).collect(), false)
    }

    /// Build an undirected graph - every edge is also inserted reversed
    pub fn build_undirected<I, E>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<C>>,
    {
        Self::from_edges(edges.into_iter().map(Into::into).collect(), true)
    }

    /// Graph with one isolated vertex
    pub fn single(name: &str) -> Self {
        let mut graph = Self::empty();
        graph.register(name);
        graph.rank_vertices();
        graph
    }

    fn empty() -> Self {
        Self {
            vertices: FxIndexMap::default(),
            ranks: Vec::new(),
        }
    }

    fn from_edges(edges: Vec<Edge<C>>, undirected: bool) -> Result<Self> {

        // Reject the whole edge list before building anything
        if let Some(edge) = edges.iter().find(|e| e.weight < C::zero()) {
            return Err(GraphError::InvalidEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
                weight: format!("{:?}", edge.weight),
            });
        }

        let mut graph = Self::empty();

        // First pass: create all vertices
        let links: Vec<(VertexId, VertexId, C)> = edges
            .iter()
            .map(|e| (graph.register(&e.source), graph.register(&e.target), e.weight))
            .collect();

        // Second pass: connect them
        for (source, target, weight) in links {
            graph.connect(source, target, weight);
            if undirected {
                graph.connect(target, source, weight);
            }
        }

        graph.rank_vertices();
        debug!("built graph with {} vertices from {} edges (undirected: {undirected})", graph.len(), edges.len());

        Ok(graph)
    }

    /// Returns the id of the named vertex, creating it if absent
    fn register(&mut self, name: &str) -> VertexId {
        match self.vertices.get_index_of(name) {
            Some(id) => id,
            None => {
                let id = self.vertices.len();
                self.vertices.insert(name.to_owned(), Vertex::new(id, name));
                id
            }
        }
    }

    fn connect(&mut self, source: VertexId, target: VertexId, weight: C) {
        if let Some(previous) = self.vertices[source].neighbors.insert(target, weight) {
            if previous != weight {
                warn!(
                    "duplicate edge {} -> {}: weight {previous:?} replaced by {weight:?}",
                    self.vertices[source].name, self.vertices[target].name
                );
            }
        }
    }

    fn rank_vertices(&mut self) {
        let mut order: Vec<VertexId> = (0..self.vertices.len()).collect();
        order.sort_by(|&a, &b| self.vertices[a].name.cmp(&self.vertices[b].name));

        self.ranks = vec![0; order.len()];
        for (rank, id) in order.into_iter().enumerate() {
            self.ranks[id] = rank;
        }
    }
}

impl<C> Graph<C> {

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    pub fn id_of(&self, name: &str) -> Result<VertexId> {
        self.vertices
            .get_index_of(name)
            .ok_or_else(|| GraphError::UnknownVertex(name.to_owned()))
    }

    /// Named vertex lookup
    pub fn lookup(&self, name: &str) -> Result<&Vertex<C>> {
        self.vertices
            .get(name)
            .ok_or_else(|| GraphError::UnknownVertex(name.to_owned()))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<C>> {
        self.vertices.get_index(id).map(|(_, v)| v)
    }

    /// All vertices, in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<C>> + '_ {
        self.vertices.values()
    }

    pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex<C>> + '_ {
        self.vertices.values_mut()
    }

    /// Position of the vertex name in lexicographic order
    /// Used to tie-break frontier entries of equal distance
    pub(crate) fn rank(&self, id: VertexId) -> usize {
        self.ranks[id]
    }

    /// Forget the results of the last query
    pub fn reset(&mut self) {
        for vertex in self.vertices_mut() {
            vertex.reset();
        }
    }
}

impl<C> Index<VertexId> for Graph<C> {
    type Output = Vertex<C>;

    fn index(&self, id: VertexId) -> &Vertex<C> {
        &self.vertices[id]
    }
}

impl<C> IndexMut<VertexId> for Graph<C> {
    fn index_mut(&mut self, id: VertexId) -> &mut Vertex<C> {
        &mut self.vertices[id]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn names<C: Weight>(graph: &Graph<C>, ids: impl Iterator<Item = VertexId>) -> Vec<String> {
        ids.map(|id| graph.vertex(id).unwrap().name().to_string()).collect()
    }

    #[test]
    fn test_build_deduplicates_vertices() {
        let graph = Graph::build([("a", "b", 1u32), ("b", "c", 2), ("a", "c", 5)]).unwrap();

        assert_eq!(graph.len(), 3);
        assert!(graph.contains("a") && graph.contains("b") && graph.contains("c"));
        assert_eq!(graph.lookup("a").unwrap().out_degree(), 2);
    }

    #[test]
    fn test_build_is_directed() {
        let graph = Graph::build([("a", "b", 4u32)]).unwrap();

        let a = graph.lookup("a").unwrap();
        let b = graph.lookup("b").unwrap();
        assert_eq!(a.weight_to(b.id()), Some(4));
        assert_eq!(b.weight_to(a.id()), None);
        assert_eq!(b.out_degree(), 0);
    }

    #[test]
    fn test_duplicate_edge_last_write_wins() {
        let graph = Graph::build([("a", "b", 4u32), ("a", "b", 9), ("a", "b", 6)]).unwrap();

        let b = graph.id_of("b").unwrap();
        assert_eq!(graph.lookup("a").unwrap().weight_to(b), Some(6));
        assert_eq!(graph.lookup("a").unwrap().out_degree(), 1);
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let result = Graph::build([("a", "b", 3i32), ("b", "c", -1)]);

        assert_eq!(
            result.unwrap_err(),
            GraphError::InvalidEdge { from: "b".into(), to: "c".into(), weight: "-1".into() }
        );
    }

    #[test]
    fn test_zero_weight_and_self_loop_are_accepted() {
        let graph = Graph::build([("a", "a", 0i32), ("a", "b", 0)]).unwrap();

        let a = graph.lookup("a").unwrap();
        assert_eq!(a.weight_to(a.id()), Some(0));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_build_undirected_adds_reverse_edges() {
        let graph = Graph::build_undirected([("a", "b", 3u32), ("b", "c", 1)]).unwrap();

        let b = graph.lookup("b").unwrap();
        let mut around_b = names(&graph, b.neighbors().map(|(id, _)| id));
        around_b.sort();
        assert_eq!(around_b, vec!["a", "c"]);
        assert_eq!(b.weight_to(graph.id_of("a").unwrap()), Some(3));
    }

    #[test]
    fn test_lookup_unknown_vertex() {
        let graph = Graph::build([("a", "b", 1u32)]).unwrap();

        assert_eq!(graph.lookup("z").unwrap_err(), GraphError::UnknownVertex("z".into()));
        assert!(matches!(graph.id_of("z"), Err(GraphError::UnknownVertex(_))));
    }

    #[test]
    fn test_single_vertex_graph() {
        let graph: Graph<u32> = Graph::single("solo");

        assert_eq!(graph.len(), 1);
        let solo = graph.lookup("solo").unwrap();
        assert_eq!(solo.distance(), Distance::Infinite);
        assert_eq!(solo.state(), VertexState::Unvisited);
        assert_eq!(solo.predecessor(), None);
    }

    #[test]
    fn test_ranks_follow_name_order() {
        let graph = Graph::build([("m", "b", 1u32), ("z", "a", 1)]).unwrap();

        let ranked: Vec<_> = ["a", "b", "m", "z"]
            .iter()
            .map(|name| graph.rank(graph.id_of(name).unwrap()))
            .collect();
        assert_eq!(ranked, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reset_forgets_query() {
        let mut graph = Graph::build([("a", "b", 2u32)]).unwrap();
        graph.dijkstra("a").unwrap();
        assert_eq!(graph.lookup("b").unwrap().distance(), Distance::Finite(2));

        graph.reset();
        for vertex in graph.vertices() {
            assert_eq!(vertex.distance(), Distance::Infinite);
            assert_eq!(vertex.predecessor(), None);
            assert_eq!(vertex.state(), VertexState::Unvisited);
        }
    }

    // Resetting and reading names needs no bound on the weight type
    fn reset_and_list<C>(graph: &mut Graph<C>) -> Vec<(String, VertexState, Option<VertexId>)> {
        graph.reset();
        graph.vertices()
            .map(|v| (v.name().to_string(), v.state(), v.predecessor()))
            .collect()
    }

    #[test]
    fn test_reset_through_unbounded_graph() {
        let mut graph = Graph::build([("a", "b", 5u64)]).unwrap();
        graph.dijkstra("a").unwrap();
        assert!(graph.lookup("a").unwrap().is_source());

        assert_eq!(
            reset_and_list(&mut graph),
            vec![
                ("a".to_string(), VertexState::Unvisited, None),
                ("b".to_string(), VertexState::Unvisited, None),
            ]
        );
        assert!(!graph.lookup("a").unwrap().is_source());
    }

    #[test]
    fn test_distance_ordering_and_display() {
        assert!(Distance::Finite(u32::MAX) < Distance::Infinite);
        assert!(Distance::Finite(3) < Distance::Finite(4));
        assert_eq!(Distance::Finite(7).to_string(), "7");
        assert_eq!(Distance::<u32>::Infinite.to_string(), "inf");

        let graph = Graph::build([("a", "b", 1u32)]).unwrap();
        assert_eq!(graph.lookup("b").unwrap().to_string(), "(b, inf)");
    }
}
