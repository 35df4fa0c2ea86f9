use crate::errors::{GraphError, Result};
use crate::graph::{Distance, Graph, VertexId, VertexState, Weight};
use super::frontier::{FrontierKey, IndexedHeap, PriorityContainer};

use log::{debug, trace, warn};


/// Counters for one shortest path query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub settled: usize, // vertices extracted with a finite distance
    pub relaxations: usize, // successful distance updates, source excluded
    pub unreachable: usize, // vertices left at infinite distance
    pub overflows: usize, // edges skipped because the path cost overflowed C
}


/// Dijkstra's Algorithm over a named graph
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Writes distance and predecessor into the vertices of the borrowed graph.
/// The graph is borrowed mutably, so only one query can run on it at a time.
pub struct ShortestPathEngine<'g, C, F = IndexedHeap<FrontierKey<C>>> {
    graph: &'g mut Graph<C>,
    frontier: F, // vertices not settled yet
    source: Option<VertexId>,
    stats: RunStats,
    edges: Vec<(VertexId, C)>, // outgoing edges of the vertex being settled, reused every step
}

impl<'g, C: Weight> ShortestPathEngine<'g, C> {

    /// Engine using the indexed binary heap as its frontier
    pub fn new(graph: &'g mut Graph<C>) -> Self {
        let frontier = IndexedHeap::with_capacity(graph.len());
        Self::with_frontier(graph, frontier)
    }
}

impl<'g, C, F> ShortestPathEngine<'g, C, F>
where
    C: Weight,
    F: PriorityContainer<FrontierKey<C>>,
{

    pub fn with_frontier(graph: &'g mut Graph<C>, frontier: F) -> Self {
        Self {
            graph,
            frontier,
            source: None,
            stats: RunStats::default(),
            edges: Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph<C> {
        &*self.graph
    }

    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// True once the relax loop has nothing left to do
    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Reset every vertex for a query from source and load the frontier
    /// Fails without touching the graph if source is unknown
    pub fn initialize(&mut self, source: &str) -> Result<VertexId> {
        let source_id = self.graph.id_of(source)?;

        self.frontier.clear();
        for vertex in self.graph.vertices_mut() {
            if vertex.id() == source_id {
                vertex.distance = Distance::Finite(C::zero());
                vertex.predecessor = Some(source_id);
            } else {
                vertex.distance = Distance::Infinite;
                vertex.predecessor = None;
            }
            vertex.state = VertexState::Frontier;
        }

        for id in 0..self.graph.len() {
            let key = self.key(id);
            self.frontier.insert(id, key);
        }

        self.source = Some(source_id);
        self.stats = RunStats::default();
        debug!("initialized query from \"{source}\" over {} vertices", self.graph.len());

        Ok(source_id)
    }

    /// Settle one vertex and relax its outgoing edges
    /// Returns the settled vertex, None once the loop has terminated
    pub fn step(&mut self) -> Result<Option<VertexId>> {
        if self.source.is_none() {
            return Err(GraphError::NotInitialized);
        }
        if self.frontier.is_empty() {
            return Ok(None);
        }

        let (u, (distance, _)) = self.frontier.extract_min()?;

        // Smallest distance is infinite - everything left is unreachable
        let Distance::Finite(base) = distance else {
            self.stats.unreachable = self.frontier.len() + 1;
            self.frontier.clear();
            debug!("{} vertices unreachable, stopping early", self.stats.unreachable);
            return Ok(None);
        };

        self.graph[u].state = VertexState::Settled;
        self.stats.settled += 1;
        trace!("settled {} at {base:?}", self.graph[u].name());

        let mut edges = std::mem::take(&mut self.edges);
        edges.clear();
        edges.extend(self.graph[u].neighbors());

        for &(v, weight) in &edges {
            if self.graph[v].state == VertexState::Settled {
                continue;
            }

            // An overflowing sum is never shorter, v may be left unreached
            let Some(alt) = base.checked_add(&weight) else {
                self.stats.overflows += 1;
                warn!(
                    "path cost {base:?} + {weight:?} from {} to {} overflows, edge skipped",
                    self.graph[u].name(), self.graph[v].name()
                );
                continue;
            };
            let alt = Distance::Finite(alt);

            // Strictly shorter only, ties keep the first predecessor found
            if alt < self.graph[v].distance {
                let neighbor = &mut self.graph[v];
                neighbor.distance = alt;
                neighbor.predecessor = Some(u);

                let key = self.key(v);
                self.frontier.decrease_key(v, key);
                self.stats.relaxations += 1;
                trace!("relaxed {} to {alt:?} via {}", self.graph[v].name(), self.graph[u].name());
            }
        }
        self.edges = edges;

        Ok(Some(u))
    }

    /// Run the relax loop to the end
    pub fn run(&mut self) -> Result<RunStats> {
        while self.step()?.is_some() {}

        debug!(
            "query finished: {} settled, {} relaxations, {} unreachable, {} overflows",
            self.stats.settled, self.stats.relaxations, self.stats.unreachable, self.stats.overflows
        );
        Ok(self.stats)
    }

    /// Initialize from source then run to the end
    pub fn solve(&mut self, source: &str) -> Result<RunStats> {
        self.initialize(source)?;
        self.run()
    }

    fn key(&self, id: VertexId) -> FrontierKey<C> {
        (self.graph[id].distance, self.graph.rank(id))
    }
}


impl<C: Weight> Graph<C> {

    /// Shortest paths from source to every vertex
    /// Results are left in the vertices, see PathReporter for reading paths back
    pub fn dijkstra(&mut self, source: &str) -> Result<RunStats> {
        ShortestPathEngine::new(self).solve(source)
    }
}
