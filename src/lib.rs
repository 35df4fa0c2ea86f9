//! Single-source shortest paths over named, weighted digraphs.
//!
//! ```
//! use dijkstra_graph::Graph;
//!
//! let mut graph = Graph::build([("a", "b", 7u32), ("a", "c", 9), ("c", "d", 11), ("b", "d", 15)]).unwrap();
//! graph.dijkstra("a").unwrap();
//! assert_eq!(graph.reporter().format_path("d").unwrap(), "a -> c(9) -> d(20)");
//! ```

mod collections;
pub mod config;
pub mod errors;
pub mod graph;
pub mod graph_algos;

pub use config::QueryConfig;
pub use errors::{ConfigError, GraphError, Result};
pub use graph::{Distance, Edge, Graph, Vertex, VertexId, VertexState, Weight};
pub use graph_algos::{
    IndexedHeap, OrderedSetFrontier, PathReporter, PriorityContainer, RunStats, ShortestPathEngine,
};
