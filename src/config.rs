//! Shortest path queries loaded from JSON.
//!
//! ```json
//! {
//!     "edges": [{ "source": "a", "target": "b", "weight": 7 }],
//!     "source": "a",
//!     "target": "b",
//!     "undirected": false
//! }
//! ```

use crate::errors::{ConfigError, GraphError};
use crate::graph::{Edge, Graph, Weight};

use std::{fmt::Display, fs, path::Path};
use log::debug;
use serde::{Deserialize, de::DeserializeOwned};


/// Graph data plus the query to run on it
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct QueryConfig<C = u64> {
    /// Directed edges, unless `undirected` is set
    pub edges: Vec<Edge<C>>,

    /// Vertex the shortest paths start from
    pub source: String,

    /// Vertex to report the path of. All vertices are reported if `None`.
    pub target: Option<String>,

    /// Insert every edge in both directions
    #[serde(default)]
    pub undirected: bool,
}

impl<C: Weight + DeserializeOwned> QueryConfig<C> {

    pub fn parse(json: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_path = file_path.as_ref();
        let json = fs::read(file_path)?;
        debug!("loaded query config from {}", file_path.display());
        Self::parse(&json)
    }

    pub fn build_graph(&self) -> Result<Graph<C>, GraphError> {
        let edges = self.edges.iter().cloned();
        if self.undirected {
            Graph::build_undirected(edges)
        } else {
            Graph::build(edges)
        }
    }

    /// Build the graph and solve it from the configured source
    pub fn run(&self) -> Result<Graph<C>, ConfigError> {
        let mut graph = self.build_graph()?;
        let stats = graph.dijkstra(&self.source)?;
        debug!("query from \"{}\": {stats:?}", self.source);
        Ok(graph)
    }
}

impl<C: Weight + Display + DeserializeOwned> QueryConfig<C> {

    /// Formatted path of the target, or of every vertex when no target is set
    pub fn report(&self) -> Result<Vec<String>, ConfigError> {
        let graph = self.run()?;
        let reporter = graph.reporter();

        match &self.target {
            Some(target) => Ok(vec![reporter.format_path(target)?]),
            None => Ok(reporter.all_paths()),
        }
    }
}
