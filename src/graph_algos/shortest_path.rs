use crate::errors::Result;
use crate::graph::{Graph, VertexId, Weight};

use std::fmt::{self, Display};


/// Reads shortest paths back out of a solved graph
/// Paths are rendered as `a -> c(9) -> d(20)`, unreached vertices as `x(unreached)`
pub struct PathReporter<'g, C> {
    graph: &'g Graph<C>,
}

impl<'g, C: Weight> PathReporter<'g, C> {

    pub fn new(graph: &'g Graph<C>) -> Self {
        Self { graph }
    }

    /// Ordered path from the source to target as vertex ids
    /// None if target was not reached by the last query
    pub fn path(&self, target: &str) -> Result<Option<Vec<VertexId>>> {
        let goal = self.graph.id_of(target)?;
        Ok(self.trace(goal))
    }

    /// Same as path, with vertex names
    pub fn path_names(&self, target: &str) -> Result<Option<Vec<&'g str>>> {
        let graph = self.graph;
        Ok(self.path(target)?.map(|ids| ids.into_iter().map(move |id| graph[id].name()).collect()))
    }

    /// Trace predecessors back from goal until the source, which is its own predecessor
    fn trace(&self, goal: VertexId) -> Option<Vec<VertexId>> {
        let mut path = Vec::new();
        let mut current = goal;

        loop {
            path.push(current);
            match self.graph[current].predecessor() {
                None => return None,
                Some(parent) if parent == current => break,
                Some(parent) => current = parent,
            }
        }

        // The path is in reverse order, so reverse it
        path.reverse();
        Some(path)
    }
}

impl<'g, C: Weight + Display> PathReporter<'g, C> {

    /// Displayable path to target
    pub fn display(&self, target: &str) -> Result<PathDisplay<'g, C>> {
        let goal = self.graph.id_of(target)?;
        Ok(PathDisplay { graph: self.graph, goal })
    }

    pub fn format_path(&self, target: &str) -> Result<String> {
        Ok(self.display(target)?.to_string())
    }

    /// Print the path to target on its own line
    pub fn print_path(&self, target: &str) -> Result<()> {
        println!("{}", self.display(target)?);
        Ok(())
    }

    /// One formatted path per vertex, order unspecified
    pub fn all_paths(&self) -> Vec<String> {
        (0..self.graph.len())
            .map(|goal| PathDisplay { graph: self.graph, goal }.to_string())
            .collect()
    }

    pub fn print_all_paths(&self) {
        for line in self.all_paths() {
            println!("{line}");
        }
    }
}


/// Path from the source to one vertex, rendered on demand
pub struct PathDisplay<'g, C> {
    graph: &'g Graph<C>,
    goal: VertexId,
}

impl<C: Weight + Display> Display for PathDisplay<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.graph;

        let Some(path) = PathReporter::new(graph).trace(self.goal) else {
            return write!(f, "{}(unreached)", graph[self.goal].name());
        };

        for (hop, &id) in path.iter().enumerate() {
            let vertex = &graph[id];
            if hop == 0 {
                write!(f, "{}", vertex.name())?;
            } else {
                write!(f, " -> {}({})", vertex.name(), vertex.distance())?;
            }
        }
        Ok(())
    }
}


impl<C: Weight> Graph<C> {

    pub fn reporter(&self) -> PathReporter<'_, C> {
        PathReporter::new(self)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphError;

    fn solved(edges: &[(&str, &str, u32)], source: &str) -> Graph<u32> {
        let mut graph = Graph::build(edges.iter().copied()).unwrap();
        graph.dijkstra(source).unwrap();
        graph
    }

    #[test]
    fn test_path_reconstruction() {
        let graph = solved(&[("A", "B", 1), ("A", "C", 3), ("B", "D", 5), ("C", "D", 1)], "A");
        let reporter = graph.reporter();

        assert_eq!(reporter.path_names("D").unwrap(), Some(vec!["A", "C", "D"]));
        assert_eq!(reporter.path_names("B").unwrap(), Some(vec!["A", "B"]));
        assert_eq!(reporter.format_path("D").unwrap(), "A -> C(3) -> D(4)");
    }

    #[test]
    fn test_source_path_is_its_name() {
        let graph = solved(&[("A", "B", 1)], "A");

        assert_eq!(graph.reporter().format_path("A").unwrap(), "A");
        assert_eq!(graph.reporter().path("A").unwrap(), Some(vec![graph.id_of("A").unwrap()]));
    }

    #[test]
    fn test_unreached_vertex() {
        let graph = solved(&[("A", "B", 1), ("C", "A", 1)], "A");

        assert_eq!(graph.reporter().format_path("C").unwrap(), "C(unreached)");
        assert_eq!(graph.reporter().path("C").unwrap(), None);
    }

    #[test]
    fn test_unknown_target() {
        let graph = solved(&[("A", "B", 1)], "A");

        assert_eq!(graph.reporter().format_path("Q"), Err(GraphError::UnknownVertex("Q".into())));
        assert!(matches!(graph.reporter().path("Q"), Err(GraphError::UnknownVertex(_))));
    }

    #[test]
    fn test_paths_before_any_query_are_unreached() {
        let graph: Graph<u32> = Graph::build([("A", "B", 1)]).unwrap();

        assert_eq!(graph.reporter().format_path("A").unwrap(), "A(unreached)");
    }

    #[test]
    fn test_all_paths_covers_every_vertex() {
        let graph = solved(&[("A", "B", 2), ("B", "C", 2), ("D", "C", 1)], "A");

        let mut lines = graph.reporter().all_paths();
        lines.sort();
        assert_eq!(lines, vec!["A", "A -> B(2)", "A -> B(2) -> C(4)", "D(unreached)"]);

        graph.reporter().print_all_paths();
        assert!(graph.reporter().print_path("C").is_ok());
        assert!(graph.reporter().print_path("Q").is_err());
    }
}
