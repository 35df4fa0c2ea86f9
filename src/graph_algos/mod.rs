pub mod dijkstra;
pub mod frontier;
pub mod shortest_path;

pub use dijkstra::{RunStats, ShortestPathEngine};
pub use frontier::{FrontierKey, IndexedHeap, OrderedSetFrontier, PriorityContainer};
pub use shortest_path::{PathDisplay, PathReporter};
