use thiserror::Error;


/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph doesn't contain vertex \"{0}\"")]
    UnknownVertex(String), // start or end name absent from the graph
    #[error("edge {from} -> {to} has negative weight {weight}")]
    InvalidEdge {
        from: String,
        to: String,
        weight: String,
    },
    #[error("extract from an empty priority container")]
    EmptyContainer, // loop guard broken, never expected in practice
    #[error("shortest path engine used before initialization")]
    NotInitialized,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("can't read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
