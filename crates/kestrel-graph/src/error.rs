use std::fmt;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Which end of an edge a vertex argument was passed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge was requested between vertices that are not both members.
    #[error("{endpoint} vertex is not in the graph")]
    VertexNotFound { endpoint: Endpoint },

    #[error("edge is not in the graph")]
    EdgeNotFound,

    #[error("invalid graph options: {message}")]
    InvalidOptions { message: String },
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::InvalidOptions {
            message: err.to_string(),
        }
    }
}
