use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Malformed introspection input: {0}")]
    MalformedWireInput(String),

    #[error("Type '{0}' not in schema")]
    UnknownType(String),

    #[error("Type '{0}' is not reachable from any root operation type")]
    UnreachableTarget(String),

    #[error("Path starts at '{0}', which is not a root operation type")]
    UnrecognizedOperationRoot(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedWireInput(err.to_string())
    }
}
