use thiserror::Error;

/// Errors raised while building the catalog or generating a segment type.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("malformed descriptor for {family}: {reason}")]
    MalformedDescriptor { family: String, reason: String },
    #[error("no vector type or lerp function for {0}D segments")]
    UnsupportedDimension(usize),
    #[error("no name for splines of degree {0}")]
    UnsupportedDegree(usize),
    #[error("cannot convert from basis {from} to singular basis {to}")]
    SingularBasisMatrix { from: String, to: String },
    #[error("cannot convert between bases of size {from} and {to}")]
    DegreeMismatch { from: usize, to: usize },
    #[error("failed to write generated source: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("{failed} segment type(s) failed to generate")]
    BatchFailed { failed: usize },
}

/// A generation failure, tagged with the type that was being generated.
#[derive(Error, Debug)]
#[error("failed to generate {task}: {source}")]
pub struct TaskError {
    pub task: String,
    #[source]
    pub source: GenerateError,
}
