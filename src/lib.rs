pub use catalog::{Catalog, CurveFamily};
pub use code::CodeWriter;
pub use error::{GenerateError, TaskError};
pub use generate::{
    conversion_rows, generate_all, generate_type, module_index, polynomial_rows, regenerate,
    EmittedDocument, GenerationTask,
};
pub use sink::{DirectorySink, DocumentSink, ManifestEntry, MemorySink};
pub use sum::{LinearSum, NumberStyle};

pub mod catalog;
pub mod code;
mod error;
pub mod generate;
pub mod math;
pub mod sink;
pub mod sum;
