pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    signature_docs, APIFunctionInfo, ClassInfo, ExtractionReport, ExtractionWarning, HttpMethod,
    MethodInfo, ProjectMetadata, PropertyInfo, RelationshipInfo, RelationshipKind, CLASS_DOCS,
};
